//! glTF / GLB decoding
//!
//! Turns a model file into a [`ModelAsset`]: node hierarchy, one
//! [`MeshPart`] per primitive, and materials mapped onto [`MaterialKind`].
//! Every byte, including external buffers, is read through an
//! [`AssetSource`], so the same loader works against disk or memory.
//!
//! [`MaterialKind`]: crate::render::MaterialKind

use std::collections::{BTreeMap, HashSet};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::foundation::math::{Quat, Quaternion, Transform, Vec3};
use crate::render::{
    FilterMode, Material, PhongParams, Side, StandardParams, Texture,
    TextureEncoding, TextureSettings, UnlitParams, WrapMode,
};
use crate::scene::ShadowFlags;
use super::model::{CompressedGeometry, MeshData, MeshGeometry, MeshPart, ModelAsset, ModelNode};
use super::source::{resolve_relative, AssetSource};
use super::AssetError;

/// Draco geometry compression
pub const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

/// KTX2 / Basis Universal textures
pub const BASISU_EXTENSION: &str = "KHR_texture_basisu";

/// Extensions every profile can satisfy
const BASE_EXTENSIONS: &[&str] = &[
    "KHR_materials_unlit",
    "KHR_materials_pbrSpecularGlossiness",
    "KHR_texture_transform",
    "KHR_materials_emissive_strength",
];

/// Which optional decoders the loader is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoaderProfile {
    /// Uncompressed geometry and CPU-decodable images only
    #[default]
    Plain,
    /// Adds Draco geometry and KTX2 texture support
    Compressed,
}

impl LoaderProfile {
    /// Whether files requiring `extension` can be loaded
    pub fn supports(self, extension: &str) -> bool {
        BASE_EXTENSIONS.contains(&extension)
            || (self == Self::Compressed && (extension == DRACO_EXTENSION || extension == BASISU_EXTENSION))
    }
}

/// Per-file state shared while converting one document
struct DecodeContext<'a> {
    path: &'a str,
    document: &'a gltf::Document,
    buffers: Vec<Vec<u8>>,
}

/// glTF loader
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoader {
    profile: LoaderProfile,
}

impl GltfLoader {
    /// Create a loader for the given profile
    pub fn new(profile: LoaderProfile) -> Self {
        Self { profile }
    }
    
    /// Active profile
    pub fn profile(&self) -> LoaderProfile {
        self.profile
    }
    
    /// Fetch and decode the model at `path`
    pub fn load(&self, source: &dyn AssetSource, path: &str) -> Result<ModelAsset, AssetError> {
        let bytes = source.fetch(path)?;
        self.decode(source, path, &bytes)
    }
    
    /// Decode model bytes; `source` resolves external buffers relative to `path`
    pub fn decode(&self, source: &dyn AssetSource, path: &str, bytes: &[u8]) -> Result<ModelAsset, AssetError> {
        let gltf::Gltf { document, blob } = self.parse(path, bytes)?;
        
        let buffers = load_buffers(source, path, &document, blob)?;
        let ctx = DecodeContext {
            path,
            document: &document,
            buffers,
        };
        
        let roots = root_nodes(&document)
            .into_iter()
            .map(|node| self.convert_node(&ctx, &node))
            .collect::<Result<Vec<_>, _>>()?;
        
        let model = ModelAsset {
            source: path.to_string(),
            roots,
        };
        log::debug!("Decoded {} with {} mesh parts", path, model.meshes().len());
        Ok(model)
    }
    
    fn parse(&self, path: &str, bytes: &[u8]) -> Result<gltf::Gltf, AssetError> {
        let gltf = gltf::Gltf::from_slice_without_validation(bytes).map_err(|e| AssetError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        
        // A missing decoder is reported before any structural problem
        self.check_required_extensions(path, &gltf.document)?;
        self.validate(path, &gltf.document)?;
        Ok(gltf)
    }
    
    fn check_required_extensions(&self, path: &str, document: &gltf::Document) -> Result<(), AssetError> {
        match document.extensions_required().find(|ext| !self.profile.supports(ext)) {
            Some(extension) => Err(AssetError::UnsupportedExtension {
                path: path.to_string(),
                extension: extension.to_string(),
            }),
            None => Ok(()),
        }
    }
    
    /// Structural checks gltf runs on a validated load, minus the gaps the
    /// supported extensions leave: Draco accessors without a bufferView and
    /// KTX2 textures without a core image.
    fn validate(&self, path: &str, document: &gltf::Document) -> Result<(), AssetError> {
        use gltf::json::validation::Validate;
        
        let root = document.as_json();
        let invalid = |reason: String| AssetError::Decode {
            path: path.to_string(),
            reason,
        };
        
        // gltf indexes POSITION accessors unchecked while validating
        for (m, mesh) in root.meshes.iter().enumerate() {
            for (p, primitive) in mesh.primitives.iter().enumerate() {
                let dangling = primitive
                    .attributes
                    .values()
                    .chain(primitive.indices.iter())
                    .find(|accessor| accessor.value() >= root.accessors.len());
                if let Some(accessor) = dangling {
                    return Err(invalid(format!(
                        "meshes[{m}].primitives[{p}] references missing accessor {}",
                        accessor.value()
                    )));
                }
            }
        }
        
        let tolerated = self.tolerated_paths(root);
        let mut errors = Vec::new();
        root.validate(root, gltf::json::Path::new, &mut |at, error| {
            let at = at().to_string();
            if !at.starts_with("extensionsRequired") && !tolerated.contains(&at) {
                errors.push(format!("{at}: {error}"));
            }
        });
        
        if errors.is_empty() {
            Ok(())
        } else {
            Err(invalid(errors.join("; ")))
        }
    }
    
    fn tolerated_paths(&self, root: &gltf::json::Root) -> HashSet<String> {
        if self.profile != LoaderProfile::Compressed {
            return HashSet::new();
        }
        
        let draco_accessors = root
            .meshes
            .iter()
            .flat_map(|mesh| &mesh.primitives)
            .filter(|primitive| {
                primitive
                    .extensions
                    .as_ref()
                    .is_some_and(|ext| ext.others.contains_key(DRACO_EXTENSION))
            })
            .flat_map(|primitive| primitive.attributes.values().chain(primitive.indices.iter()))
            .map(|accessor| format!("accessors[{}].bufferView", accessor.value()));
        
        let ktx2_textures = root
            .textures
            .iter()
            .enumerate()
            .filter(|(_, texture)| {
                texture
                    .extensions
                    .as_ref()
                    .is_some_and(|ext| ext.others.contains_key(BASISU_EXTENSION))
            })
            .map(|(index, _)| format!("textures[{index}].source"));
        
        draco_accessors.chain(ktx2_textures).collect()
    }
    
    fn convert_node(&self, ctx: &DecodeContext<'_>, node: &gltf::Node<'_>) -> Result<ModelNode, AssetError> {
        let (translation, [x, y, z, w], scale) = node.transform().decomposed();
        let transform = Transform {
            position: Vec3::from(translation),
            rotation: Quat::from_quaternion(Quaternion::new(w, x, y, z)),
            scale: Vec3::from(scale),
        };
        
        let meshes = match node.mesh() {
            Some(mesh) => mesh
                .primitives()
                .map(|primitive| {
                    Ok(MeshPart {
                        name: mesh.name().map(str::to_owned),
                        geometry: self.convert_geometry(ctx, &primitive)?,
                        material: self.convert_material(ctx, &primitive.material()),
                        shadows: ShadowFlags::empty(),
                    })
                })
                .collect::<Result<Vec<_>, AssetError>>()?,
            None => Vec::new(),
        };
        
        let children = node
            .children()
            .map(|child| self.convert_node(ctx, &child))
            .collect::<Result<Vec<_>, _>>()?;
        
        Ok(ModelNode {
            name: node.name().map(str::to_owned),
            transform,
            meshes,
            children,
        })
    }
    
    fn convert_geometry(&self, ctx: &DecodeContext<'_>, primitive: &gltf::Primitive<'_>) -> Result<MeshGeometry, AssetError> {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("{}: primitive mode {:?} treated as triangles", ctx.path, primitive.mode());
        }
        
        if let Some(extension) = primitive.extension_value(DRACO_EXTENSION) {
            if self.profile == LoaderProfile::Compressed {
                return compressed_geometry(ctx, primitive, extension);
            }
        }
        
        let reader = primitive.reader(|buffer| ctx.buffers.get(buffer.index()).map(Vec::as_slice));
        let positions: Vec<[f32; 3]> = reader.read_positions().map(Iterator::collect).unwrap_or_default();
        
        if positions.is_empty() && primitive.extension_value(DRACO_EXTENSION).is_some() {
            return Err(AssetError::UnsupportedExtension {
                path: ctx.path.to_string(),
                extension: DRACO_EXTENSION.to_string(),
            });
        }
        
        Ok(MeshGeometry::Triangles(MeshData {
            positions,
            normals: reader.read_normals().map(Iterator::collect).unwrap_or_default(),
            uvs: reader
                .read_tex_coords(0)
                .map(|coords| coords.into_f32().collect())
                .unwrap_or_default(),
            indices: reader.read_indices().map(|indices| indices.into_u32().collect()),
        }))
    }
    
    fn convert_material(&self, ctx: &DecodeContext<'_>, material: &gltf::Material<'_>) -> Material {
        let pbr = material.pbr_metallic_roughness();
        let normal_map = material
            .normal_texture()
            .and_then(|info| self.convert_texture(ctx, &info.texture(), ColorRole::Data));
        
        let base = if material.unlit() {
            let [r, g, b, a] = pbr.base_color_factor();
            Material::unlit(UnlitParams {
                color: Vec3::new(r, g, b),
                alpha: a,
                map: pbr
                    .base_color_texture()
                    .and_then(|info| self.convert_texture(ctx, &info.texture(), ColorRole::Color)),
            })
        } else if let Some(spec_gloss) = material.pbr_specular_glossiness() {
            let [r, g, b, a] = spec_gloss.diffuse_factor();
            Material::phong(PhongParams {
                color: Vec3::new(r, g, b),
                alpha: a,
                specular: Vec3::from(spec_gloss.specular_factor()),
                shininess: shininess_from_glossiness(spec_gloss.glossiness_factor()),
                map: spec_gloss
                    .diffuse_texture()
                    .and_then(|info| self.convert_texture(ctx, &info.texture(), ColorRole::Color)),
                normal_map,
            })
        } else {
            let [r, g, b, a] = pbr.base_color_factor();
            Material::standard(StandardParams {
                color: Vec3::new(r, g, b),
                alpha: a,
                metalness: pbr.metallic_factor(),
                roughness: pbr.roughness_factor(),
                emissive: Vec3::from(material.emissive_factor()),
                map: pbr
                    .base_color_texture()
                    .and_then(|info| self.convert_texture(ctx, &info.texture(), ColorRole::Color)),
                normal_map,
            })
        };
        
        let base = if material.double_sided() { base.with_side(Side::Double) } else { base };
        match material.name() {
            Some(name) => base.with_name(name),
            None => base,
        }
    }
    
    fn convert_texture(&self, ctx: &DecodeContext<'_>, texture: &gltf::Texture<'_>, role: ColorRole) -> Option<Texture> {
        let (image, from_basisu) = self.texture_image(ctx, texture)?;
        let (key, encoding) = match image.source() {
            gltf::image::Source::Uri { uri, mime_type } => {
                let ktx2 = mime_type == Some("image/ktx2") || uri.to_ascii_lowercase().ends_with(".ktx2");
                (resolve_relative(ctx.path, uri), encoding_for(from_basisu || ktx2))
            }
            gltf::image::Source::View { mime_type, .. } => (
                format!("{}#image{}", ctx.path, image.index()),
                encoding_for(from_basisu || mime_type == "image/ktx2"),
            ),
        };
        
        if encoding == TextureEncoding::Ktx2 && self.profile != LoaderProfile::Compressed {
            log::warn!("{}: dropping KTX2 texture {} (no compressed texture decoder)", ctx.path, key);
            return None;
        }
        
        let sampler = texture.sampler();
        let settings = TextureSettings {
            wrap_s: wrap_mode(sampler.wrap_s()),
            wrap_t: wrap_mode(sampler.wrap_t()),
            mag_filter: match sampler.mag_filter() {
                Some(gltf::texture::MagFilter::Nearest) => FilterMode::Nearest,
                _ => FilterMode::Linear,
            },
            encoding,
            ..match role {
                ColorRole::Color => TextureSettings::default(),
                ColorRole::Data => TextureSettings::linear(),
            }
        };
        Some(Texture::new(key, settings))
    }
    
    /// Image a texture samples, and whether it came from `KHR_texture_basisu`.
    ///
    /// The compressed profile prefers the KTX2 source; otherwise the core
    /// source is used. `Texture::source` is avoided because a KTX2-only
    /// texture has no core image and gltf unwraps the lookup.
    fn texture_image<'d>(&self, ctx: &DecodeContext<'d>, texture: &gltf::Texture<'_>) -> Option<(gltf::Image<'d>, bool)> {
        if self.profile == LoaderProfile::Compressed {
            if let Some(extension) = texture.extension_value(BASISU_EXTENSION) {
                let image = extension
                    .get("source")
                    .and_then(gltf::json::Value::as_u64)
                    .and_then(|index| usize::try_from(index).ok())
                    .and_then(|index| ctx.document.images().nth(index));
                match image {
                    Some(image) => return Some((image, true)),
                    None => log::warn!(
                        "{}: texture {} has an invalid {BASISU_EXTENSION} source",
                        ctx.path,
                        texture.index()
                    ),
                }
            }
        }
        
        let image = ctx
            .document
            .as_json()
            .textures
            .get(texture.index())
            .and_then(|json| ctx.document.images().nth(json.source.value()));
        if image.is_none() {
            log::warn!("{}: texture {} has no image this loader can decode", ctx.path, texture.index());
        }
        image.map(|image| (image, false))
    }
}

#[derive(Debug, Clone, Copy)]
enum ColorRole {
    Color,
    Data,
}

fn encoding_for(ktx2: bool) -> TextureEncoding {
    if ktx2 {
        TextureEncoding::Ktx2
    } else {
        TextureEncoding::Image
    }
}

fn wrap_mode(mode: gltf::texture::WrappingMode) -> WrapMode {
    match mode {
        gltf::texture::WrappingMode::ClampToEdge => WrapMode::ClampToEdge,
        gltf::texture::WrappingMode::MirroredRepeat => WrapMode::MirroredRepeat,
        gltf::texture::WrappingMode::Repeat => WrapMode::Repeat,
    }
}

/// Map glossiness in `[0, 1]` onto a Blinn-Phong exponent
fn shininess_from_glossiness(glossiness: f32) -> f32 {
    let roughness = (1.0 - glossiness).clamp(0.01, 1.0);
    (2.0 / (roughness * roughness) - 2.0).max(1.0)
}

/// Nodes of the default scene, or every parentless node if there is none
fn root_nodes(document: &gltf::Document) -> Vec<gltf::Node<'_>> {
    if let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) {
        return scene.nodes().collect();
    }
    
    let children: HashSet<usize> = document
        .nodes()
        .flat_map(|node| node.children().map(|child| child.index()).collect::<Vec<_>>())
        .collect();
    document.nodes().filter(|node| !children.contains(&node.index())).collect()
}

fn load_buffers(
    source: &dyn AssetSource,
    path: &str,
    document: &gltf::Document,
    mut blob: Option<Vec<u8>>,
) -> Result<Vec<Vec<u8>>, AssetError> {
    document
        .buffers()
        .map(|buffer| {
            let mut data = match buffer.source() {
                gltf::buffer::Source::Bin => blob
                    .take()
                    .ok_or_else(|| AssetError::InvalidData(format!("{path}: missing GLB binary chunk")))?,
                gltf::buffer::Source::Uri(uri) => match uri.strip_prefix("data:") {
                    Some(data_uri) => decode_data_uri(path, data_uri)?,
                    None => source.fetch(&resolve_relative(path, uri))?,
                },
            };
            
            if data.len() < buffer.length() {
                return Err(AssetError::InvalidData(format!(
                    "{path}: buffer {} holds {} bytes, expected {}",
                    buffer.index(),
                    data.len(),
                    buffer.length()
                )));
            }
            while data.len() % 4 != 0 {
                data.push(0);
            }
            Ok(data)
        })
        .collect()
}

fn decode_data_uri(path: &str, data_uri: &str) -> Result<Vec<u8>, AssetError> {
    let (header, payload) = data_uri
        .split_once(',')
        .ok_or_else(|| AssetError::InvalidData(format!("{path}: malformed data URI")))?;
    if !header.ends_with(";base64") {
        return Err(AssetError::InvalidData(format!("{path}: only base64 data URIs are supported")));
    }
    BASE64.decode(payload).map_err(|e| AssetError::Decode {
        path: path.to_string(),
        reason: format!("data URI: {e}"),
    })
}

fn compressed_geometry(
    ctx: &DecodeContext<'_>,
    primitive: &gltf::Primitive<'_>,
    extension: &gltf::json::Value,
) -> Result<MeshGeometry, AssetError> {
    let invalid = |what: &str| AssetError::InvalidData(format!("{}: {DRACO_EXTENSION} {what}", ctx.path));
    
    let fields = extension.as_object().ok_or_else(|| invalid("is not an object"))?;
    let view_index = fields
        .get("bufferView")
        .and_then(gltf::json::Value::as_u64)
        .ok_or_else(|| invalid("has no bufferView"))?;
    let view = usize::try_from(view_index)
        .ok()
        .and_then(|index| ctx.document.views().nth(index))
        .ok_or_else(|| invalid("references a missing bufferView"))?;
    let payload = ctx
        .buffers
        .get(view.buffer().index())
        .and_then(|data| data.get(view.offset()..view.offset() + view.length()))
        .ok_or_else(|| invalid("bufferView is out of range"))?
        .to_vec();
    
    let attributes: BTreeMap<String, u64> = fields
        .get("attributes")
        .and_then(gltf::json::Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(semantic, id)| id.as_u64().map(|id| (semantic.clone(), id)))
                .collect()
        })
        .unwrap_or_default();
    
    Ok(MeshGeometry::Compressed(CompressedGeometry {
        extension: DRACO_EXTENSION.to_string(),
        payload,
        attributes,
        vertex_count: primitive
            .get(&gltf::Semantic::Positions)
            .map_or(0, |accessor| accessor.count()),
        index_count: primitive.indices().map(|accessor| accessor.count()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fixtures;
    use crate::assets::MemorySource;
    use crate::render::MaterialKind;

    fn decode(profile: LoaderProfile, source: &MemorySource, path: &str) -> Result<ModelAsset, AssetError> {
        GltfLoader::new(profile).load(source, path)
    }

    #[test]
    fn decodes_hierarchy_geometry_and_standard_material() {
        let source = MemorySource::new()
            .with_file("models/cup/scene.gltf", fixtures::triangle_gltf(fixtures::STANDARD_MATERIAL, ""));
        let model = decode(LoaderProfile::Plain, &source, "models/cup/scene.gltf").unwrap();

        assert_eq!(model.roots.len(), 1);
        let root = &model.roots[0];
        assert_eq!(root.name.as_deref(), Some("Root"));
        let body = &root.children[0];
        assert_eq!(body.transform.position, Vec3::new(0.0, 1.0, 0.0));

        let meshes = model.meshes();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].geometry.triangle_count(), 1);
        let MaterialKind::Standard(params) = &meshes[0].material.kind else {
            panic!("expected a standard material");
        };
        assert_eq!(params.color, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(params.metalness, 0.25);
        assert_eq!(params.roughness, 0.75);
    }

    #[test]
    fn unlit_and_spec_gloss_materials_map_to_non_pbr_kinds() {
        let source = MemorySource::new()
            .with_file("a.gltf", fixtures::triangle_gltf(fixtures::UNLIT_MATERIAL, ""))
            .with_file("b.gltf", fixtures::triangle_gltf(fixtures::SPEC_GLOSS_MATERIAL, ""));

        let unlit = decode(LoaderProfile::Plain, &source, "a.gltf").unwrap();
        assert!(matches!(unlit.meshes()[0].material.kind, MaterialKind::Unlit(_)));

        let spec_gloss = decode(LoaderProfile::Plain, &source, "b.gltf").unwrap();
        let material = &spec_gloss.meshes()[0].material;
        assert!(matches!(material.kind, MaterialKind::Phong(_)));
        assert_eq!(material.color(), Vec3::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn texture_references_resolve_against_model_directory() {
        let source = MemorySource::new().with_file(
            "models/cat/scene.gltf",
            fixtures::triangle_gltf(fixtures::TEXTURED_MATERIAL, fixtures::TEXTURES),
        );
        let model = decode(LoaderProfile::Plain, &source, "models/cat/scene.gltf").unwrap();
        let material = &model.meshes()[0].material;
        assert_eq!(material.map().map(|t| t.key.as_str()), Some("models/cat/textures/base.png"));
        let normal = material.normal_map().unwrap();
        assert_eq!(normal.key, "models/cat/textures/normal.png");
        assert_eq!(normal.settings.color_space, crate::render::ColorSpace::Linear);
    }

    #[test]
    fn external_buffers_are_fetched_through_the_source() {
        let source = MemorySource::new()
            .with_file("models/bagel/scene.gltf", fixtures::external_buffer_gltf("scene.bin"))
            .with_file("models/bagel/scene.bin", fixtures::triangle_bytes());
        let model = decode(LoaderProfile::Plain, &source, "models/bagel/scene.gltf").unwrap();
        assert_eq!(model.meshes()[0].geometry.triangle_count(), 1);

        let missing = MemorySource::new()
            .with_file("models/bagel/scene.gltf", fixtures::external_buffer_gltf("scene.bin"));
        assert!(matches!(
            decode(LoaderProfile::Plain, &missing, "models/bagel/scene.gltf"),
            Err(AssetError::NotFound(path)) if path == "models/bagel/scene.bin"
        ));
    }

    #[test]
    fn draco_requires_the_compressed_profile() {
        let source = MemorySource::new().with_file("models/cake.gltf", fixtures::draco_gltf());

        let plain = decode(LoaderProfile::Plain, &source, "models/cake.gltf");
        assert!(matches!(
            plain,
            Err(AssetError::UnsupportedExtension { ref extension, .. }) if extension == DRACO_EXTENSION
        ));

        let compressed = decode(LoaderProfile::Compressed, &source, "models/cake.gltf").unwrap();
        let MeshGeometry::Compressed(geometry) = &compressed.meshes()[0].geometry else {
            panic!("expected compressed geometry");
        };
        assert_eq!(geometry.payload, fixtures::DRACO_PAYLOAD);
        assert_eq!(geometry.attributes.get("POSITION"), Some(&0));
        assert_eq!(geometry.index_count, Some(3));
    }

    #[test]
    fn glb_binary_chunk_backs_the_buffer() {
        let source = MemorySource::new()
            .with_file("models/mug.glb", fixtures::triangle_glb(true))
            .with_file("models/empty.glb", fixtures::triangle_glb(false));

        let model = decode(LoaderProfile::Plain, &source, "models/mug.glb").unwrap();
        assert_eq!(model.meshes()[0].geometry.triangle_count(), 1);
        let MeshGeometry::Triangles(data) = &model.meshes()[0].geometry else {
            panic!("expected triangles");
        };
        assert_eq!(data.positions[1], [1.0, 0.0, 0.0]);

        assert!(matches!(
            decode(LoaderProfile::Plain, &source, "models/empty.glb"),
            Err(AssetError::InvalidData(_))
        ));
    }

    fn base_color(model: &ModelAsset) -> Option<&Texture> {
        model.meshes()[0].material.map()
    }

    #[test]
    fn compressed_profile_prefers_the_basisu_source() {
        let source = MemorySource::new().with_file(
            "models/tart/scene.gltf",
            fixtures::triangle_gltf(fixtures::BASE_COLOR_MATERIAL, fixtures::BASISU_TEXTURES),
        );

        let compressed = decode(LoaderProfile::Compressed, &source, "models/tart/scene.gltf").unwrap();
        let texture = base_color(&compressed).unwrap();
        assert_eq!(texture.key, "models/tart/textures/base.ktx2");
        assert_eq!(texture.settings.encoding, TextureEncoding::Ktx2);

        let plain = decode(LoaderProfile::Plain, &source, "models/tart/scene.gltf").unwrap();
        let texture = base_color(&plain).unwrap();
        assert_eq!(texture.key, "models/tart/textures/base.png");
        assert_eq!(texture.settings.encoding, TextureEncoding::Image);
    }

    #[test]
    fn ktx2_only_texture_needs_the_compressed_profile() {
        let source = MemorySource::new().with_file("models/tart/scene.gltf", fixtures::basisu_only_gltf());

        let compressed = decode(LoaderProfile::Compressed, &source, "models/tart/scene.gltf").unwrap();
        let texture = base_color(&compressed).unwrap();
        assert_eq!(texture.key, "models/tart/textures/base.ktx2");
        assert_eq!(texture.settings.encoding, TextureEncoding::Ktx2);

        assert!(matches!(
            decode(LoaderProfile::Plain, &source, "models/tart/scene.gltf"),
            Err(AssetError::UnsupportedExtension { ref extension, .. }) if extension == BASISU_EXTENSION
        ));
    }

    #[test]
    fn plain_profile_drops_ktx2_images() {
        let source = MemorySource::new().with_file(
            "models/tart/scene.gltf",
            fixtures::triangle_gltf(fixtures::BASE_COLOR_MATERIAL, fixtures::KTX2_TEXTURES),
        );

        let plain = decode(LoaderProfile::Plain, &source, "models/tart/scene.gltf").unwrap();
        assert!(base_color(&plain).is_none());
        assert_eq!(plain.meshes().len(), 1);

        let compressed = decode(LoaderProfile::Compressed, &source, "models/tart/scene.gltf").unwrap();
        assert_eq!(base_color(&compressed).unwrap().settings.encoding, TextureEncoding::Ktx2);
    }

    #[test]
    fn dangling_indices_are_decode_errors_in_every_profile() {
        let source = MemorySource::new()
            .with_file("texture.gltf", fixtures::dangling_texture_gltf())
            .with_file("accessor.gltf", fixtures::dangling_accessor_gltf());

        for profile in [LoaderProfile::Plain, LoaderProfile::Compressed] {
            for path in ["texture.gltf", "accessor.gltf"] {
                assert!(
                    matches!(decode(profile, &source, path), Err(AssetError::Decode { .. })),
                    "{path} under {profile:?}"
                );
            }
        }
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let source = MemorySource::new().with_file("broken.gltf", b"{ not json".to_vec());
        assert!(matches!(
            decode(LoaderProfile::Plain, &source, "broken.gltf"),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn profile_extension_support() {
        assert!(!LoaderProfile::Plain.supports(DRACO_EXTENSION));
        assert!(LoaderProfile::Compressed.supports(DRACO_EXTENSION));
        assert!(LoaderProfile::Compressed.supports(BASISU_EXTENSION));
        assert!(LoaderProfile::Plain.supports("KHR_materials_unlit"));
        assert!(!LoaderProfile::Compressed.supports("EXT_meshopt_compression"));
    }
}
