//! Hand-written glTF documents for loader and composition tests

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

pub const STANDARD_MATERIAL: &str = r#"{
    "name": "Glaze",
    "pbrMetallicRoughness": {
        "baseColorFactor": [1.0, 0.0, 0.0, 1.0],
        "metallicFactor": 0.25,
        "roughnessFactor": 0.75
    }
}"#;

pub const UNLIT_MATERIAL: &str = r#"{
    "pbrMetallicRoughness": { "baseColorFactor": [0.9, 0.9, 0.9, 1.0] },
    "extensions": { "KHR_materials_unlit": {} }
}"#;

pub const SPEC_GLOSS_MATERIAL: &str = r#"{
    "doubleSided": true,
    "extensions": {
        "KHR_materials_pbrSpecularGlossiness": {
            "diffuseFactor": [0.2, 0.4, 0.6, 1.0],
            "specularFactor": [0.1, 0.1, 0.1],
            "glossinessFactor": 0.5
        }
    }
}"#;

pub const TEXTURED_MATERIAL: &str = r#"{
    "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } },
    "normalTexture": { "index": 1 }
}"#;

pub const TEXTURES: &str = r#"
    "samplers": [{ "magFilter": 9728, "wrapS": 10497, "wrapT": 33071 }],
    "images": [{ "uri": "textures/base.png" }, { "uri": "./textures/normal.png" }],
    "textures": [{ "sampler": 0, "source": 0 }, { "sampler": 0, "source": 1 }],
"#;

pub const BASE_COLOR_MATERIAL: &str = r#"{ "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }"#;

/// PNG fallback plus a KTX2 source behind `KHR_texture_basisu`
pub const BASISU_TEXTURES: &str = r#"
    "images": [{ "uri": "textures/base.png" }, { "uri": "textures/base.ktx2", "mimeType": "image/ktx2" }],
    "textures": [{ "source": 0, "extensions": { "KHR_texture_basisu": { "source": 1 } } }],
"#;

/// KTX2 image referenced through the core texture source, no extension
pub const KTX2_TEXTURES: &str = r#"
    "images": [{ "uri": "textures/base.ktx2" }],
    "textures": [{ "source": 0 }],
"#;

pub const DRACO_PAYLOAD: &[u8] = &[0x44, 0x52, 0x41, 0x43, 0x4f, 0x02, 0x02, 0x01];

/// Three vertices of a unit right triangle as little-endian floats
pub fn triangle_bytes() -> Vec<u8> {
    [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

fn data_uri(bytes: &[u8]) -> String {
    format!("data:application/octet-stream;base64,{}", BASE64.encode(bytes))
}

const TRIANGLE_TEMPLATE: &str = r#"{
    "asset": { "version": "2.0" },
    "extensionsUsed": ["KHR_materials_unlit", "KHR_materials_pbrSpecularGlossiness"],
    "scene": 0,
    "scenes": [{ "nodes": [0] }],
    "nodes": [
        { "name": "Root", "children": [1] },
        { "name": "Body", "mesh": 0, "translation": [0.0, 1.0, 0.0] }
    ],
    "meshes": [{ "name": "Body", "primitives": [{ "attributes": { "POSITION": 0 }, "material": 0 }] }],
    "materials": [@MATERIAL@],
    @TEXTURES@
    "buffers": [{ "uri": "@URI@", "byteLength": 36 }],
    "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }],
    "accessors": [{
        "bufferView": 0,
        "componentType": 5126,
        "count": 3,
        "type": "VEC3",
        "min": [0.0, 0.0, 0.0],
        "max": [1.0, 1.0, 0.0]
    }]
}"#;

/// One-triangle model with the given material and optional texture tables
pub fn triangle_gltf(material: &str, textures: &str) -> String {
    TRIANGLE_TEMPLATE
        .replace("@MATERIAL@", material)
        .replace("@TEXTURES@", textures)
        .replace("@URI@", &data_uri(&triangle_bytes()))
}

/// The default test model: one red standard-material triangle
pub fn triangle_model() -> Vec<u8> {
    triangle_model_text().into_bytes()
}

/// Same triangle, with an unlit material
pub fn unlit_model() -> Vec<u8> {
    triangle_gltf(UNLIT_MATERIAL, "").into_bytes()
}

/// Triangle whose buffer lives in a sibling file
pub fn external_buffer_gltf(uri: &str) -> String {
    TRIANGLE_TEMPLATE
        .replace("@MATERIAL@", STANDARD_MATERIAL)
        .replace("@TEXTURES@", "")
        .replace("@URI@", uri)
}

/// Triangle whose only base color image is KTX2, with the extension required
pub fn basisu_only_gltf() -> String {
    triangle_gltf(
        BASE_COLOR_MATERIAL,
        r#"
    "images": [{ "uri": "textures/base.ktx2", "mimeType": "image/ktx2" }],
    "textures": [{ "extensions": { "KHR_texture_basisu": { "source": 0 } } }],
"#,
    )
    .replace(
        r#""extensionsUsed": ["KHR_materials_unlit", "KHR_materials_pbrSpecularGlossiness"],"#,
        r#""extensionsUsed": ["KHR_texture_basisu"], "extensionsRequired": ["KHR_texture_basisu"],"#,
    )
}

/// Triangle whose normal map points past the texture table
pub fn dangling_texture_gltf() -> String {
    triangle_gltf(r#"{ "normalTexture": { "index": 4 } }"#, "")
}

/// Triangle whose POSITION attribute points past the accessor table
pub fn dangling_accessor_gltf() -> String {
    triangle_model_text().replace(r#""POSITION": 0"#, r#""POSITION": 7"#)
}

fn triangle_model_text() -> String {
    triangle_gltf(STANDARD_MATERIAL, "")
}

/// Binary container with the triangle in its BIN chunk, or without one
pub fn triangle_glb(with_bin: bool) -> Vec<u8> {
    let json = TRIANGLE_TEMPLATE
        .replace(r#""uri": "@URI@", "#, "")
        .replace("@MATERIAL@", STANDARD_MATERIAL)
        .replace("@TEXTURES@", "");
    gltf::binary::Glb {
        header: gltf::binary::Header {
            magic: *b"glTF",
            version: 2,
            length: 0,
        },
        json: json.into_bytes().into(),
        bin: with_bin.then(|| triangle_bytes().into()),
    }
    .to_vec()
    .expect("GLB fixture serializes")
}

const DRACO_TEMPLATE: &str = r#"{
    "asset": { "version": "2.0" },
    "extensionsUsed": ["KHR_draco_mesh_compression"],
    "extensionsRequired": ["KHR_draco_mesh_compression"],
    "scenes": [{ "nodes": [0] }],
    "nodes": [{ "name": "Cake", "mesh": 0 }],
    "meshes": [{
        "primitives": [{
            "attributes": { "POSITION": 0 },
            "indices": 1,
            "extensions": {
                "KHR_draco_mesh_compression": { "bufferView": 0, "attributes": { "POSITION": 0 } }
            }
        }]
    }],
    "buffers": [{ "uri": "@URI@", "byteLength": 8 }],
    "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": 8 }],
    "accessors": [
        { "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
        { "componentType": 5123, "count": 3, "type": "SCALAR" }
    ]
}"#;

/// Draco-compressed model with no uncompressed fallback
pub fn draco_gltf() -> String {
    DRACO_TEMPLATE.replace("@URI@", &data_uri(DRACO_PAYLOAD))
}
