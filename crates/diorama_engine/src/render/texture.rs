//! Texture descriptors and background image decoding
//!
//! A [`Texture`] describes how an image is sampled. Images referenced by
//! loaded models are only described; images the diorama decodes itself
//! (floor, sky faces) carry a [`TextureHandle`] that a background thread
//! fills in. Until then render hosts sample a placeholder.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetSource, ImageData};

/// Texture wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Clamp coordinates to the edge texel
    #[default]
    ClampToEdge,
    /// Tile the texture
    Repeat,
    /// Tile the texture, mirroring every other repeat
    MirroredRepeat,
}

/// Magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Nearest texel
    Nearest,
    /// Bilinear
    #[default]
    Linear,
}

/// Color space the texel data is encoded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSpace {
    /// sRGB encoded color data
    #[default]
    Srgb,
    /// Linear data (normal maps, roughness maps)
    Linear,
}

/// Container format of the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureEncoding {
    /// PNG/JPEG or any other format decodable on the CPU
    #[default]
    Image,
    /// KTX2 / Basis Universal supercompressed texture
    Ktx2,
}

/// Sampling settings for a texture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureSettings {
    /// Horizontal wrapping
    pub wrap_s: WrapMode,
    /// Vertical wrapping
    pub wrap_t: WrapMode,
    /// How many times the image repeats across the surface
    pub repeat: [f32; 2],
    /// Magnification filter
    pub mag_filter: FilterMode,
    /// Texel color space
    pub color_space: ColorSpace,
    /// Source container
    pub encoding: TextureEncoding,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::default(),
            wrap_t: WrapMode::default(),
            repeat: [1.0, 1.0],
            mag_filter: FilterMode::default(),
            color_space: ColorSpace::default(),
            encoding: TextureEncoding::default(),
        }
    }
}

impl TextureSettings {
    /// Tile in both directions with the given repeat count
    pub fn tiled(repeats: f32) -> Self {
        Self {
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            repeat: [repeats, repeats],
            ..Self::default()
        }
    }

    /// Settings for data textures such as normal maps
    pub fn linear() -> Self {
        Self {
            color_space: ColorSpace::Linear,
            ..Self::default()
        }
    }
}

/// A texture reference attached to a material
#[derive(Debug, Clone)]
pub struct Texture {
    /// Asset key of the source image (path or embedded identifier)
    pub key: String,
    /// Sampling settings
    pub settings: TextureSettings,
    /// Decoded image, when this crate decodes the texture itself
    pub image: Option<TextureHandle>,
}

impl Texture {
    /// Describe a texture without decoding it
    pub fn new(key: impl Into<String>, settings: TextureSettings) -> Self {
        Self {
            key: key.into(),
            settings,
            image: None,
        }
    }

    /// Attach a decode handle
    pub fn with_image(mut self, image: TextureHandle) -> Self {
        self.image = Some(image);
        self
    }

    /// True while a decode handle exists and has not finished successfully
    pub fn is_placeholder(&self) -> bool {
        self.image.as_ref().is_some_and(|handle| !handle.status().is_ready())
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.settings == other.settings
    }
}

/// Six-faced cube texture, faces ordered +X, -X, +Y, -Y, +Z, -Z
#[derive(Debug, Clone, PartialEq)]
pub struct CubeTexture {
    /// The six faces
    pub faces: [Texture; 6],
}

impl CubeTexture {
    /// Number of faces still waiting on their image
    pub fn placeholder_faces(&self) -> usize {
        self.faces.iter().filter(|face| face.is_placeholder()).count()
    }
}

/// Decode progress of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    /// Still decoding
    Pending,
    /// Decoded successfully
    Ready {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Fetch or decode failed; hosts keep the placeholder
    Failed,
}

impl TextureStatus {
    /// Whether the image is available
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

#[derive(Debug)]
enum TextureState {
    Pending,
    Ready(ImageData),
    Failed(String),
}

#[derive(Debug)]
struct TextureSlot {
    state: Mutex<TextureState>,
    settled: Condvar,
}

/// Shared handle to an image decoded in the background
#[derive(Debug, Clone)]
pub struct TextureHandle {
    slot: Arc<TextureSlot>,
}

impl TextureHandle {
    fn pending() -> Self {
        Self {
            slot: Arc::new(TextureSlot {
                state: Mutex::new(TextureState::Pending),
                settled: Condvar::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TextureState> {
        self.slot.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, state: TextureState) {
        *self.lock() = state;
        self.slot.settled.notify_all();
    }

    /// Current decode status
    pub fn status(&self) -> TextureStatus {
        match &*self.lock() {
            TextureState::Pending => TextureStatus::Pending,
            TextureState::Ready(image) => TextureStatus::Ready {
                width: image.width,
                height: image.height,
            },
            TextureState::Failed(_) => TextureStatus::Failed,
        }
    }

    /// Error message if decoding failed
    pub fn failure(&self) -> Option<String> {
        match &*self.lock() {
            TextureState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Run `f` against the decoded pixels, if available
    pub fn with_image<R>(&self, f: impl FnOnce(&ImageData) -> R) -> Option<R> {
        match &*self.lock() {
            TextureState::Ready(image) => Some(f(image)),
            _ => None,
        }
    }

    /// Block until the decode settles or `timeout` elapses
    pub fn wait_timeout(&self, timeout: Duration) -> TextureStatus {
        let guard = self.lock();
        let (guard, _) = self
            .slot
            .settled
            .wait_timeout_while(guard, timeout, |state| matches!(state, TextureState::Pending))
            .unwrap_or_else(PoisonError::into_inner);
        drop(guard);
        self.status()
    }
}

/// Decodes images on background threads
pub struct TextureLoader {
    source: Arc<dyn AssetSource>,
}

impl TextureLoader {
    /// Create a loader reading through `source`
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self { source }
    }

    /// Start decoding `path` and return immediately
    pub fn load(&self, path: &str, settings: TextureSettings) -> Texture {
        let handle = TextureHandle::pending();
        let worker_handle = handle.clone();
        let source = Arc::clone(&self.source);
        let key = path.to_string();

        let spawned = std::thread::Builder::new()
            .name(format!("texture:{key}"))
            .spawn(move || {
                let state = match source.fetch(&key).and_then(|bytes| ImageData::from_bytes(&bytes)) {
                    Ok(image) => {
                        log::debug!("Decoded texture {} ({}x{})", key, image.width, image.height);
                        TextureState::Ready(image)
                    }
                    Err(e) => {
                        log::error!("Texture {} unavailable, keeping placeholder: {}", key, e);
                        TextureState::Failed(e.to_string())
                    }
                };
                worker_handle.settle(state);
            });

        if let Err(e) = spawned {
            log::error!("Could not start texture decode for {}: {}", path, e);
            handle.settle(TextureState::Failed(e.to_string()));
        }

        Texture::new(path, settings).with_image(handle)
    }
}
