//! Image decoding for floor and sky textures

use crate::assets::AssetError;

/// Decoded RGBA image
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::InvalidData(format!("Failed to decode image: {e}")))?;
        
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        
        log::debug!("Decoded image {}x{}", width, height);
        
        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_decodes_to_rgba() {
        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let decoded = ImageData::from_bytes(bytes.get_ref()).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.data.len(), 3 * 2 * 4);
        assert_eq!(&decoded.data[20..24], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            ImageData::from_bytes(b"not an image"),
            Err(AssetError::InvalidData(_))
        ));
    }
}
