// lumen_sim/src/simulation/core/raster_import.rs

//! Conversion of a decoded Bevy `Image` into the core's `RasterBuffer`.

use bevy::prelude::Image;
use bevy::render::render_resource::TextureFormat;
use lumen_core::prelude::{RasterBuffer, RasterError};

/// Copies the pixels of `image` into a `RasterBuffer`.
///
/// Bevy's PNG loader expands RGB and gray images to RGBA8, so only the two
/// RGBA8 formats are accepted. The sRGB flag only affects how the GPU samples
/// the texture; the stored bytes are the file's encoded values either way,
/// which is what the brightness sensor expects.
pub fn raster_from_image(image: &Image) -> Result<RasterBuffer, RasterError> {
    match image.texture_descriptor.format {
        TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm => {}
        other => return Err(RasterError::UnsupportedFormat(format!("{other:?}"))),
    }
    let data = image.data.as_ref().ok_or(RasterError::MissingData)?;
    RasterBuffer::from_rgba8(image.width(), image.height(), data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::render::render_resource::{Extent3d, TextureDimension};

    fn image(width: u32, height: u32, format: TextureFormat, data: Vec<u8>) -> Image {
        Image::new(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            data,
            format,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn rgba8_images_convert_pixel_for_pixel() {
        let data: Vec<u8> = (0..2 * 3 * 4).map(|i| i as u8).collect();
        let img = image(2, 3, TextureFormat::Rgba8UnormSrgb, data.clone());
        let raster = raster_from_image(&img).unwrap();
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.as_bytes(), data.as_slice());
        assert_eq!(raster.pixel(1, 2), Some([20, 21, 22, 23]));
    }

    #[test]
    fn other_formats_are_rejected() {
        let img = image(2, 2, TextureFormat::R8Unorm, vec![0; 4]);
        assert!(matches!(
            raster_from_image(&img),
            Err(RasterError::UnsupportedFormat(_))
        ));
    }
}
