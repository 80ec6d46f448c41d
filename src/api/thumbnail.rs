use image::DynamicImage;

use crate::api::{ApiClientError, WikiClient};

impl WikiClient {
    /// Download and decode a thumbnail image.
    pub async fn fetch_thumbnail(&self, url: &str) -> Result<DynamicImage, ApiClientError> {
        tracing::debug!(%url, "fetching thumbnail");
        let bytes = self.get_bytes(url).await?;
        decode_thumbnail(&bytes)
    }
}

/// Decode raster bytes, guessing the format from their content.
pub fn decode_thumbnail(bytes: &[u8]) -> Result<DynamicImage, ApiClientError> {
    Ok(image::load_from_memory(bytes)?)
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([200, 40, 10]),
    ));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("png encodes");
    out.into_inner()
}
