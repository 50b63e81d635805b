//! Snapshot encoding

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use vitalscan_core::{Frame, VitalScanError};

/// Encode a raw RGB snapshot as a JPEG frame at the given quality (1-100)
pub fn encode_jpeg(snapshot: &RgbImage, quality: u8) -> Result<Frame, VitalScanError> {
    let mut payload = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut payload, quality);
    encoder
        .encode_image(snapshot)
        .map_err(|err| VitalScanError::Encoding {
            reason: err.to_string(),
        })?;
    Ok(Frame::new(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_produces_jpeg_magic() {
        let snapshot = RgbImage::from_pixel(8, 8, image::Rgb([120, 80, 40]));
        let frame = encode_jpeg(&snapshot, 80).unwrap();
        assert!(!frame.is_empty());
        assert_eq!(&frame.data()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_lower_quality_does_not_grow_output() {
        let mut snapshot = RgbImage::new(64, 64);
        for (x, y, pixel) in snapshot.enumerate_pixels_mut() {
            *pixel = image::Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8]);
        }
        let high = encode_jpeg(&snapshot, 95).unwrap();
        let low = encode_jpeg(&snapshot, 20).unwrap();
        assert!(low.len() <= high.len());
    }
}
