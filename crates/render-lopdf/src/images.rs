//! Logo image embedding.
//!
//! JPEG bytes are passed through untouched with a DCTDecode filter;
//! PNG bytes are decoded to raw pixels and re-compressed with
//! FlateDecode. Alpha channels are dropped: logos render against the
//! white page background.

use factura_render_core::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Stream, dictionary};
use std::io::Write;

/// A decoded image ready to become a PDF XObject.
pub struct EmbeddedImage {
    pub stream: Stream,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Builds an image XObject stream from raw logo bytes, detecting the
/// format from the magic number.
pub fn embed(data: &[u8]) -> Result<EmbeddedImage, RenderError> {
    if data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8 {
        embed_jpeg(data)
    } else if data.len() >= 4 && data[..4] == [0x89, 0x50, 0x4E, 0x47] {
        embed_png(data)
    } else {
        Err(RenderError::UnsupportedImage(
            "expected JPEG or PNG magic bytes".to_string(),
        ))
    }
}

fn embed_jpeg(data: &[u8]) -> Result<EmbeddedImage, RenderError> {
    let (width, height, components) = jpeg_dimensions(data)?;
    let color_space = match components {
        1 => "DeviceGray",
        3 => "DeviceRGB",
        n => {
            return Err(RenderError::UnsupportedImage(format!(
                "JPEG with {n} components"
            )));
        }
    };
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Filter" => "DCTDecode",
    };
    Ok(EmbeddedImage {
        stream: Stream::new(dict, data.to_vec()),
        pixel_width: width,
        pixel_height: height,
    })
}

/// Scans for the SOF0-SOF3 marker to extract dimensions and component
/// count; the JPEG payload itself is not decoded.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8), RenderError> {
    let len = data.len();
    let mut i = 2;
    while i + 3 < len {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= len {
                return Err(RenderError::UnsupportedImage("truncated JPEG SOF".into()));
            }
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            return Ok((width, height, data[i + 9]));
        }
        if marker == 0xFF || marker == 0x00 {
            i += 1;
            continue;
        }
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    Err(RenderError::UnsupportedImage("no SOF marker in JPEG".into()))
}

fn embed_png(data: &[u8]) -> Result<EmbeddedImage, RenderError> {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::UnsupportedImage(format!("PNG decode: {e}")))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::UnsupportedImage(format!("PNG frame: {e}")))?;
    buf.truncate(info.buffer_size());

    let (pixels, color_space) = match info.color_type {
        png::ColorType::Rgb => (buf, "DeviceRGB"),
        png::ColorType::Grayscale => (buf, "DeviceGray"),
        png::ColorType::Rgba => {
            let rgb = buf.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect();
            (rgb, "DeviceRGB")
        }
        png::ColorType::GrayscaleAlpha => {
            let gray = buf.chunks_exact(2).map(|px| px[0]).collect();
            (gray, "DeviceGray")
        }
        other => {
            return Err(RenderError::UnsupportedImage(format!(
                "PNG color type {other:?}"
            )));
        }
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&pixels)?;
    let compressed = encoder.finish()?;

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => info.width as i64,
        "Height" => info.height as i64,
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(EmbeddedImage {
        stream: Stream::new(dict, compressed),
        pixel_width: info.width,
        pixel_height: info.height,
    })
}
