//! Normalization of renderer output to PNG.
//!
//! The renderer answers with SVG for `fmt=svg` but may also serve raster
//! formats. Rasters are decoded and re-encoded; SVG is rasterized at its
//! intrinsic size.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{AppError, Result};

/// Largest raster edge produced from an SVG.
const MAX_DIM: u32 = 16_384;

/// Bytes inspected when sniffing for SVG markup.
const SNIFF_LEN: usize = 4096;

/// Converts any supported image payload to PNG bytes.
pub fn to_png(bytes: &[u8]) -> Result<Vec<u8>> {
    if let Ok(format) = image::guess_format(bytes) {
        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| AppError::decode_failed(format!("{:?}: {}", format, e)))?;
        return encode_png(&img);
    }

    if looks_like_svg(bytes) {
        return rasterize_svg(bytes);
    }

    Err(AppError::decode_failed(format!(
        "unrecognized payload ({} bytes)",
        bytes.len()
    )))
}

/// Returns true if the payload starts like an SVG document.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    String::from_utf8_lossy(head).contains("<svg")
}

fn raster_size(tree: &usvg::Tree) -> Result<(u32, u32)> {
    fn to_px(v: f32) -> Result<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(AppError::decode_failed("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let w = to_px(size.width())?;
    let h = to_px(size.height())?;

    if w > MAX_DIM || h > MAX_DIM {
        return Err(AppError::decode_failed(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    Ok((w, h))
}

fn rasterize_svg(bytes: &[u8]) -> Result<Vec<u8>> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| AppError::decode_failed(format!("invalid svg: {}", e)))?;
    let (width, height) = raster_size(&tree)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AppError::decode_failed("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha; PNG wants straight alpha.
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let img = RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| AppError::decode_failed("svg pixel buffer has wrong length"))?;
    encode_png(&DynamicImage::ImageRgba8(img))
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| AppError::decode_failed(format!("png encoding failed: {}", e)))?;
    Ok(out.into_inner())
}
