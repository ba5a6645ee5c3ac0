use anyhow::Result;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::image_buf::ImageBuf;

/// Axis-aligned crop rectangle in percent of the source dimensions.
///
/// The fields are defined-but-unchecked: callers may hand in regions that
/// extend past the image (`x + width > 100`); the extraction saturates at
/// the image bounds instead of validating.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRegion {
    /// The full frame; cropping with this returns the source unchanged.
    pub const FULL: CropRegion = CropRegion {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };
}

/// Target pixel dimensions for a resize, 1..4000 per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResizeSpec {
    pub width: u32,
    pub height: u32,
    pub maintain_aspect_ratio: bool,
}

/// Extract the crop rectangle verbatim, no resampling.
pub fn crop(input: &ImageBuf, region: &CropRegion) -> Result<ImageBuf> {
    if *region == CropRegion::FULL {
        return Ok(input.clone());
    }

    let src_x = ((region.x / 100.0 * input.width as f32).max(0.0) as u32)
        .min(input.width.saturating_sub(1));
    let src_y = ((region.y / 100.0 * input.height as f32).max(0.0) as u32)
        .min(input.height.saturating_sub(1));
    let dst_w = (region.width / 100.0 * input.width as f32).max(1.0) as u32;
    let dst_h = (region.height / 100.0 * input.height as f32).max(1.0) as u32;
    // Saturate out-of-bounds regions at the image edge.
    let dst_w = dst_w.min(input.width - src_x).max(1);
    let dst_h = dst_h.min(input.height - src_y).max(1);

    debug!(src_x, src_y, dst_w, dst_h, "cropping");

    let mut data = Vec::with_capacity((dst_w * dst_h * 3) as usize);
    for row in src_y..(src_y + dst_h) {
        let row_start = ((row * input.width + src_x) * 3) as usize;
        let row_end = row_start + (dst_w * 3) as usize;
        data.extend_from_slice(&input.data[row_start..row_end]);
    }

    ImageBuf::from_data(dst_w, dst_h, data)
}

/// Effective output dimensions for a resize.
///
/// With the aspect lock on, one requested dimension is discarded: if the
/// requested box is wider than the source aspect, width is derived from
/// height, otherwise height is derived from width.
pub fn effective_dimensions(src_w: u32, src_h: u32, spec: &ResizeSpec) -> (u32, u32) {
    if !spec.maintain_aspect_ratio || src_w == 0 || src_h == 0 {
        return (spec.width.max(1), spec.height.max(1));
    }

    let aspect = src_w as f32 / src_h as f32;
    let (mut w, mut h) = (spec.width as f32, spec.height as f32);
    if w / h > aspect {
        w = h * aspect;
    } else {
        h = w / aspect;
    }
    ((w.round().max(1.0)) as u32, (h.round().max(1.0)) as u32)
}

/// Scale to the spec's effective dimensions with Lanczos3 resampling.
pub fn resize(input: &ImageBuf, spec: &ResizeSpec) -> Result<ImageBuf> {
    let (w, h) = effective_dimensions(input.width, input.height, spec);
    if w == input.width && h == input.height {
        return Ok(input.clone());
    }

    debug!(from_w = input.width, from_h = input.height, w, h, "resizing");

    let img = input.to_rgb_image()?;
    let resized = image::imageops::resize(&img, w, h, FilterType::Lanczos3);
    Ok(ImageBuf::from_rgb_image(resized))
}
