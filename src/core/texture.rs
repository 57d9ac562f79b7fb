//! CPU-side texture decoding: gradient color maps (PNG) and the
//! equirectangular lighting environment (Radiance HDR).

use super::error::ShowcaseError;
use half::f16;
use image::ImageFormat;

/// 8-bit sRGB RGBA pixels, row-major.
#[derive(Clone, Debug)]
pub struct ColorMap {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn decode_color_map(name: &str, bytes: &[u8]) -> Result<ColorMap, ShowcaseError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|source| ShowcaseError::TextureDecode {
            name: name.to_string(),
            source,
        })?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(ColorMap {
        name: name.to_string(),
        width,
        height,
        rgba: img.into_raw(),
    })
}

/// Plain white stand-in used when a gradient fails to load.
pub fn fallback_color_map(name: &str) -> ColorMap {
    ColorMap {
        name: name.to_string(),
        width: 1,
        height: 1,
        rgba: vec![255; 4],
    }
}

#[derive(Clone, Debug)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    /// RGBA, 4 halfs per texel.
    pub texels: Vec<f16>,
}

/// Linear HDR environment with a full box-filtered mip chain.
#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    pub mips: Vec<MipLevel>,
}

impl EnvironmentMap {
    pub fn width(&self) -> u32 {
        self.mips.first().map_or(1, |m| m.width)
    }

    pub fn height(&self) -> u32 {
        self.mips.first().map_or(1, |m| m.height)
    }

    pub fn mip_count(&self) -> u32 {
        self.mips.len() as u32
    }
}

pub fn decode_environment(bytes: &[u8]) -> Result<EnvironmentMap, ShowcaseError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Hdr)
        .map_err(ShowcaseError::EnvironmentDecode)?
        .to_rgba32f();
    let (width, height) = img.dimensions();
    Ok(environment_from_rgba32f(width, height, img.into_raw()))
}

/// Soft studio-like gradient used when no HDR is available.
pub fn neutral_environment() -> EnvironmentMap {
    let (w, h) = (8u32, 4u32);
    let mut texels = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let sky = 1.0 - y as f32 / (h - 1) as f32;
        let v = 0.25 + 0.75 * sky;
        for _ in 0..w {
            texels.extend([v, v, v, 1.0]);
        }
    }
    environment_from_rgba32f(w, h, texels)
}

pub fn environment_from_rgba32f(width: u32, height: u32, rgba: Vec<f32>) -> EnvironmentMap {
    let mut mips = Vec::new();
    let (mut w, mut h, mut level) = (width.max(1), height.max(1), rgba);
    loop {
        mips.push(MipLevel {
            width: w,
            height: h,
            texels: level.iter().map(|&v| f16::from_f32(v)).collect(),
        });
        if w == 1 && h == 1 {
            break;
        }
        let (nw, nh, next) = downsample(w, h, &level);
        w = nw;
        h = nh;
        level = next;
    }
    EnvironmentMap { mips }
}

/// 2x2 box filter; odd edges reuse the last row/column.
pub fn downsample(width: u32, height: u32, rgba: &[f32]) -> (u32, u32, Vec<f32>) {
    let nw = (width / 2).max(1);
    let nh = (height / 2).max(1);
    let mut out = Vec::with_capacity((nw * nh * 4) as usize);
    let at = |x: u32, y: u32, c: usize| {
        let x = x.min(width - 1);
        let y = y.min(height - 1);
        rgba[((y * width + x) * 4) as usize + c]
    };
    for y in 0..nh {
        for x in 0..nw {
            let (sx, sy) = (x * 2, y * 2);
            for c in 0..4 {
                let sum = at(sx, sy, c) + at(sx + 1, sy, c) + at(sx, sy + 1, c) + at(sx + 1, sy + 1, c);
                out.push(sum * 0.25);
            }
        }
    }
    (nw, nh, out)
}
