// Host-side tests for gradient and environment decoding.

use blob_showcase::core::texture::{
    decode_color_map, decode_environment, downsample, environment_from_rgba32f,
    fallback_color_map, neutral_environment,
};
use blob_showcase::core::ShowcaseError;
use image::codecs::hdr::HdrEncoder;
use image::{ImageFormat, Rgb, RgbaImage};
use std::io::Cursor;

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn png_gradient_decodes_to_rgba() {
    let img = RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8 * 100, y as u8 * 200, 7, 255]));
    let map = decode_color_map("cosmic-fusion", &png_bytes(&img)).unwrap();
    assert_eq!(map.name, "cosmic-fusion");
    assert_eq!((map.width, map.height), (3, 2));
    assert_eq!(map.rgba, img.into_raw());
}

#[test]
fn broken_png_reports_its_name() {
    match decode_color_map("purple-rain", b"not a png") {
        Err(ShowcaseError::TextureDecode { name, .. }) => assert_eq!(name, "purple-rain"),
        other => panic!("unexpected {:?}", other.map(|m| m.name)),
    }
}

#[test]
fn fallback_map_is_opaque_white() {
    let map = fallback_color_map("lucky-day");
    assert_eq!(map.name, "lucky-day");
    assert_eq!((map.width, map.height), (1, 1));
    assert_eq!(map.rgba, vec![255, 255, 255, 255]);
}

#[test]
fn mip_chain_halves_down_to_one_texel() {
    let env = environment_from_rgba32f(8, 4, vec![1.0; 8 * 4 * 4]);
    let sizes: Vec<(u32, u32)> = env.mips.iter().map(|m| (m.width, m.height)).collect();
    assert_eq!(sizes, vec![(8, 4), (4, 2), (2, 1), (1, 1)]);
    for m in &env.mips {
        assert_eq!(m.texels.len(), (m.width * m.height * 4) as usize);
    }
    assert_eq!(env.mip_count(), 4);
    assert_eq!((env.width(), env.height()), (8, 4));
}

#[test]
fn odd_sizes_still_reach_one_texel() {
    let env = environment_from_rgba32f(5, 3, vec![0.5; 5 * 3 * 4]);
    let sizes: Vec<(u32, u32)> = env.mips.iter().map(|m| (m.width, m.height)).collect();
    assert_eq!(sizes, vec![(5, 3), (2, 1), (1, 1)]);
    let last = env.mips.last().unwrap();
    assert!((last.texels[0].to_f32() - 0.5).abs() < 1e-3);
}

#[test]
fn downsample_box_filters() {
    #[rustfmt::skip]
    let rgba = vec![
        0.0, 0.0, 0.0, 1.0,   4.0, 0.0, 0.0, 1.0,
        0.0, 8.0, 0.0, 1.0,   0.0, 0.0, 12.0, 1.0,
    ];
    let (w, h, out) = downsample(2, 2, &rgba);
    assert_eq!((w, h), (1, 1));
    assert_eq!(out, vec![1.0, 2.0, 3.0, 1.0]);
}

#[test]
fn neutral_environment_is_brighter_above() {
    let env = neutral_environment();
    let top = &env.mips[0];
    let first_row = top.texels[0].to_f32();
    let last_row = top.texels[((top.height - 1) * top.width * 4) as usize].to_f32();
    assert!(first_row > last_row);
    assert!(env.mip_count() > 1);
}

#[test]
fn hdr_environment_decodes_linear_values() {
    let (w, h) = (4usize, 2usize);
    let pixels = vec![Rgb([2.0f32, 1.0, 0.5]); w * h];
    let mut bytes = Vec::new();
    HdrEncoder::new(&mut bytes).encode(&pixels, w, h).unwrap();

    let env = decode_environment(&bytes).unwrap();
    assert_eq!((env.width(), env.height()), (4, 2));
    let t = &env.mips[0].texels;
    assert!((t[0].to_f32() - 2.0).abs() < 0.05);
    assert!((t[1].to_f32() - 1.0).abs() < 0.05);
    assert!((t[2].to_f32() - 0.5).abs() < 0.05);
    assert_eq!(t[3].to_f32(), 1.0);
}

#[test]
fn broken_hdr_is_an_environment_error() {
    assert!(matches!(
        decode_environment(b"#?RADIANCE\ngarbage"),
        Err(ShowcaseError::EnvironmentDecode(_))
    ));
}
