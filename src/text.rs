//! Label rasterization through an offscreen 2D canvas.

use crate::constants::{LABEL_FONT_FAMILY, LABEL_FONT_PX, LABEL_LETTER_SPACING_EM, LABEL_PADDING_PX};
use crate::core::text_layout::layout_glyphs;
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

/// White glyphs on transparent, straight alpha.
pub struct LabelBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl LabelBitmap {
    pub fn empty() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![0; 4],
        }
    }
}

pub fn rasterize_label(document: &web::Document, text: &str) -> anyhow::Result<LabelBitmap> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{:?}", e))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("get_context: {:?}", e))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("{:?}", e))?;
    let font = format!("{}px {}", LABEL_FONT_PX, LABEL_FONT_FAMILY);

    ctx.set_font(&font);
    let glyphs: Vec<String> = text.chars().map(String::from).collect();
    let advances = glyphs
        .iter()
        .map(|g| ctx.measure_text(g).map(|m| m.width() as f32))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow!("measure_text: {:?}", e))?;
    let (offsets, line_width) = layout_glyphs(&advances, LABEL_LETTER_SPACING_EM * LABEL_FONT_PX);

    let width = (line_width + 2.0 * LABEL_PADDING_PX).ceil().max(1.0) as u32;
    let height = (LABEL_FONT_PX * 1.4 + 2.0 * LABEL_PADDING_PX).ceil() as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    // Resizing resets context state
    ctx.set_font(&font);
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("#ffffff");
    let mid_y = height as f64 / 2.0;
    for (glyph, x) in glyphs.iter().zip(&offsets) {
        ctx.fill_text(glyph, (LABEL_PADDING_PX + x) as f64, mid_y)
            .map_err(|e| anyhow!("fill_text: {:?}", e))?;
    }

    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow!("get_image_data: {:?}", e))?;
    Ok(LabelBitmap {
        width,
        height,
        rgba: data.data().0,
    })
}
