use glam::Vec2;

/// Pen positions for glyphs advanced by `advances` plus a fixed
/// `letter_spacing` between neighbours (negative tightens). Returns the
/// per-glyph x offsets and the total line width.
pub fn layout_glyphs(advances: &[f32], letter_spacing: f32) -> (Vec<f32>, f32) {
    let mut offsets = Vec::with_capacity(advances.len());
    let mut pen = 0.0f32;
    for (i, adv) in advances.iter().enumerate() {
        offsets.push(pen);
        pen += adv;
        if i + 1 < advances.len() {
            pen += letter_spacing;
        }
    }
    (offsets, pen.max(0.0))
}

/// World-space quad size for a bitmap rendered at `font_px`, so that one
/// em spans `font_size_world` units.
pub fn label_world_size(bitmap_width: u32, bitmap_height: u32, font_px: f32, font_size_world: f32) -> Vec2 {
    let scale = font_size_world / font_px.max(1.0);
    Vec2::new(bitmap_width as f32 * scale, bitmap_height as f32 * scale)
}
