use crate::core::KEY_SCROLL_DELTA;

/// Wheel-equivalent delta for navigation keys; positive moves forward.
#[inline]
pub fn scroll_delta_for_key(key: &str) -> Option<f64> {
    match key {
        "ArrowDown" | "ArrowRight" | "PageDown" => Some(KEY_SCROLL_DELTA),
        "ArrowUp" | "ArrowLeft" | "PageUp" => Some(-KEY_SCROLL_DELTA),
        _ => None,
    }
}

/// Normalize a wheel delta reported in lines (mode 1) or pages (mode 2) to
/// pixels so the scroll threshold means the same thing on every device.
#[inline]
pub fn wheel_delta_px(delta: f64, delta_mode: u32, page_height_px: f64) -> f64 {
    match delta_mode {
        1 => delta * 16.0,
        2 => delta * page_height_px,
        _ => delta,
    }
}
