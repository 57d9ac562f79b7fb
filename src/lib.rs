//! Scroll-driven WebGPU blob showcase.
//!
//! `core`, `constants` and `input` are target-independent and carry the
//! transition logic and its data. Everything that touches the browser or the
//! GPU only builds for `wasm32`.

pub mod constants;
pub mod core;
pub mod input;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod assets;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod text;
