//! WebGPU client for the hand-gun shooter
//!
//! Webcam frames go to the page's MediaPipe hand landmarker; the game view is
//! drawn with wgpu 24.0 and the "webgpu" feature, the skeleton preview on a
//! 2D canvas.
//! Note: everything but the instance builder needs the wasm32 target

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod instances;

#[cfg(target_arch = "wasm32")]
mod camera;
#[cfg(target_arch = "wasm32")]
mod capture;
#[cfg(target_arch = "wasm32")]
mod client;
#[cfg(target_arch = "wasm32")]
mod display;
#[cfg(target_arch = "wasm32")]
mod landmarks;
#[cfg(target_arch = "wasm32")]
mod logger;
#[cfg(target_arch = "wasm32")]
mod mesh;
#[cfg(target_arch = "wasm32")]
mod renderer;

#[cfg(target_arch = "wasm32")]
pub use client::*;
