//! ShapeToy Render Library
//!
//! Turns canvas snapshots into draw lists and executes them on a backend.
//! Vello is the default backend; the browser build also draws straight onto
//! a 2D canvas context.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

#[cfg(target_arch = "wasm32")]
mod canvas2d;

pub use renderer::{
    DrawCommand, RecordingRenderer, RenderContext, RenderResult, RenderStyle, Renderer, RendererError,
    scene_commands,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dRenderer;
