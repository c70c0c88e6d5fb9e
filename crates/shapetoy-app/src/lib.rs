//! ShapeToy Application
//!
//! The application shell: configuration, the browser entry point and a
//! headless runner for native builds.

mod config;
pub mod headless;

pub use config::{AppConfig, AppError};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{EditorHandle, start};
