//! Platform abstraction layer
//!
//! The simulation never touches the browser. On wasm32 this module exposes
//! a JS-facing handle that the host page drives once per animation frame.

#[cfg(target_arch = "wasm32")]
pub mod web;
