//! Interaction layer for a single-page portfolio: section activation on
//! scroll, the slide-out navigation menu, the PDF preview modal and the
//! loading-screen hand-off.
//!
//! The state machines are plain Rust and run anywhere; the browser wiring in
//! the `wasm` module is only compiled for wasm32.

pub mod config;
pub mod ease;
pub mod error;
pub mod glitch;
pub mod hover;
pub mod loader;
pub mod menu;
pub mod modal;
pub mod observer;
pub mod page;
pub mod scroll_lock;
pub mod sections;
pub mod text;
pub mod tween;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod background;
    mod dom;
    mod driver;
    mod wire;

    pub use wire::{mount, Mounted};

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        mount(&document)?.keep();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount, Mounted};
