//! Animated particle background for a single-page site, plus the small
//! scroll-spy and theme helpers the page navigation uses.
//!
//! The simulation, the frame-loop lifecycle and the helpers are plain Rust and
//! run anywhere; the canvas, `requestAnimationFrame` and DOM glue is only built
//! for WebAssembly.

pub mod background;
pub mod config;
pub mod field;
pub mod particle;
pub mod scheduler;
pub mod scroll_spy;
pub mod surface;
pub mod theme;
pub mod viewport;

#[cfg(target_family = "wasm")]
pub mod bindings;
#[cfg(target_family = "wasm")]
pub mod browser;
#[cfg(target_family = "wasm")]
pub mod canvas;

#[cfg(target_family = "wasm")]
mod wasm_entry {
    use std::panic;

    use log::{info, Level};
    use wasm_bindgen::prelude::*;

    #[cfg(debug_assertions)]
    const LOG_LEVEL: Level = Level::Debug;

    #[cfg(not(debug_assertions))]
    const LOG_LEVEL: Level = Level::Info;

    #[wasm_bindgen(start)]
    pub fn main() {
        panic::set_hook(Box::new(console_error_panic_hook::hook));
        console_log::init_with_level(LOG_LEVEL).expect("could not initialize logger");
        info!("Wasm successfully initialized!");
    }
}
