use wasm_bindgen::prelude::*;
mod api;
mod error;
pub mod interop;

pub use api::{palette, set_panic_hook};

#[wasm_bindgen]
pub struct MarkerBoard { pub(crate) inner: dotmap::MapApp }

impl MarkerBoard {
    pub fn rs_new(config: dotmap::MapConfig) -> MarkerBoard {
        MarkerBoard { inner: dotmap::MapApp::with_clock(config, Box::new(interop::JsClock)) }
    }
    pub fn rs_revision(&self) -> u64 { self.inner.revision() }
}
