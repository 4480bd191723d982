//! Source renderers.

mod go;

pub use go::TeraRenderer;
