//! Read-only renderings of a universe

pub mod plaintext;
pub mod plantuml;

pub use plaintext::{basic_render, RenderOptions};
pub use plantuml::{render_plantuml, PlantUmlOptions};
