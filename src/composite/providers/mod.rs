//! Composite providers.

mod gemini;

pub use gemini::{GeminiCompositor, GeminiCompositorBuilder};
