#![warn(missing_docs)]
//! Compix - AI photo compositing client.
//!
//! Merges a "guest" subject photo into a "base" scene photo by composing a
//! fixed instruction prompt (plus optional user notes), sending both images
//! to Google's Gemini image model in a single multi-part request, and
//! extracting the merged image from the multi-part response.
//!
//! # Quick Start
//!
//! ```no_run
//! use compix::{CompositeProvider, CompositeRequest, GeminiCompositor, UploadedImage};
//!
//! #[tokio::main]
//! async fn main() -> compix::Result<()> {
//!     let provider = GeminiCompositor::builder().build()?;
//!
//!     let base = UploadedImage::from_bytes(&std::fs::read("couple.jpg")?, "couple.jpg");
//!     let guest = UploadedImage::from_bytes(&std::fs::read("guest.png")?, "guest.png");
//!     let request = CompositeRequest::new(base, guest, "Make it sunset");
//!
//!     let result = provider.generate_composite(&request).await?;
//!     result.save("merged.png")?;
//!     Ok(())
//! }
//! ```

pub mod composite;
mod error;
pub mod prompt;

pub use composite::providers::{GeminiCompositor, GeminiCompositorBuilder};
pub use composite::{
    CompositeProvider, CompositeRequest, CompositeResult, MimeType, ProviderKind, UploadedImage,
};
pub use error::{CompixError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::composite::providers::GeminiCompositor;
    pub use crate::composite::{
        CompositeProvider, CompositeRequest, CompositeResult, UploadedImage,
    };
    pub use crate::error::{CompixError, Result};
}
