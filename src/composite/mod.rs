//! Composite request module.

mod provider;
pub mod providers;
mod types;

pub use provider::{CompositeProvider, ProviderKind};
pub use types::{CompositeRequest, CompositeResult, MimeType, UploadedImage};
