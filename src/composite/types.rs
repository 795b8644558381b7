//! Core types for composite requests.

use crate::error::{CompixError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Content types accepted for uploaded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeType {
    /// PNG, also the fallback for unknown extensions.
    #[default]
    Png,
    /// JPEG.
    Jpeg,
    /// WebP.
    WebP,
}

impl MimeType {
    /// Returns the MIME string for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Infers the declared content type from a file name's extension.
    ///
    /// Total and case-insensitive; unknown or missing extensions fall back to
    /// PNG rather than failing. This is a naming policy, not byte sniffing:
    /// downstream display trusts the tag, so the fallback must stay PNG.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("png") => Self::Png,
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            Some("webp") => Self::WebP,
            _ => Self::Png,
        }
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An image supplied by the user, held as the intake layer delivers it:
/// a data-URL-encoded payload plus the original file name.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Data URL (or bare base64) contents of the file.
    pub data_url: String,
    /// Original file name, used for content-type inference.
    pub file_name: String,
}

impl UploadedImage {
    /// Creates an uploaded image from a data URL and its file name.
    pub fn new(data_url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
            file_name: file_name.into(),
        }
    }

    /// Creates an uploaded image from raw bytes, encoding them as a data URL
    /// tagged with the content type inferred from the file name.
    pub fn from_bytes(bytes: &[u8], file_name: impl Into<String>) -> Self {
        use base64::Engine;

        let file_name = file_name.into();
        let mime = MimeType::from_file_name(&file_name);
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data_url: format!("data:{};base64,{}", mime.as_str(), payload),
            file_name,
        }
    }

    /// Returns the declared content type, inferred from the file name.
    pub fn mime_type(&self) -> MimeType {
        MimeType::from_file_name(&self.file_name)
    }

    /// Returns the base64 payload with any `data:...;base64,` prefix removed.
    /// A string without the prefix is passed through unchanged.
    pub fn base64_payload(&self) -> &str {
        match self.data_url.find(";base64,") {
            Some(pos) => &self.data_url[pos + 8..],
            None => &self.data_url,
        }
    }
}

/// One user-initiated attempt to merge a guest photo into a base photo.
/// Both images are present by construction.
#[derive(Debug, Clone)]
pub struct CompositeRequest {
    /// The scene the guest is merged into.
    pub base: UploadedImage,
    /// The subject being merged in.
    pub guest: UploadedImage,
    /// Optional free-text instructions, possibly empty.
    pub notes: String,
}

impl CompositeRequest {
    /// Creates a request from two present images.
    pub fn new(base: UploadedImage, guest: UploadedImage, notes: impl Into<String>) -> Self {
        Self {
            base,
            guest,
            notes: notes.into(),
        }
    }

    /// Submission-time validation for callers holding optional slots: both
    /// images must be present before a request exists at all.
    pub fn from_parts(
        base: Option<UploadedImage>,
        guest: Option<UploadedImage>,
        notes: impl Into<String>,
    ) -> Result<Self> {
        match (base, guest) {
            (Some(base), Some(guest)) => Ok(Self::new(base, guest, notes)),
            _ => Err(CompixError::Validation(
                "please provide both a base image and a guest image".into(),
            )),
        }
    }
}

/// A successful composite: the merged image as a data URL plus the exact
/// prompt that produced it. Both fields are always populated; an absent image
/// becomes an error before a result is ever returned.
#[derive(Debug, Clone)]
#[must_use = "composite result should be saved or displayed"]
pub struct CompositeResult {
    /// Merged image as a `data:{mime};base64,{payload}` URL.
    pub image: String,
    /// The full instruction prompt used for this generation.
    pub prompt_used: String,
}

impl CompositeResult {
    /// Decodes the image data URL back into raw bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        use base64::Engine;

        let payload = match self.image.find(";base64,") {
            Some(pos) => &self.image[pos + 8..],
            None => &self.image,
        };
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| CompixError::Decode(e.to_string()))
    }

    /// Saves the decoded image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.decode_bytes()?)?;
        Ok(())
    }
}
