//! Binary-to-text encoding of documents as RFC 2397 `data:` URIs.
//!
//! ```text
//! bytes + "application/pdf" → data:application/pdf;base64,JVBERg==
//! ```
//!
//! The whole input is encoded in one pass into a buffer sized up front, so a
//! payload costs exactly one allocation of its final length.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AcquireError, Result};

/// Media type used for every document this crate acquires.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A self-contained `data:` URI embedding a document and its media type.
///
/// Immutable once built. Clones share the underlying text.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPayload(Arc<str>);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Declared media type, e.g. `application/pdf`.
    pub fn media_type(&self) -> &str {
        self.0[SCHEME.len()..]
            .split_once(BASE64_MARKER)
            .map_or("", |(media_type, _)| media_type)
    }

    /// Length of the URI text in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Payloads run to tens of megabytes; keep them out of debug output.
impl fmt::Debug for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedPayload")
            .field("media_type", &self.media_type())
            .field("len", &self.len())
            .finish()
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for EncodedPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Encode `bytes` as a `data:<media_type>;base64,...` URI.
///
/// Deterministic: identical input always yields identical output.
pub fn encode(bytes: &[u8], media_type: &str) -> Result<EncodedPayload> {
    validate_media_type(media_type)?;

    let encoded_len = base64::encoded_len(bytes.len(), true)
        .ok_or_else(|| AcquireError::Encoding(format!("payload of {} bytes is too large", bytes.len())))?;

    let mut uri = String::with_capacity(SCHEME.len() + media_type.len() + BASE64_MARKER.len() + encoded_len);
    uri.push_str(SCHEME);
    uri.push_str(media_type);
    uri.push_str(BASE64_MARKER);
    STANDARD.encode_string(bytes, &mut uri);

    Ok(EncodedPayload(uri.into()))
}

/// Inverse of [`encode`]: returns the declared media type and the raw bytes.
pub fn decode(payload: &str) -> Result<(String, Vec<u8>)> {
    let rest = payload
        .strip_prefix(SCHEME)
        .ok_or_else(|| AcquireError::Encoding("missing data: scheme".to_string()))?;
    let (media_type, data) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| AcquireError::Encoding("payload is not base64-encoded".to_string()))?;
    validate_media_type(media_type)?;

    let bytes = STANDARD
        .decode(data)
        .map_err(|e| AcquireError::Encoding(e.to_string()))?;
    Ok((media_type.to_string(), bytes))
}

fn validate_media_type(media_type: &str) -> Result<()> {
    let Some((kind, subtype)) = media_type.split_once('/') else {
        return Err(AcquireError::Encoding(format!("invalid media type {media_type:?}")));
    };
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_graphic() && !matches!(c, ',' | ';' | '/'))
    };
    if valid_part(kind) && valid_part(subtype) {
        Ok(())
    } else {
        Err(AcquireError::Encoding(format!("invalid media type {media_type:?}")))
    }
}
