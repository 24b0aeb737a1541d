//! `data:` URLs for in-page previews.

use base64::{engine::general_purpose, Engine as _};

use super::OutputFormat;

/// Wrap encoded bytes in a `data:<mime>;base64,<payload>` URL.
pub fn to_data_url(format: OutputFormat, bytes: &[u8]) -> String {
    let payload = general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", format.mime_type(), payload)
}
