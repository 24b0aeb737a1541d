//! Output formats and format negotiation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shape::Shape;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    #[serde(rename = "webp")]
    WebP,
}

/// A format tag that no encoder exists for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported output format: {0}")]
pub struct UnsupportedFormatError(pub String);

impl OutputFormat {
    /// MIME type used for blobs and data URLs.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// Parse an optional format tag, falling back to JPEG when it is unknown.
    pub fn parse_or_default(tag: Option<&str>) -> OutputFormat {
        match tag.map(str::parse::<OutputFormat>) {
            None => OutputFormat::default(),
            Some(Ok(format)) => format,
            Some(Err(err)) => {
                log::warn!("{err}, falling back to JPEG");
                OutputFormat::Jpeg
            }
        }
    }

    /// Pick the format actually encoded for a shape and a requested format.
    ///
    /// WebP is honoured for every shape. Otherwise parallelogram output is
    /// always PNG so its transparent corners survive, and the rest follow the
    /// request (PNG) or default to JPEG.
    pub fn negotiate(shape: Shape, requested: OutputFormat) -> OutputFormat {
        match requested {
            OutputFormat::WebP => OutputFormat::WebP,
            OutputFormat::Png => OutputFormat::Png,
            OutputFormat::Jpeg if shape.requires_alpha() => OutputFormat::Png,
            OutputFormat::Jpeg => OutputFormat::Jpeg,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnsupportedFormatError;

    /// Accepts bare names (`png`), common aliases (`jpg`) and MIME types.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let name = tag.strip_prefix("image/").unwrap_or(&tag);

        match name {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            _ => Err(UnsupportedFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
