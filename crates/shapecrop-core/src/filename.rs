//! Download filenames derived from the uploaded file's name.

use crate::encode::OutputFormat;
use crate::shape::Shape;

/// Stem used when the original name has nothing left after stripping.
const FALLBACK_STEM: &str = "image";

/// Build the download filename for a render of `original` in `shape`.
///
/// The last extension of `original` is replaced: `photo.final.jpg` becomes
/// `photo.final.jpeg`, or `photo.final.png` for parallelogram crops. Dotfiles
/// such as `.hidden` keep their whole name as the stem.
pub fn download_filename(original: &str, shape: Shape) -> String {
    let ext = if shape.requires_alpha() {
        OutputFormat::Png.extension()
    } else {
        OutputFormat::Jpeg.extension()
    };

    format!("{}.{ext}", file_stem(original))
}

fn file_stem(name: &str) -> &str {
    let name = name.trim();
    let stem = match name.rfind('.') {
        Some(dot) if dot > 0 && !name[dot..].contains(['/', '\\']) => &name[..dot],
        _ => name,
    };

    if stem.is_empty() {
        FALLBACK_STEM
    } else {
        stem
    }
}
