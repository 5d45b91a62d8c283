//! Turning an [`ExifRecord`] into the text report.

use crate::exif::tags::{self, TAG_MAKE, TAG_MODEL};
use crate::exif::{Category, ExifRecord, TagEntry};

// ANSI color codes
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Printed instead of the listing when the image carries no metadata.
pub const NO_EXIF_MESSAGE: &str = "No EXIF data found in the image.\n\
Note that if the photo is from social media platforms, they often remove \
EXIF data during the upload process for privacy and data compression reasons.";

/// Printed when every tag in the record was filtered out of the listing.
pub const ONLY_UNKNOWN_MESSAGE: &str =
    "Only unrecognized EXIF tags found; set output.show_unknown to list them.";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Bold section headers.
    pub color: bool,
    /// Include the Other section (vendor and unrecognized tags).
    pub show_unknown: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            show_unknown: true,
        }
    }
}

/// Render `record` grouped by category.
///
/// Each category with at least one tag gets an upper-case header followed by
/// one `<label>: <value>` line per tag. Categories without tags are omitted.
///
/// # Example
///
/// ```rust
/// use exif_fetch::exif::ExifRecord;
/// use exif_fetch::render::{render_text, RenderOptions, NO_EXIF_MESSAGE};
///
/// let text = render_text(&ExifRecord::default(), &RenderOptions::default());
/// assert_eq!(text, format!("{NO_EXIF_MESSAGE}\n"));
/// ```
pub fn render_text(record: &ExifRecord, options: &RenderOptions) -> String {
    let mut out = String::new();

    for category in Category::ALL {
        if category == Category::Other && !options.show_unknown {
            continue;
        }
        let lines = category_lines(record, category);
        if lines.is_empty() {
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        let header = category.label().to_uppercase();
        if options.color {
            out.push_str(&format!("{BOLD}{header}{RESET}\n"));
        } else {
            out.push_str(&header);
            out.push('\n');
        }
        for (label, value) in lines {
            if options.color {
                out.push_str(&format!("  {label}{DIM}:{RESET} {value}\n"));
            } else {
                out.push_str(&format!("  {label}: {value}\n"));
            }
        }
    }

    if record.is_empty() {
        out.push_str(NO_EXIF_MESSAGE);
        out.push('\n');
    } else if out.is_empty() {
        out.push_str(ONLY_UNKNOWN_MESSAGE);
        out.push('\n');
    }
    out
}

/// Render `record` as a pretty JSON array of tags.
pub fn render_json(record: &ExifRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

/// `(label, value)` rows for one category, in table order.
fn category_lines(record: &ExifRecord, category: Category) -> Vec<(String, String)> {
    let mut entries: Vec<&TagEntry> = record.in_category(category).collect();
    entries.sort_by_key(|e| (tags::display_rank(e.code()), e.code()));

    let mut lines = Vec::with_capacity(entries.len());

    if category == Category::Camera {
        let make = record.text("Make");
        let model = record.text("Model");
        if let Some(name) = camera_name(make, model) {
            lines.push(("Camera".to_string(), name));
        }
    }

    for entry in entries {
        if category == Category::Camera && matches!(entry.code(), TAG_MAKE | TAG_MODEL) {
            continue;
        }
        lines.push((entry.label().to_string(), entry.display().to_string()));
    }
    lines
}

/// Join make and model, without repeating a make the model already starts with.
pub fn camera_name(make: Option<&str>, model: Option<&str>) -> Option<String> {
    match (make, model) {
        (Some(make), Some(model)) => {
            if model.to_lowercase().starts_with(&make.to_lowercase()) {
                Some(model.to_string())
            } else {
                Some(format!("{make} {model}"))
            }
        }
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}
