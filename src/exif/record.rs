use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Display group a tag belongs to. Variant order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Camera,
    Exposure,
    Timestamps,
    Gps,
    Image,
    Thumbnail,
    /// Vendor-specific and unrecognized tags.
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Camera,
        Category::Exposure,
        Category::Timestamps,
        Category::Gps,
        Category::Image,
        Category::Thumbnail,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Exposure => "Exposure",
            Self::Timestamps => "Timestamps",
            Self::Gps => "GPS",
            Self::Image => "Image",
            Self::Thumbnail => "Thumbnail",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Rational { numerator: i64, denominator: i64 },
    /// Signed decimal degrees.
    Coordinate(f64),
    Binary(Vec<u8>),
}

impl TagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value, if the tag holds one. Zero-denominator rationals have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Rational {
                numerator,
                denominator,
            } if *denominator != 0 => Some(*numerator as f64 / *denominator as f64),
            Self::Coordinate(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Rational {
                numerator,
                denominator,
            } => match self.as_f64() {
                Some(_) if *denominator == 1 => write!(f, "{numerator}"),
                Some(v) => f.write_str(&trim_decimal(v, 4)),
                None => write!(f, "{numerator}/{denominator}"),
            },
            Self::Coordinate(c) => write!(f, "{c:.6}"),
            Self::Binary(b) => write!(f, "({} bytes)", b.len()),
        }
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Rational { .. } => match self.as_f64() {
                Some(v) => serializer.serialize_f64(v),
                None => serializer.serialize_none(),
            },
            Self::Coordinate(c) => serializer.serialize_f64(*c),
            Self::Binary(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

/// Format `v` with at most `places` decimals, dropping trailing zeros.
pub(crate) fn trim_decimal(v: f64, places: usize) -> String {
    let s = format!("{v:.places$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// One decoded tag: key, code, human label, group, raw value and its rendering.
#[derive(Debug, Clone, Serialize)]
pub struct TagEntry {
    key: String,
    #[serde(rename = "tag")]
    code: u16,
    label: String,
    category: Category,
    value: TagValue,
    #[serde(skip)]
    display: String,
}

impl TagEntry {
    pub(crate) fn new(
        key: impl Into<String>,
        code: u16,
        label: impl Into<String>,
        category: Category,
        value: TagValue,
        display: String,
    ) -> Self {
        Self {
            key: key.into(),
            code,
            label: label.into(),
            category,
            value,
            display,
        }
    }

    /// Tag name, e.g. `Make`, `GPSLatitude`, `ThumbnailCompression`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Human-readable label, e.g. `Exposure time`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn value(&self) -> &TagValue {
        &self.value
    }

    /// The value formatted for display, with units where the tag has them.
    pub fn display(&self) -> &str {
        &self.display
    }
}

/// All tags decoded from one image, in the order they were encountered.
///
/// Keys are unique. A record with no entries means the image carried no
/// metadata, which is not an error.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ExifRecord {
    entries: Vec<TagEntry>,
}

impl ExifRecord {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&TagEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Shorthand for the text value of `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|e| e.value.as_str())
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Categories with at least one entry, in output order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.entries.iter().any(|e| e.category == *c))
            .collect()
    }
}

/// Accumulates entries while parsing; the first entry for a key wins.
#[derive(Debug, Default)]
pub(crate) struct RecordBuilder {
    entries: Vec<TagEntry>,
    seen: HashSet<String>,
}

impl RecordBuilder {
    /// Returns `false` if the key was already present.
    pub(crate) fn push(&mut self, entry: TagEntry) -> bool {
        if !self.seen.insert(entry.key.clone()) {
            log::debug!("Duplicate tag {} ignored", entry.key);
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub(crate) fn build(self) -> ExifRecord {
        ExifRecord {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_entry(key: &str, category: Category, value: &str) -> TagEntry {
        TagEntry::new(
            key,
            0,
            key,
            category,
            TagValue::Text(value.into()),
            value.into(),
        )
    }

    // ── TagValue ─────────────────────────────────────────────────────

    #[test]
    fn rational_display() {
        let whole = TagValue::Rational { numerator: 400, denominator: 1 };
        assert_eq!(whole.to_string(), "400");
        let frac = TagValue::Rational { numerator: 28, denominator: 10 };
        assert_eq!(frac.to_string(), "2.8");
        let broken = TagValue::Rational { numerator: 5, denominator: 0 };
        assert_eq!(broken.to_string(), "5/0");
        assert_eq!(broken.as_f64(), None);
    }

    #[test]
    fn coordinate_and_binary_display() {
        assert_eq!(TagValue::Coordinate(-73.9856667).to_string(), "-73.985667");
        assert_eq!(TagValue::Binary(vec![0; 42]).to_string(), "(42 bytes)");
    }

    #[test]
    fn value_serializes_as_plain_json() {
        let json = serde_json::to_string(&TagValue::Rational { numerator: 1, denominator: 4 }).unwrap();
        assert_eq!(json, "0.25");
        let json = serde_json::to_string(&TagValue::Text("Canon".into())).unwrap();
        assert_eq!(json, "\"Canon\"");
    }

    #[test]
    fn trim_decimal_drops_zeros() {
        assert_eq!(trim_decimal(50.0, 2), "50");
        assert_eq!(trim_decimal(2.80, 2), "2.8");
        assert_eq!(trim_decimal(0.125, 4), "0.125");
    }

    // ── ExifRecord ───────────────────────────────────────────────────

    #[test]
    fn first_key_wins() {
        let mut builder = RecordBuilder::default();
        assert!(builder.push(text_entry("Make", Category::Camera, "Canon")));
        assert!(!builder.push(text_entry("Make", Category::Camera, "Nikon")));
        let record = builder.build();
        assert_eq!(record.len(), 1);
        assert_eq!(record.text("Make"), Some("Canon"));
    }

    #[test]
    fn empty_record() {
        let record = RecordBuilder::default().build();
        assert!(record.is_empty());
        assert!(record.categories().is_empty());
        assert!(record.get("Make").is_none());
    }

    #[test]
    fn categories_in_output_order() {
        let mut builder = RecordBuilder::default();
        builder.push(text_entry("GPSMapDatum", Category::Gps, "WGS-84"));
        builder.push(text_entry("Model", Category::Camera, "EOS 80D"));
        let record = builder.build();
        assert_eq!(record.categories(), vec![Category::Camera, Category::Gps]);
        assert_eq!(record.in_category(Category::Gps).count(), 1);
    }

    #[test]
    fn record_serializes_as_array() {
        let mut builder = RecordBuilder::default();
        builder.push(text_entry("Make", Category::Camera, "Canon"));
        let json = serde_json::to_value(builder.build()).unwrap();
        assert_eq!(json[0]["key"], "Make");
        assert_eq!(json[0]["category"], "camera");
        assert_eq!(json[0]["value"], "Canon");
        assert_eq!(json[0]["tag"], 0x010F);
        assert!(json[0].get("display").is_none());
    }
}
