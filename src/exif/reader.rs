use img_parts::png::Png;
use img_parts::webp::WebP;
use img_parts::{Bytes, ImageEXIF};
use nom_exif::*;
use std::io::Cursor;

use super::gps::latlng_to_decimal;
use super::RecordBuilder;
use super::record::{Category, ExifRecord, TagEntry, TagValue};
use super::tags::{self, Unit};
use crate::container::ContainerKind;
use crate::fetch::ImageBytes;

/// IFD1 describes the embedded thumbnail.
const THUMBNAIL_IFD: usize = 1;

/// nom-exif asks for more input past the last segment; short blocks are zero-padded to this.
const MIN_BLOCK_LEN: usize = 1024;

/// Charset prefixes of an EXIF `UserComment`.
const COMMENT_PREFIXES: &[&[u8; 8]] = &[b"ASCII\0\0\0", b"UNICODE\0", b"JIS\0\0\0\0\0", b"\0\0\0\0\0\0\0\0"];

/// Decode the EXIF metadata embedded in an image.
///
/// Never fails: a container without a metadata segment, or a segment that
/// cannot be parsed, yields an empty record.
pub fn read_exif(image: &ImageBytes) -> ExifRecord {
    let kind = image.kind();

    let mut block = if kind.is_native_exif() {
        image.as_slice().to_vec()
    } else if kind.is_chunked_exif() {
        match chunk_exif(kind, image.as_slice()) {
            Some(tiff) => tiff,
            None => {
                log::debug!("No EXIF chunk in {} image", kind.mime_type());
                return ExifRecord::default();
            }
        }
    } else {
        log::debug!("{} images carry no EXIF", kind.mime_type());
        return ExifRecord::default();
    };

    // Trailing zeros are ignored by JPEG and TIFF readers, but not inside ISO-BMFF boxes
    if block.len() < MIN_BLOCK_LEN && !matches!(kind, ContainerKind::Heif | ContainerKind::Avif) {
        block.resize(MIN_BLOCK_LEN, 0);
    }

    let iter = match parse_block(block) {
        Some(iter) => iter,
        None => return ExifRecord::default(),
    };

    // Parse GPS info before walking the entries (iteration consumes the iterator)
    let gps_info = iter.parse_gps_info().ok().flatten();

    let mut builder = RecordBuilder::default();
    let mut position = GpsParts::default();

    for entry in iter {
        let code = entry.tag_code();
        let ifd = entry.ifd_index();

        if tags::is_pointer(code) {
            continue;
        }
        // Position tags are folded into signed decimal entries below.
        // Interop IFD codes 1-2 collide with these and fail the shape check in `absorb`.
        if ifd != THUMBNAIL_IFD && is_decoded_position_tag(code) {
            if let Some(value) = entry.get_value() {
                position.absorb(code, value);
            }
            continue;
        }

        let value = match entry.get_value() {
            Some(v) => match convert_value(code, v) {
                Some(value) => value,
                None => continue,
            },
            None => {
                log::debug!("Skipping tag 0x{code:04X}: value could not be decoded");
                continue;
            }
        };

        builder.push(make_entry(ifd, code, entry.tag(), value));
    }

    push_position(&mut builder, gps_info.as_ref(), &position);

    let record = builder.build();
    log::debug!("Decoded {} EXIF tags", record.len());
    record
}

/// Pull the TIFF block out of a PNG `eXIf` or WebP `EXIF` chunk.
fn chunk_exif(kind: ContainerKind, data: &[u8]) -> Option<Vec<u8>> {
    let bytes = Bytes::copy_from_slice(data);
    let exif = match kind {
        ContainerKind::Png => Png::from_bytes(bytes).ok()?.exif(),
        ContainerKind::WebP => WebP::from_bytes(bytes).ok()?.exif(),
        _ => None,
    }?;
    // Some writers keep the JPEG APP1 header
    let tiff = exif.strip_prefix(b"Exif\0\0").unwrap_or(&exif[..]);
    Some(tiff.to_vec())
}

fn parse_block(block: Vec<u8>) -> Option<ExifIter> {
    let mut parser = MediaParser::new();
    let ms = match MediaSource::seekable(Cursor::new(block)) {
        Ok(ms) => ms,
        Err(e) => {
            log::debug!("Metadata container not recognized: {e}");
            return None;
        }
    };

    if !ms.has_exif() {
        log::debug!("No EXIF segment found");
        return None;
    }

    match parser.parse(ms) {
        Ok(iter) => Some(iter),
        Err(e) => {
            log::warn!("EXIF segment present but unreadable: {e}");
            None
        }
    }
}

fn is_decoded_position_tag(code: u16) -> bool {
    matches!(code, 0x0001..=0x0006)
}

/// Name, label and group for a raw entry.
fn make_entry(ifd: usize, code: u16, known: Option<ExifTag>, value: TagValue) -> TagEntry {
    let def = tags::lookup(code);
    let unit = def.map(|d| d.unit).unwrap_or(Unit::Plain);
    let display = tags::format_value(code, unit, &value);

    let name = match (def, known) {
        (Some(d), _) => d.name.to_string(),
        (None, Some(tag)) => format!("{tag:?}"),
        (None, None) => format!("Tag 0x{code:04X}"),
    };

    if ifd == THUMBNAIL_IFD {
        let label = def.map(|d| d.label).unwrap_or(name.as_str()).to_string();
        return TagEntry::new(
            format!("Thumbnail{name}"),
            code,
            label,
            Category::Thumbnail,
            value,
            display,
        );
    }

    match def {
        Some(d) => TagEntry::new(name, code, d.label, d.category, value, display),
        None => TagEntry::new(name.clone(), code, name, Category::Other, value, display),
    }
}

/// Raw position components collected from the GPS IFD.
#[derive(Debug, Default)]
struct GpsParts {
    latitude_ref: Option<char>,
    latitude: Option<EntryValue>,
    longitude_ref: Option<char>,
    longitude: Option<EntryValue>,
    altitude_ref: Option<u8>,
    altitude: Option<URational>,
}

impl GpsParts {
    /// Keep `value` if it has the shape of GPS tag `code`.
    fn absorb(&mut self, code: u16, value: &EntryValue) {
        match (code, value) {
            (0x0001, EntryValue::Text(s)) => {
                self.latitude_ref = hemisphere(s, ['N', 'S']).or(self.latitude_ref)
            }
            (0x0003, EntryValue::Text(s)) => {
                self.longitude_ref = hemisphere(s, ['E', 'W']).or(self.longitude_ref)
            }
            (0x0002, EntryValue::URationalArray(_) | EntryValue::IRationalArray(_)) => {
                self.latitude = Some(value.clone())
            }
            (0x0004, EntryValue::URationalArray(_) | EntryValue::IRationalArray(_)) => {
                self.longitude = Some(value.clone())
            }
            (0x0005, EntryValue::U8(n)) => self.altitude_ref = Some(*n),
            (0x0006, EntryValue::URational(r)) => self.altitude = Some(*r),
            (0x0006, EntryValue::URationalArray(v)) => self.altitude = v.first().copied(),
            _ => log::debug!("Ignoring tag 0x{code:04X}: not a GPS position value"),
        }
    }
}

fn hemisphere(s: &str, allowed: [char; 2]) -> Option<char> {
    let c = s.trim_matches(|c: char| c == '\0' || c.is_whitespace()).chars().next()?;
    allowed.contains(&c.to_ascii_uppercase()).then_some(c)
}

fn push_position(builder: &mut RecordBuilder, gps: Option<&GPSInfo>, parts: &GpsParts) {
    let decoded_lat = gps.and_then(|g| latlng_to_decimal(&g.latitude, g.latitude_ref));
    let decoded_lon = gps.and_then(|g| latlng_to_decimal(&g.longitude, g.longitude_ref));

    if let Some(raw) = &parts.latitude {
        push_coordinate(builder, tags::TAG_GPS_LATITUDE, decoded_lat, raw, parts.latitude_ref);
    }
    if let Some(raw) = &parts.longitude {
        push_coordinate(builder, tags::TAG_GPS_LONGITUDE, decoded_lon, raw, parts.longitude_ref);
    }

    if let Some(altitude) = parts.altitude.filter(|r| r.1 != 0) {
        let sign = if parts.altitude_ref == Some(1) { -1 } else { 1 };
        let value = TagValue::Rational {
            numerator: sign * altitude.0 as i64,
            denominator: altitude.1 as i64,
        };
        if let Some(def) = tags::lookup(tags::TAG_GPS_ALTITUDE) {
            let display = tags::format_value(def.code, def.unit, &value);
            builder.push(TagEntry::new(def.name, def.code, def.label, Category::Gps, value, display));
        }
    }
}

/// Prefer the value nom-exif decoded, else convert `raw` on its own, else pass it through.
fn push_coordinate(
    builder: &mut RecordBuilder,
    code: u16,
    decoded: Option<f64>,
    raw: &EntryValue,
    reference: Option<char>,
) {
    let decimal = decoded.or_else(|| match raw {
        EntryValue::URationalArray(v) => {
            let dms = LatLng::try_from(v).ok()?;
            latlng_to_decimal(&dms, reference.unwrap_or_default())
        }
        _ => None,
    });

    match (decimal, tags::lookup(code)) {
        (Some(v), Some(def)) => {
            let value = TagValue::Coordinate(v);
            let display = tags::format_value(code, def.unit, &value);
            builder.push(TagEntry::new(def.name, code, def.label, Category::Gps, value, display));
        }
        _ => {
            log::debug!("GPS tag 0x{code:04X} could not be converted to degrees");
            if let Some(value) = convert_value(code, raw) {
                builder.push(make_entry(0, code, None, value));
            }
        }
    }
}

/// Map a nom-exif value onto [`TagValue`]. `None` drops empty values.
fn convert_value(code: u16, value: &EntryValue) -> Option<TagValue> {
    let converted = match value {
        EntryValue::Text(s) => TagValue::Text(clean_text(s)),
        EntryValue::U8(n) => TagValue::Integer(*n as i64),
        EntryValue::U16(n) => TagValue::Integer(*n as i64),
        EntryValue::U32(n) => TagValue::Integer(*n as i64),
        EntryValue::I16(n) => TagValue::Integer(*n as i64),
        EntryValue::I32(n) => TagValue::Integer(*n as i64),
        EntryValue::URational(r) => TagValue::Rational {
            numerator: r.0 as i64,
            denominator: r.1 as i64,
        },
        EntryValue::IRational(r) => TagValue::Rational {
            numerator: r.0 as i64,
            denominator: r.1 as i64,
        },
        EntryValue::Undefined(bytes) => decode_bytes(code, bytes),
        other => TagValue::Text(clean_text(&other.to_string())),
    };

    if matches!(&converted, TagValue::Text(s) if s.is_empty()) {
        None
    } else {
        Some(converted)
    }
}

fn clean_text(s: &str) -> String {
    s.trim_end_matches('\0').trim().trim_matches('"').to_string()
}

/// Decode an UNDEFINED value as text when it is printable, else keep the bytes.
fn decode_bytes(code: u16, bytes: &[u8]) -> TagValue {
    let mut body = bytes;
    // UserComment
    if code == 0x9286 && COMMENT_PREFIXES.iter().any(|p| body.starts_with(p.as_slice())) {
        body = &body[8..];
    }

    let trimmed = match body.iter().rposition(|b| *b != 0) {
        Some(last) => &body[..=last],
        None => return TagValue::Binary(bytes.to_vec()),
    };

    match std::str::from_utf8(trimmed) {
        Ok(s) if s.chars().all(|c| !c.is_control() || c.is_whitespace()) => {
            TagValue::Text(s.trim().to_string())
        }
        _ => TagValue::Binary(bytes.to_vec()),
    }
}
