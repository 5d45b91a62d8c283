//! Static table of the EXIF tags the report knows how to label.
//!
//! GPS sub-IFD codes (0x0000..=0x001F) do not overlap the IFD0 / Exif sub-IFD
//! codes, so a single table keyed by code covers both.

use super::record::{trim_decimal, Category, TagValue};

/// How a tag's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Plain,
    /// `1/200 s`
    Seconds,
    /// `f/2.8`
    FNumber,
    /// `50 mm`
    Millimeters,
    /// `443.5 m`
    Meters,
    /// `+0.7 EV`
    Ev,
    /// Six-decimal coordinate.
    Degrees,
    /// Small integer code with a word for each value.
    Enumerated,
}

#[derive(Debug, Clone, Copy)]
pub struct TagDef {
    pub code: u16,
    pub name: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub unit: Unit,
}

const fn tag(code: u16, name: &'static str, label: &'static str, category: Category, unit: Unit) -> TagDef {
    TagDef { code, name, label, category, unit }
}

use super::record::Category::{Camera, Exposure, Gps, Image, Other, Timestamps};
use self::Unit::{Degrees, Enumerated, Ev, FNumber, Meters, Millimeters, Plain, Seconds};

// Sub-IFD pointers. Structural, never shown.
pub const TAG_EXIF_OFFSET: u16 = 0x8769;
pub const TAG_GPS_INFO: u16 = 0x8825;
pub const TAG_INTEROP_OFFSET: u16 = 0xA005;

pub const TAG_MAKE: u16 = 0x010F;
pub const TAG_MODEL: u16 = 0x0110;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;
pub const TAG_GPS_ALTITUDE: u16 = 0x0006;

/// Known tags, in display order within each category.
pub static TAGS: &[TagDef] = &[
    // Camera
    tag(TAG_MAKE, "Make", "Make", Camera, Plain),
    tag(TAG_MODEL, "Model", "Model", Camera, Plain),
    tag(0xA431, "BodySerialNumber", "Serial number", Camera, Plain),
    tag(0xA433, "LensMake", "Lens make", Camera, Plain),
    tag(0xA434, "LensModel", "Lens", Camera, Plain),
    tag(0xA432, "LensSpecification", "Lens specification", Camera, Plain),
    tag(0xA435, "LensSerialNumber", "Lens serial number", Camera, Plain),
    tag(0x0131, "Software", "Software", Camera, Plain),
    tag(0xA430, "CameraOwnerName", "Owner", Camera, Plain),
    tag(0x013B, "Artist", "Artist", Camera, Plain),
    tag(0x8298, "Copyright", "Copyright", Camera, Plain),
    // Exposure
    tag(0x829A, "ExposureTime", "Exposure time", Exposure, Seconds),
    tag(0x829D, "FNumber", "Aperture", Exposure, FNumber),
    tag(0x8827, "ISOSpeedRatings", "ISO", Exposure, Plain),
    tag(0x920A, "FocalLength", "Focal length", Exposure, Millimeters),
    tag(0xA405, "FocalLengthIn35mmFilm", "Focal length (35mm)", Exposure, Millimeters),
    tag(0x8822, "ExposureProgram", "Exposure program", Exposure, Enumerated),
    tag(0xA402, "ExposureMode", "Exposure mode", Exposure, Enumerated),
    tag(0x9204, "ExposureBiasValue", "Exposure bias", Exposure, Ev),
    tag(0x9207, "MeteringMode", "Metering mode", Exposure, Enumerated),
    tag(0x9209, "Flash", "Flash", Exposure, Enumerated),
    tag(0xA403, "WhiteBalance", "White balance", Exposure, Enumerated),
    tag(0x9208, "LightSource", "Light source", Exposure, Plain),
    tag(0x9201, "ShutterSpeedValue", "Shutter speed value", Exposure, Ev),
    tag(0x9202, "ApertureValue", "Aperture value", Exposure, Ev),
    tag(0x9205, "MaxApertureValue", "Max aperture value", Exposure, Ev),
    tag(0x9203, "BrightnessValue", "Brightness", Exposure, Ev),
    tag(0x9206, "SubjectDistance", "Subject distance", Exposure, Meters),
    tag(0xA40C, "SubjectDistanceRange", "Subject distance range", Exposure, Plain),
    tag(0x9214, "SubjectArea", "Subject area", Exposure, Plain),
    tag(0xA214, "SubjectLocation", "Subject location", Exposure, Plain),
    tag(0xA406, "SceneCaptureType", "Scene type", Exposure, Enumerated),
    tag(0xA404, "DigitalZoomRatio", "Digital zoom", Exposure, Plain),
    tag(0xA407, "GainControl", "Gain control", Exposure, Plain),
    tag(0xA408, "Contrast", "Contrast", Exposure, Plain),
    tag(0xA409, "Saturation", "Saturation", Exposure, Plain),
    tag(0xA40A, "Sharpness", "Sharpness", Exposure, Plain),
    tag(0xA20B, "FlashEnergy", "Flash energy", Exposure, Plain),
    tag(0xA215, "ExposureIndex", "Exposure index", Exposure, Plain),
    tag(0xA217, "SensingMethod", "Sensing method", Exposure, Plain),
    tag(0xA401, "CustomRendered", "Custom rendered", Exposure, Plain),
    tag(0x8824, "SpectralSensitivity", "Spectral sensitivity", Exposure, Plain),
    tag(0x8828, "OECF", "OECF", Exposure, Plain),
    tag(0xA20C, "SpatialFrequencyResponse", "Spatial frequency response", Exposure, Plain),
    tag(0xA40B, "DeviceSettingDescription", "Device settings", Exposure, Plain),
    // Timestamps
    tag(0x9003, "DateTimeOriginal", "Taken", Timestamps, Plain),
    tag(0x9004, "DateTimeDigitized", "Digitized", Timestamps, Plain),
    tag(0x0132, "DateTime", "Modified", Timestamps, Plain),
    tag(0x9011, "OffsetTimeOriginal", "Taken UTC offset", Timestamps, Plain),
    tag(0x9012, "OffsetTimeDigitized", "Digitized UTC offset", Timestamps, Plain),
    tag(0x9010, "OffsetTime", "Modified UTC offset", Timestamps, Plain),
    tag(0x9291, "SubsecTimeOriginal", "Taken subseconds", Timestamps, Plain),
    tag(0x9292, "SubsecTimeDigitized", "Digitized subseconds", Timestamps, Plain),
    tag(0x9290, "SubsecTime", "Modified subseconds", Timestamps, Plain),
    // GPS
    tag(TAG_GPS_LATITUDE, "GPSLatitude", "Latitude", Gps, Degrees),
    tag(TAG_GPS_LONGITUDE, "GPSLongitude", "Longitude", Gps, Degrees),
    tag(TAG_GPS_ALTITUDE, "GPSAltitude", "Altitude", Gps, Meters),
    tag(0x001D, "GPSDateStamp", "Date (UTC)", Gps, Plain),
    tag(0x0007, "GPSTimeStamp", "Time (UTC)", Gps, Plain),
    tag(0x0001, "GPSLatitudeRef", "Latitude ref", Gps, Plain),
    tag(0x0003, "GPSLongitudeRef", "Longitude ref", Gps, Plain),
    tag(0x0005, "GPSAltitudeRef", "Altitude ref", Gps, Plain),
    tag(0x000C, "GPSSpeedRef", "Speed unit", Gps, Plain),
    tag(0x000D, "GPSSpeed", "Speed", Gps, Plain),
    tag(0x000E, "GPSTrackRef", "Track ref", Gps, Plain),
    tag(0x000F, "GPSTrack", "Track", Gps, Plain),
    tag(0x0010, "GPSImgDirectionRef", "Image direction ref", Gps, Plain),
    tag(0x0011, "GPSImgDirection", "Image direction", Gps, Plain),
    tag(0x0012, "GPSMapDatum", "Map datum", Gps, Plain),
    tag(0x0008, "GPSSatellites", "Satellites", Gps, Plain),
    tag(0x0009, "GPSStatus", "Status", Gps, Plain),
    tag(0x000A, "GPSMeasureMode", "Measure mode", Gps, Plain),
    tag(0x000B, "GPSDOP", "Dilution of precision", Gps, Plain),
    tag(0x0013, "GPSDestLatitudeRef", "Destination latitude ref", Gps, Plain),
    tag(0x0014, "GPSDestLatitude", "Destination latitude", Gps, Plain),
    tag(0x0015, "GPSDestLongitudeRef", "Destination longitude ref", Gps, Plain),
    tag(0x0016, "GPSDestLongitude", "Destination longitude", Gps, Plain),
    tag(0x0017, "GPSDestBearingRef", "Destination bearing ref", Gps, Plain),
    tag(0x0018, "GPSDestBearing", "Destination bearing", Gps, Plain),
    tag(0x0019, "GPSDestDistanceRef", "Destination distance ref", Gps, Plain),
    tag(0x001A, "GPSDestDistance", "Destination distance", Gps, Plain),
    tag(0x001B, "GPSProcessingMethod", "Processing method", Gps, Plain),
    tag(0x001C, "GPSAreaInformation", "Area information", Gps, Plain),
    tag(0x001E, "GPSDifferential", "Differential correction", Gps, Plain),
    tag(0x001F, "GPSHPositioningError", "Horizontal error", Gps, Meters),
    tag(0x0000, "GPSVersionID", "Version", Gps, Plain),
    // Image
    tag(0x0100, "ImageWidth", "Width", Image, Plain),
    tag(0x0101, "ImageLength", "Height", Image, Plain),
    tag(0xA002, "PixelXDimension", "Pixel width", Image, Plain),
    tag(0xA003, "PixelYDimension", "Pixel height", Image, Plain),
    tag(0x0112, "Orientation", "Orientation", Image, Enumerated),
    tag(0x010E, "ImageDescription", "Description", Image, Plain),
    tag(0x9286, "UserComment", "Comment", Image, Plain),
    tag(0xA001, "ColorSpace", "Color space", Image, Enumerated),
    tag(0x011A, "XResolution", "Horizontal resolution", Image, Plain),
    tag(0x011B, "YResolution", "Vertical resolution", Image, Plain),
    tag(0x0128, "ResolutionUnit", "Resolution unit", Image, Enumerated),
    tag(0x0102, "BitsPerSample", "Bits per sample", Image, Plain),
    tag(0x0103, "Compression", "Compression", Image, Plain),
    tag(0x0106, "PhotometricInterpretation", "Photometric interpretation", Image, Plain),
    tag(0x0115, "SamplesPerPixel", "Samples per pixel", Image, Plain),
    tag(0x011C, "PlanarConfiguration", "Planar configuration", Image, Plain),
    tag(0x0111, "StripOffsets", "Strip offsets", Image, Plain),
    tag(0x0116, "RowsPerStrip", "Rows per strip", Image, Plain),
    tag(0x0117, "StripByteCounts", "Strip byte counts", Image, Plain),
    tag(0x012D, "TransferFunction", "Transfer function", Image, Plain),
    tag(0x013E, "WhitePoint", "White point", Image, Plain),
    tag(0x013F, "PrimaryChromaticities", "Primary chromaticities", Image, Plain),
    tag(0x0201, "JPEGInterchangeFormat", "JPEG offset", Image, Plain),
    tag(0x0202, "JPEGInterchangeFormatLength", "JPEG length", Image, Plain),
    tag(0x0211, "YCbCrCoefficients", "YCbCr coefficients", Image, Plain),
    tag(0x0212, "YCbCrSubSampling", "YCbCr subsampling", Image, Plain),
    tag(0x0213, "YCbCrPositioning", "YCbCr positioning", Image, Plain),
    tag(0x0214, "ReferenceBlackWhite", "Reference black/white", Image, Plain),
    tag(0x9000, "ExifVersion", "Exif version", Image, Plain),
    tag(0xA000, "FlashpixVersion", "Flashpix version", Image, Plain),
    tag(0x9101, "ComponentsConfiguration", "Components configuration", Image, Plain),
    tag(0x9102, "CompressedBitsPerPixel", "Compressed bits per pixel", Image, Plain),
    tag(0xA20E, "FocalPlaneXResolution", "Focal plane X resolution", Image, Plain),
    tag(0xA20F, "FocalPlaneYResolution", "Focal plane Y resolution", Image, Plain),
    tag(0xA210, "FocalPlaneResolutionUnit", "Focal plane resolution unit", Image, Enumerated),
    tag(0xA300, "FileSource", "File source", Image, Plain),
    tag(0xA301, "SceneType", "Scene", Image, Plain),
    tag(0xA302, "CFAPattern", "CFA pattern", Image, Plain),
    tag(0xA420, "ImageUniqueID", "Unique ID", Image, Plain),
    tag(0xA500, "Gamma", "Gamma", Image, Plain),
    tag(0xA004, "RelatedSoundFile", "Related sound file", Image, Plain),
    tag(0x1000, "RelatedImageFileFormat", "Related image format", Image, Plain),
    tag(0x1001, "RelatedImageWidth", "Related image width", Image, Plain),
    tag(0x1002, "RelatedImageLength", "Related image height", Image, Plain),
    // Other
    tag(0x927C, "MakerNote", "Maker note", Other, Plain),
];

/// Look up a tag by code.
pub fn lookup(code: u16) -> Option<&'static TagDef> {
    TAGS.iter().find(|t| t.code == code)
}

/// Position of `code` in display order; unknown codes sort last.
pub fn display_rank(code: u16) -> usize {
    TAGS.iter().position(|t| t.code == code).unwrap_or(TAGS.len())
}

/// Sub-IFD pointer tags carry offsets, not metadata.
pub fn is_pointer(code: u16) -> bool {
    matches!(code, TAG_EXIF_OFFSET | TAG_GPS_INFO | TAG_INTEROP_OFFSET)
}

/// Render `value` the way `unit` asks for.
pub fn format_value(code: u16, unit: Unit, value: &TagValue) -> String {
    match (unit, value) {
        (Unit::Seconds, _) => match rational_parts(value) {
            Some((n, d)) if n > 0 && n < d && d % n == 0 => format!("1/{} s", d / n),
            _ => with_suffix(value, " s"),
        },
        (Unit::FNumber, _) => match value.as_f64() {
            Some(v) => format!("f/{}", trim_decimal(v, 1)),
            None => value.to_string(),
        },
        (Unit::Millimeters, _) => with_suffix(value, " mm"),
        (Unit::Meters, _) => with_suffix(value, " m"),
        (Unit::Ev, _) => match value.as_f64() {
            Some(v) if v > 0.0 => format!("+{} EV", trim_decimal(v, 2)),
            Some(v) => format!("{} EV", trim_decimal(v, 2)),
            None => value.to_string(),
        },
        (Unit::Degrees, TagValue::Coordinate(c)) => format!("{c:.6}"),
        (Unit::Enumerated, TagValue::Integer(n)) => match describe(code, *n) {
            Some(word) => word,
            None => n.to_string(),
        },
        _ => value.to_string(),
    }
}

fn rational_parts(value: &TagValue) -> Option<(i64, i64)> {
    match value {
        TagValue::Rational {
            numerator,
            denominator,
        } => Some((*numerator, *denominator)),
        TagValue::Integer(n) => Some((*n, 1)),
        _ => None,
    }
}

fn with_suffix(value: &TagValue, suffix: &str) -> String {
    match value.as_f64() {
        Some(v) => format!("{}{suffix}", trim_decimal(v, 2)),
        None => value.to_string(),
    }
}

/// Words for enumerated tag values.
fn describe(code: u16, n: i64) -> Option<String> {
    let word = match (code, n) {
        // Orientation
        (0x0112, 1) => "Horizontal (normal)",
        (0x0112, 2) => "Mirrored horizontally",
        (0x0112, 3) => "Rotated 180°",
        (0x0112, 4) => "Mirrored vertically",
        (0x0112, 5) => "Mirrored horizontally, rotated 270° CW",
        (0x0112, 6) => "Rotated 90° CW",
        (0x0112, 7) => "Mirrored horizontally, rotated 90° CW",
        (0x0112, 8) => "Rotated 270° CW",
        // ExposureProgram
        (0x8822, 0) => "Not defined",
        (0x8822, 1) => "Manual",
        (0x8822, 2) => "Program AE",
        (0x8822, 3) => "Aperture priority",
        (0x8822, 4) => "Shutter priority",
        (0x8822, 5) => "Creative",
        (0x8822, 6) => "Action",
        (0x8822, 7) => "Portrait",
        (0x8822, 8) => "Landscape",
        // MeteringMode
        (0x9207, 0) => "Unknown",
        (0x9207, 1) => "Average",
        (0x9207, 2) => "Center-weighted average",
        (0x9207, 3) => "Spot",
        (0x9207, 4) => "Multi-spot",
        (0x9207, 5) => "Multi-segment",
        (0x9207, 6) => "Partial",
        (0x9207, 255) => "Other",
        // Flash is a bit field
        (0x9209, n) => return Some(describe_flash(n)),
        // ExposureMode
        (0xA402, 0) => "Auto",
        (0xA402, 1) => "Manual",
        (0xA402, 2) => "Auto bracket",
        // WhiteBalance
        (0xA403, 0) => "Auto",
        (0xA403, 1) => "Manual",
        // SceneCaptureType
        (0xA406, 0) => "Standard",
        (0xA406, 1) => "Landscape",
        (0xA406, 2) => "Portrait",
        (0xA406, 3) => "Night",
        // ColorSpace
        (0xA001, 1) => "sRGB",
        (0xA001, 2) => "Adobe RGB",
        (0xA001, 0xFFFF) => "Uncalibrated",
        // ResolutionUnit, FocalPlaneResolutionUnit
        (0x0128 | 0xA210, 1) => "None",
        (0x0128 | 0xA210, 2) => "inches",
        (0x0128 | 0xA210, 3) => "cm",
        _ => return None,
    };
    Some(word.to_string())
}

fn describe_flash(n: i64) -> String {
    let fired = if n & 0x01 != 0 { "Fired" } else { "Did not fire" };
    let mode = match (n >> 3) & 0x03 {
        1 => Some("compulsory"),
        2 => Some("off"),
        3 => Some("auto"),
        _ => None,
    };
    match mode {
        Some(m) => format!("{fired} ({m})"),
        None => fired.to_string(),
    }
}
