use image::ImageFormat;
use serde::Serialize;

/// ISO-BMFF major brands that identify a HEIF still image.
const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1",
];

/// The image container a payload is wrapped in, sniffed from its leading bytes.
///
/// The container decides how the EXIF block is located:
/// - **JPEG, TIFF, HEIF, AVIF** are handed to `nom-exif` as-is.
/// - **PNG, WebP** carry EXIF in a dedicated chunk that is unwrapped first.
/// - **GIF, BMP** and other raster formats have no EXIF slot at all.
///
/// # Example
///
/// ```rust
/// use exif_fetch::container::ContainerKind;
///
/// let kind = ContainerKind::detect(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10]);
/// assert_eq!(kind, Some(ContainerKind::Jpeg));
///
/// assert_eq!(ContainerKind::detect(b"<!DOCTYPE html>"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Jpeg,
    Png,
    WebP,
    Tiff,
    Heif,
    Avif,
    Gif,
    Bmp,
    /// Any other raster format the `image` crate recognizes.
    Other,
}

impl ContainerKind {
    /// Detect the container from magic bytes. `None` means the payload is not an image.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes) {
            Ok(ImageFormat::Jpeg) => Some(Self::Jpeg),
            Ok(ImageFormat::Png) => Some(Self::Png),
            Ok(ImageFormat::WebP) => Some(Self::WebP),
            Ok(ImageFormat::Tiff) => Some(Self::Tiff),
            Ok(ImageFormat::Avif) => Some(Self::Avif),
            Ok(ImageFormat::Gif) => Some(Self::Gif),
            Ok(ImageFormat::Bmp) => Some(Self::Bmp),
            Ok(_) => Some(Self::Other),
            Err(_) if is_heif(bytes) => Some(Self::Heif),
            Err(_) => None,
        }
    }

    /// Whether `nom-exif` can read this container directly.
    pub fn is_native_exif(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Tiff | Self::Heif | Self::Avif)
    }

    /// Whether EXIF sits in a chunk that has to be unwrapped first.
    pub fn is_chunked_exif(&self) -> bool {
        matches!(self, Self::Png | Self::WebP)
    }

    /// Get the canonical MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Tiff => "image/tiff",
            Self::Heif => "image/heif",
            Self::Avif => "image/avif",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Other => "application/octet-stream",
        }
    }
}

/// `....ftyp<brand>` with a HEIF brand.
fn is_heif(bytes: &[u8]) -> bool {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return false;
    }
    HEIF_BRANDS.iter().any(|brand| &bytes[8..12] == brand.as_slice())
}
