//! # exif-fetch
//!
//! Download an image from a URL and print its embedded EXIF metadata (camera,
//! exposure settings, timestamps, GPS position) grouped under readable headings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_fetch::config::Config;
//! use exif_fetch::fetch::Fetcher;
//! use exif_fetch::pipeline::inspect_url;
//! use exif_fetch::render::{render_text, RenderOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let fetcher = Fetcher::new(&config.fetch)?;
//!
//!     let inspection = inspect_url(&fetcher, "https://example.com/photo.jpg").await?;
//!     print!("{}", render_text(&inspection.record, &RenderOptions::default()));
//!
//!     Ok(())
//! }
//! ```
//!
//! Output looks like:
//!
//! ```text
//! CAMERA
//!   Camera: Canon EOS 80D
//!   Lens: EF-S18-135mm f/3.5-5.6 IS USM
//!
//! EXPOSURE
//!   Exposure time: 1/200 s
//!   Aperture: f/5.6
//!   ISO: 200
//!
//! GPS
//!   Latitude: 40.748433
//!   Longitude: -73.985667
//! ```
//!
//! ## Lower-Level Usage
//!
//! The fetcher and the decoder are independent; bytes obtained elsewhere can be
//! decoded directly:
//!
//! ```rust,no_run
//! use exif_fetch::exif::read_exif;
//! use exif_fetch::fetch::ImageBytes;
//!
//! # fn main() -> anyhow::Result<()> {
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = ImageBytes::new(bytes, None)?;
//! let record = read_exif(&image);
//! println!("Model: {:?}", record.text("Model"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Supported Formats
//!
//! | Format | EXIF source |
//! |--------|-------------|
//! | JPEG | APP1 segment |
//! | TIFF | IFD0 |
//! | HEIC/HEIF, AVIF | `Exif` item |
//! | PNG | `eXIf` chunk |
//! | WebP | `EXIF` chunk |
//! | GIF, BMP, others | none (empty record) |
//!
//! ## Modules
//!
//! - [`config`] — Configuration types and loading/saving
//! - [`container`] — Image container detection
//! - [`error`] — Network and format errors
//! - [`exif`] — EXIF decoding into an [`ExifRecord`](exif::ExifRecord)
//! - [`fetch`] — HTTP download
//! - [`pipeline`] — Fetch-then-decode in one call
//! - [`render`] — Grouped text and JSON output

pub mod config;
pub mod container;
pub mod error;
pub mod exif;
pub mod fetch;
pub mod pipeline;
pub mod render;

pub use error::{Error, Result};
