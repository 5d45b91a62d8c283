//! Error types for fetching and decoding images.

use thiserror::Error;

/// Result type alias for exif-fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The two ways a run can fail.
///
/// An image that simply carries no EXIF data is not an error; it decodes to an
/// empty [`ExifRecord`](crate::exif::ExifRecord).
#[derive(Error, Debug)]
pub enum Error {
    /// The resource could not be retrieved: malformed URL, unreachable host,
    /// non-success status, timeout, or an oversized body.
    #[error("Error downloading the image: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The bytes were retrieved but are not a recognizable image container.
    #[error("Error opening the image: {message}")]
    Format { message: String },
}

impl Error {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    pub fn network_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// `true` for [`Error::Network`].
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// `true` for [`Error::Format`].
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
