use serde::Serialize;

use crate::container::ContainerKind;
use crate::error::Result;
use crate::exif::{self, ExifRecord};
use crate::fetch::Fetcher;

/// The outcome of inspecting one URL.
///
/// # Example
///
/// ```rust,no_run
/// # use exif_fetch::config::FetchConfig;
/// # use exif_fetch::fetch::Fetcher;
/// # use exif_fetch::pipeline::inspect_url;
/// # async fn example() -> exif_fetch::Result<()> {
/// let fetcher = Fetcher::new(&FetchConfig::default())?;
/// let inspection = inspect_url(&fetcher, "https://example.com/photo.jpg").await?;
///
/// if inspection.record.is_empty() {
///     println!("No metadata");
/// } else {
///     println!("{} tags in a {} image", inspection.record.len(), inspection.container.mime_type());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub url: String,
    pub container: ContainerKind,
    /// Payload size in bytes.
    pub size: usize,
    #[serde(rename = "tags")]
    pub record: ExifRecord,
}

/// Fetch `url` and decode its EXIF metadata.
///
/// Fails only if the download fails or the body is not an image. An image
/// without metadata yields an empty record.
pub async fn inspect_url(fetcher: &Fetcher, url: &str) -> Result<Inspection> {
    let image = fetcher.fetch(url).await?;
    log::debug!(
        "Parsing {} bytes as {}",
        image.len(),
        image.kind().mime_type()
    );

    let record = exif::read_exif(&image);

    Ok(Inspection {
        url: url.trim().to_string(),
        container: image.kind(),
        size: image.len(),
        record,
    })
}
