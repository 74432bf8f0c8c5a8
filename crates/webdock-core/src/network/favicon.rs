//! Icon retrieval.
//!
//! A favicon lookup walks a fixed list of well-known icon paths on the web
//! app's origin and keeps the first response that looks like an image. Every
//! candidate gets exactly one request; redirects are capped by the client.

use crate::config::NetworkConfig;
use crate::error::{Result, WebdockError};
use crate::models::IconImage;
use crate::network::client::build_client;
use crate::validate::ValidUrl;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// Known image extensions and the content types that map onto them.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/x-icon", "ico"),
    ("image/vnd.microsoft.icon", "ico"),
    ("image/svg+xml", "svg"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Map an image content type to the extension used for the stored icon.
///
/// Unknown `image/*` subtypes are stored as png.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
        .unwrap_or("png")
}

fn extension_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let ext = if ext == "jpeg" { "jpg".to_string() } else { ext };
    IMAGE_TYPES
        .iter()
        .map(|(_, known)| *known)
        .find(|known| *known == ext)
}

/// Read a local image file to use as an icon.
pub fn load_icon_file(path: &Path, max_bytes: usize) -> Result<IconImage> {
    let extension = extension_for_path(path).ok_or_else(|| {
        WebdockError::validation(
            "icon",
            format!("{} is not a png, ico, svg, jpg, gif or webp file", path.display()),
        )
    })?;

    let metadata = std::fs::metadata(path).map_err(|e| {
        WebdockError::validation("icon", format!("cannot read {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() || metadata.len() == 0 {
        return Err(WebdockError::validation(
            "icon",
            format!("{} is not a non-empty file", path.display()),
        ));
    }
    if metadata.len() > max_bytes as u64 {
        return Err(WebdockError::validation(
            "icon",
            format!("{} is larger than {} bytes", path.display(), max_bytes),
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| WebdockError::io_with_path(e, path))?;
    Ok(IconImage { bytes, extension })
}

/// Downloads icons over HTTP.
pub struct FaviconFetcher {
    client: Client,
    max_bytes: usize,
}

impl FaviconFetcher {
    /// Create a fetcher with the default client and limits.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(build_client(
            NetworkConfig::FAVICON_TIMEOUT,
        )?))
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            max_bytes: NetworkConfig::MAX_ICON_BYTES,
        }
    }

    /// Override the maximum accepted icon size.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Maximum accepted icon size in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Candidate icon locations for a web app, in the order they are tried.
    pub fn candidates(url: &Url) -> Vec<Url> {
        NetworkConfig::FAVICON_CANDIDATES
            .iter()
            .filter_map(|path| url.join(path).ok())
            .collect()
    }

    /// Best-effort favicon lookup. Failures are logged, never returned.
    pub async fn fetch_favicon(&self, url: &ValidUrl) -> Option<IconImage> {
        for candidate in Self::candidates(url.url()) {
            match self.fetch_image(&candidate).await {
                Ok(icon) => {
                    debug!(
                        "Fetched favicon from {} ({} bytes)",
                        candidate,
                        icon.bytes.len()
                    );
                    return Some(icon);
                }
                Err(e) => debug!("Favicon candidate rejected: {}", e),
            }
        }

        warn!(
            "Could not fetch a favicon for {}, using the default icon",
            url
        );
        None
    }

    /// Download an icon the user asked for explicitly.
    pub async fn download_icon(&self, url: &ValidUrl) -> Result<IconImage> {
        self.fetch_image(url.url()).await
    }

    async fn fetch_image(&self, url: &Url) -> Result<IconImage> {
        let fail = |message: String| WebdockError::Fetch {
            url: url.to_string(),
            message,
        };

        let mut response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("HTTP {}", status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(fail(format!(
                "not an image (content type '{}')",
                content_type
            )));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(fail(format!("icon too large ({} bytes)", length)));
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(fail(format!(
                    "icon exceeds {} bytes",
                    self.max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(fail("empty response body".to_string()));
        }

        Ok(IconImage {
            bytes,
            extension: extension_for_content_type(&content_type),
        })
    }
}
