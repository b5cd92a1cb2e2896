use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};

use crate::assets::locator::Locator;
use crate::foundation::error::{PodiumError, PodiumResult};
use crate::store::uploads::MAX_UPLOAD_BYTES;

/// Largest remote image body accepted; same limit as uploads.
pub const MAX_REMOTE_IMAGE_BYTES: usize = MAX_UPLOAD_BYTES;

/// Image fetch collaborator: turns a locator into raw encoded bytes.
///
/// Implementations report any failure (missing file, HTTP error, timeout) as an error; the
/// resolver downgrades those to [`crate::ResolvedAsset::Unavailable`].
pub trait ImageFetcher: Send + Sync {
    /// Fetch the encoded bytes behind `locator`.
    fn fetch(&self, locator: &Locator) -> anyhow::Result<Vec<u8>>;
}

/// Reads [`Locator::Local`] paths from a root directory.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory local locators are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageFetcher for FsFetcher {
    fn fetch(&self, locator: &Locator) -> anyhow::Result<Vec<u8>> {
        match locator {
            Locator::Local(rel) => {
                let p = self.root.join(Path::new(rel));
                std::fs::read(&p).with_context(|| format!("read asset '{}'", p.display()))
            }
            Locator::Inline(bytes) => Ok(bytes.clone()),
            Locator::Remote(url) => bail!("filesystem fetcher cannot fetch remote url '{url}'"),
        }
    }
}

/// Fetches [`Locator::Remote`] URLs with a blocking HTTP client.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    max_bytes: usize,
}

impl HttpFetcher {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> PodiumResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("podium/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PodiumError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            max_bytes: MAX_REMOTE_IMAGE_BYTES,
        })
    }

    /// Override the response body limit.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, locator: &Locator) -> anyhow::Result<Vec<u8>> {
        let Locator::Remote(url) = locator else {
            bail!("http fetcher only fetches remote urls");
        };
        let res = self
            .client
            .get(url.as_str())
            .send()
            .with_context(|| format!("HTTP GET '{url}'"))?;
        let status = res.status();
        if !status.is_success() {
            bail!("HTTP GET '{url}' returned {status}");
        }
        let declared = res.content_length();
        read_capped(res, declared, self.max_bytes).with_context(|| format!("HTTP GET '{url}'"))
    }
}

/// Read a response body of at most `max_bytes`.
///
/// A declared length over the limit is rejected before reading; an undeclared or understated
/// body stops one byte past the limit.
fn read_capped(
    reader: impl Read,
    declared: Option<u64>,
    max_bytes: usize,
) -> anyhow::Result<Vec<u8>> {
    let cap = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if let Some(len) = declared.filter(|&len| len > cap) {
        bail!("response body of {len} bytes exceeds the {max_bytes} byte limit");
    }
    let mut body = Vec::new();
    reader
        .take(cap.saturating_add(1))
        .read_to_end(&mut body)
        .context("read response body")?;
    if body.len() > max_bytes {
        bail!("response body exceeds the {max_bytes} byte limit");
    }
    Ok(body)
}

/// Routes each locator kind to the matching fetcher.
///
/// Remote fetching can be switched off (offline rendering); remote locators then fail and
/// resolve to unavailable.
#[derive(Clone, Debug)]
pub struct DefaultFetcher {
    fs: FsFetcher,
    http: Option<HttpFetcher>,
}

impl DefaultFetcher {
    /// Local-only fetcher.
    pub fn offline(root: impl Into<PathBuf>) -> Self {
        Self {
            fs: FsFetcher::new(root),
            http: None,
        }
    }

    /// Local + remote fetcher.
    pub fn with_http(root: impl Into<PathBuf>, timeout: Duration) -> PodiumResult<Self> {
        Ok(Self {
            fs: FsFetcher::new(root),
            http: Some(HttpFetcher::new(timeout)?),
        })
    }
}

impl ImageFetcher for DefaultFetcher {
    fn fetch(&self, locator: &Locator) -> anyhow::Result<Vec<u8>> {
        match locator {
            Locator::Remote(url) => match &self.http {
                Some(http) => http.fetch(locator),
                None => bail!("remote fetching is disabled ('{url}')"),
            },
            Locator::Local(_) | Locator::Inline(_) => self.fs.fetch(locator),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
