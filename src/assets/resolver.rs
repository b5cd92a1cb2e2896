use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::decode::{DecodedImage, decode_image};
use crate::assets::fetch::ImageFetcher;
use crate::assets::locator::Locator;

/// Outcome of resolving one locator.
///
/// `Unavailable` is a normal outcome, not an error: it covers empty/malformed locators and
/// every fetch or decode failure. Every draw site must handle both variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedAsset {
    /// Successfully decoded image.
    Decoded(DecodedImage),
    /// Nothing usable behind the locator.
    Unavailable,
}

impl ResolvedAsset {
    /// Borrow the decoded image, if any.
    pub fn image(&self) -> Option<&DecodedImage> {
        match self {
            Self::Decoded(img) => Some(img),
            Self::Unavailable => None,
        }
    }

    /// `true` when an image was decoded.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }
}

/// Resolves locators into decoded images through an [`ImageFetcher`].
#[derive(Clone)]
pub struct AssetResolver {
    fetcher: Arc<dyn ImageFetcher>,
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("fetcher_ptr", &Arc::as_ptr(&self.fetcher))
            .finish()
    }
}

impl AssetResolver {
    /// Create a resolver backed by `fetcher`.
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Resolve a single locator. Never fails; problems are logged and yield `Unavailable`.
    pub fn resolve(&self, raw: &str) -> ResolvedAsset {
        let Some(locator) = Locator::parse(raw) else {
            if !raw.trim().is_empty() {
                tracing::warn!(locator = raw, "malformed image locator");
            }
            return ResolvedAsset::Unavailable;
        };

        let bytes = match self.fetcher.fetch(&locator) {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = format!("{e:#}");
                tracing::warn!(locator = %locator.describe(), %error, "failed to fetch image");
                return ResolvedAsset::Unavailable;
            }
        };

        match decode_image(&bytes) {
            Ok(img) => {
                tracing::debug!(
                    locator = %locator.describe(),
                    width = img.width,
                    height = img.height,
                    "resolved image"
                );
                ResolvedAsset::Decoded(img)
            }
            Err(e) => {
                tracing::warn!(locator = %locator.describe(), error = %e, "failed to decode image");
                ResolvedAsset::Unavailable
            }
        }
    }

    /// Resolve a batch concurrently. `result[i]` always corresponds to `locators[i]`, and the
    /// call returns only once every entry has finished.
    #[tracing::instrument(skip(self, locators), fields(count = locators.len()))]
    pub fn resolve_all(&self, locators: &[&str]) -> Vec<ResolvedAsset> {
        locators.par_iter().map(|raw| self.resolve(raw)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
