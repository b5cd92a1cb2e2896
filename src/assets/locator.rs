use base64::Engine as _;

use crate::foundation::error::{PodiumError, PodiumResult};

/// A parsed image locator.
///
/// Produced by [`Locator::parse`]; an empty or malformed string has no locator and resolves
/// to [`crate::ResolvedAsset::Unavailable`] without any IO.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// `http://` or `https://` URL.
    Remote(String),
    /// Normalized relative path under the fetcher's root directory.
    Local(String),
    /// Bytes embedded in a `data:<mime>;base64,<payload>` URI.
    Inline(Vec<u8>),
}

impl Locator {
    /// Parse a raw locator string. Returns `None` for empty or malformed input.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let host = s.split_once("://").map(|(_, rest)| rest).unwrap_or("");
            if host.is_empty() || host.starts_with('/') {
                return None;
            }
            return Some(Self::Remote(s.to_string()));
        }
        if lower.starts_with("data:") {
            return decode_data_uri(s).map(Self::Inline);
        }
        if s.contains("://") {
            return None;
        }

        // Web-root style paths (`/uploads/x.png`) resolve relative to the fetcher root.
        normalize_rel_path(s.trim_start_matches(['/', '\\']))
            .ok()
            .map(Self::Local)
    }

    /// Short description for logs; inline payloads are summarised by size.
    pub fn describe(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::Local(path) => path.clone(),
            Self::Inline(bytes) => format!("data URI ({} bytes)", bytes.len()),
        }
    }
}

fn decode_data_uri(s: &str) -> Option<Vec<u8>> {
    let (header, payload) = s.split_once(',')?;
    if !header.to_ascii_lowercase().ends_with(";base64") {
        return None;
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .ok()?;
    if bytes.is_empty() { None } else { Some(bytes) }
}

/// Normalize and validate fetcher-root-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> PodiumResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PodiumError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PodiumError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PodiumError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PodiumError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/locator.rs"]
mod tests;
