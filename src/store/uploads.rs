use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{PodiumError, PodiumResult};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Where an accepted upload ended up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Web-root style locator, e.g. `/uploads/1714557600000-ada.png`.
    pub url: String,
    /// File written on disk.
    pub path: PathBuf,
}

/// Stores uploaded portraits as files in one directory.
#[derive(Clone, Debug)]
pub struct DirUploadStore {
    /// Target directory, created on first upload.
    pub dir: PathBuf,
    /// Prefix of returned URLs.
    pub url_prefix: String,
    /// Size limit in bytes.
    pub max_bytes: usize,
}

impl DirUploadStore {
    /// Store under `dir`, returning `/uploads/...` URLs, with the 5 MiB limit.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: "/uploads".to_string(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }

    /// Save `bytes` as `<millis>-<sanitized original name>` and return its URL.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn accept(&self, original_name: &str, bytes: &[u8]) -> PodiumResult<UploadReceipt> {
        if bytes.is_empty() {
            return Err(PodiumError::validation("no file uploaded"));
        }
        if bytes.len() > self.max_bytes {
            return Err(PodiumError::validation(format!(
                "upload of {} bytes exceeds the {} byte limit",
                bytes.len(),
                self.max_bytes
            )));
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            PodiumError::asset(format!(
                "create upload dir '{}': {e}",
                self.dir.display()
            ))
        })?;

        let name = sanitize_file_name(original_name);
        let mut stamp = now_millis();
        let (stored, path) = loop {
            let stored = format!("{stamp}-{name}");
            let path = self.dir.join(&stored);
            match create_new(&path, bytes) {
                Ok(()) => break (stored, path),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => stamp += 1,
                Err(e) => {
                    return Err(PodiumError::asset(format!(
                        "write upload '{}': {e}",
                        path.display()
                    )));
                }
            }
        };

        let url = format!("{}/{stored}", self.url_prefix.trim_end_matches('/'));
        tracing::debug!(%url, "upload stored");
        Ok(UploadReceipt { url, path })
    }
}

fn create_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    f.write_all(bytes)
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Last path component of `name`, restricted to `[A-Za-z0-9._-]`.
pub(crate) fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/uploads.rs"]
mod tests;
