use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{PodiumError, PodiumResult};
use crate::schema::validate::validate_request;

/// Number of ranked slots a podium has. The layout has fixed positions for exactly these.
pub const PODIUM_SLOTS: usize = 3;

/// Tournament metadata printed in the podium header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInfo {
    /// Tournament display name.
    pub name: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Website URL shown under the date.
    pub website_url: String,
}

/// One ranked player. Position in [`PodiumRenderRequest::players`] is the rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntry {
    /// Player display name.
    pub name: String,
    /// Final score.
    pub score: i64,
    /// Portrait locator; may be empty or unresolvable.
    #[serde(default)]
    pub image_url: String,
    /// Whether the team badge is drawn next to the portrait.
    #[serde(default)]
    pub is_team_member: bool,
}

/// Structured podium form: tournament metadata plus exactly three ranked players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodiumRenderRequest {
    /// Tournament header data.
    pub tournament: TournamentInfo,
    /// Ranked players, index 0 = 1st place.
    pub players: Vec<PlayerEntry>,
}

impl PodiumRenderRequest {
    /// Parse a request from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PodiumResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PodiumError::serde(format!("parse podium request JSON: {e}")))
    }

    /// Parse a request from a JSON string.
    pub fn from_json_str(s: &str) -> PodiumResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| PodiumError::serde(format!("parse podium request JSON: {e}")))
    }

    /// Parse a request from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PodiumResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PodiumError::validation(format!("open podium request '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Full schema validation of the form, reporting every violation with its JSON path.
    pub fn validate(&self) -> PodiumResult<()> {
        validate_request(self)
            .map_err(|e| PodiumError::validation(format!("podium request is invalid: {e}")))
    }

    /// Minimal contract the renderer relies on: three players and a complete header.
    ///
    /// This is cheaper than [`Self::validate`] and is what a render checks before any
    /// asset is fetched or any pixel is drawn.
    pub fn check_render_contract(&self) -> PodiumResult<()> {
        if self.players.len() != PODIUM_SLOTS {
            return Err(PodiumError::validation(format!(
                "podium needs exactly {PODIUM_SLOTS} players, got {}",
                self.players.len()
            )));
        }
        let t = &self.tournament;
        for (field, value) in [
            ("name", &t.name),
            ("date", &t.date),
            ("websiteUrl", &t.website_url),
        ] {
            if value.trim().is_empty() {
                return Err(PodiumError::validation(format!(
                    "tournament.{field} must be non-empty"
                )));
            }
        }
        Ok(())
    }

    /// Player portrait locators in rank order.
    pub fn image_locators(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.image_url.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
