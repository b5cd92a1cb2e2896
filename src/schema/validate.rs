use std::fmt;

use crate::scene::model::{PODIUM_SLOTS, PlayerEntry, PodiumRenderRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

pub(crate) fn validate_request(req: &PodiumRenderRequest) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    let t = &req.tournament;
    for (field, value) in [
        ("name", &t.name),
        ("date", &t.date),
        ("websiteUrl", &t.website_url),
    ] {
        if value.trim().is_empty() {
            errors.push(SchemaError::at(
                &[
                    SchemaPathElem::Field("tournament"),
                    SchemaPathElem::Field(field),
                ],
                "must be non-empty",
            ));
        }
    }

    if !t.date.trim().is_empty() && crate::scene::date::parse_iso_date(&t.date).is_none() {
        errors.push(SchemaError::at(
            &[
                SchemaPathElem::Field("tournament"),
                SchemaPathElem::Field("date"),
            ],
            "must be an ISO-8601 calendar date (YYYY-MM-DD)",
        ));
    }

    if req.players.len() != PODIUM_SLOTS {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("players")],
            format!(
                "must contain exactly {PODIUM_SLOTS} entries, got {}",
                req.players.len()
            ),
        ));
    }

    for (i, player) in req.players.iter().enumerate() {
        validate_player(player, i, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_player(player: &PlayerEntry, index: usize, errors: &mut Vec<SchemaError>) {
    if player.name.trim().is_empty() {
        errors.push(SchemaError::at(
            &[
                SchemaPathElem::Field("players"),
                SchemaPathElem::Index(index),
                SchemaPathElem::Field("name"),
            ],
            "must be non-empty",
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
