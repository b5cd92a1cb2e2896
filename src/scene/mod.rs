//! Boundary input model: the tournament/player payload a podium is rendered from.

pub(crate) mod date;
pub(crate) mod model;
