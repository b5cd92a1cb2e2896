//! Boundary schema validation.
//!
//! This module validates invariants on the JSON request model before it reaches the renderer.

pub(crate) mod validate;
