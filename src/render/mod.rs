//! Raster compositing: the podium painter on top of the `vello_cpu` backend.

pub(crate) mod compositor;
pub(crate) mod surface;
pub(crate) mod text;
