//! Asset resolution: locator parsing, fetching, decoding and the batch resolver.

pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod locator;
pub(crate) mod resolver;
pub(crate) mod svg_raster;
