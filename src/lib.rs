//! Podium renders tournament award images.
//!
//! A podium request (tournament header plus three ranked players) goes through four stages:
//!
//! - resolve portrait, watermark and team-badge images concurrently ([`AssetResolver`])
//! - compute the fixed podium geometry for the canvas ([`compute_layout`])
//! - paint everything onto a CPU raster surface ([`composite`])
//! - encode the surface as PNG ([`RenderedImage`])
//!
//! [`PodiumRenderer`] runs the whole pipeline. Missing or broken images never fail a render;
//! they fall back to coloured placeholders.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod encode;
mod foundation;
mod layout;
mod render;
mod scene;
mod schema;
mod session;
mod store;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{PodiumError, PodiumResult};

pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::fetch::{
    DefaultFetcher, FsFetcher, HttpFetcher, ImageFetcher, MAX_REMOTE_IMAGE_BYTES,
};
pub use crate::assets::locator::Locator;
pub use crate::assets::resolver::{AssetResolver, ResolvedAsset};
pub use crate::config::RenderConfig;
pub use crate::encode::png::RenderedImage;
pub use crate::layout::podium::{
    HeaderGeometry, PlacementGeometry, PodiumLayout, Rank, TextAnchor, compute_layout,
};
pub use crate::render::compositor::{CompositeInput, composite};
pub use crate::render::text::FontSet;
pub use crate::scene::date::format_date;
pub use crate::scene::model::{PODIUM_SLOTS, PlayerEntry, PodiumRenderRequest, TournamentInfo};
pub use crate::session::renderer::{PodiumRenderer, RendererOpts, ResolvedAssets};
pub use crate::store::records::{
    MemRecordStore, PlayerRecord, RecordStore, SubmittedPodium, TournamentRecord, submit_podium,
};
pub use crate::store::uploads::{DirUploadStore, MAX_UPLOAD_BYTES, UploadReceipt};
