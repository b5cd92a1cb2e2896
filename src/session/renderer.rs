use std::sync::Arc;

use crate::assets::fetch::{DefaultFetcher, ImageFetcher};
use crate::assets::resolver::{AssetResolver, ResolvedAsset};
use crate::config::RenderConfig;
use crate::encode::png::RenderedImage;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PodiumError, PodiumResult};
use crate::layout::podium::compute_layout;
use crate::render::compositor::{CompositeInput, composite};
use crate::render::text::FontSet;
use crate::scene::model::{PODIUM_SLOTS, PodiumRenderRequest};

/// Static render options shared by every call.
#[derive(Clone, Debug, Default)]
pub struct RendererOpts {
    /// Output size.
    pub canvas: Canvas,
    /// Fonts for all text; without them the system sans-serif is used.
    pub fonts: Option<FontSet>,
    /// Watermark locator (empty for none).
    pub watermark: String,
    /// Team badge locator (empty for none).
    pub team_badge: String,
}

/// Assets for one render, already resolved by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAssets {
    /// One portrait per player, rank order.
    pub portraits: Vec<ResolvedAsset>,
    /// Watermark.
    pub watermark: ResolvedAsset,
    /// Team badge.
    pub team_badge: ResolvedAsset,
}

impl ResolvedAssets {
    /// Nothing available: placeholders everywhere, no watermark, no badges.
    pub fn unavailable(players: usize) -> Self {
        Self {
            portraits: vec![ResolvedAsset::Unavailable; players],
            watermark: ResolvedAsset::Unavailable,
            team_badge: ResolvedAsset::Unavailable,
        }
    }
}

/// Turns podium requests into PNG images.
///
/// Holds no per-render state; one renderer can serve concurrent calls.
#[derive(Clone, Debug)]
pub struct PodiumRenderer {
    opts: RendererOpts,
    resolver: AssetResolver,
}

impl PodiumRenderer {
    /// Build a renderer fetching images through `fetcher`.
    pub fn new(opts: RendererOpts, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            opts,
            resolver: AssetResolver::new(fetcher),
        }
    }

    /// Build a renderer from a [`RenderConfig`]: fonts are loaded and the fetcher is chosen
    /// from `assets_root`, `allow_remote` and `fetch_timeout_ms`.
    pub fn from_config(cfg: &RenderConfig) -> PodiumResult<Self> {
        cfg.canvas.validate()?;
        let fonts = cfg.load_fonts()?;
        let fetcher: Arc<dyn ImageFetcher> = if cfg.allow_remote {
            Arc::new(DefaultFetcher::with_http(&cfg.assets_root, cfg.fetch_timeout())?)
        } else {
            Arc::new(DefaultFetcher::offline(&cfg.assets_root))
        };
        let opts = RendererOpts {
            canvas: cfg.canvas,
            fonts,
            watermark: cfg.watermark.clone(),
            team_badge: cfg.team_badge.clone(),
        };
        Ok(Self::new(opts, fetcher))
    }

    /// Options this renderer was built with.
    pub fn opts(&self) -> &RendererOpts {
        &self.opts
    }

    /// Resolve every image a request needs in one concurrent batch.
    ///
    /// Output: player portraits in rank order, then watermark, then team badge.
    pub fn resolve_assets(&self, req: &PodiumRenderRequest) -> ResolvedAssets {
        let mut locators: Vec<&str> = req.image_locators().collect();
        locators.push(&self.opts.watermark);
        locators.push(&self.opts.team_badge);

        let mut resolved = self.resolver.resolve_all(&locators);
        let team_badge = resolved.pop().unwrap_or(ResolvedAsset::Unavailable);
        let watermark = resolved.pop().unwrap_or(ResolvedAsset::Unavailable);
        ResolvedAssets {
            portraits: resolved,
            watermark,
            team_badge,
        }
    }

    /// Render `req`: contract check, asset batch, layout, compositing, PNG encoding.
    ///
    /// Unavailable images degrade to placeholders; a contract violation fails before any
    /// asset is fetched.
    #[tracing::instrument(skip_all, fields(tournament = %req.tournament.name))]
    pub fn render(&self, req: &PodiumRenderRequest) -> PodiumResult<RenderedImage> {
        req.check_render_contract()?;
        let assets = self.resolve_assets(req);
        tracing::debug!(
            portraits = assets.portraits.iter().filter(|a| a.is_available()).count(),
            watermark = assets.watermark.is_available(),
            team_badge = assets.team_badge.is_available(),
            "assets resolved"
        );
        self.render_resolved(req, &assets)
    }

    /// Render with assets the caller resolved.
    pub fn render_resolved(
        &self,
        req: &PodiumRenderRequest,
        assets: &ResolvedAssets,
    ) -> PodiumResult<RenderedImage> {
        req.check_render_contract()?;
        if assets.portraits.len() != PODIUM_SLOTS {
            return Err(PodiumError::validation(format!(
                "expected {PODIUM_SLOTS} resolved portraits, got {}",
                assets.portraits.len()
            )));
        }

        let layout = compute_layout(self.opts.canvas)?;
        let out = composite(&CompositeInput {
            layout: &layout,
            tournament: &req.tournament,
            players: &req.players,
            portraits: &assets.portraits,
            watermark: &assets.watermark,
            team_badge: &assets.team_badge,
            fonts: self.opts.fonts.as_ref(),
        })?;
        tracing::debug!(bytes = out.png.len(), "podium encoded");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/renderer.rs"]
mod tests;
