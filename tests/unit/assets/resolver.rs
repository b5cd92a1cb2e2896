use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

use super::*;

fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Serves fixed bytes per local path, with an optional per-path delay.
#[derive(Default)]
struct FakeFetcher {
    files: HashMap<String, (Vec<u8>, Duration)>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn with(mut self, path: &str, bytes: Vec<u8>, delay_ms: u64) -> Self {
        self.files
            .insert(path.to_string(), (bytes, Duration::from_millis(delay_ms)));
        self
    }
}

impl ImageFetcher for FakeFetcher {
    fn fetch(&self, locator: &Locator) -> anyhow::Result<Vec<u8>> {
        self.calls.lock().unwrap().push(locator.describe());
        let Locator::Local(path) = locator else {
            anyhow::bail!("unreachable host");
        };
        let (bytes, delay) = self
            .files
            .get(path)
            .ok_or_else(|| anyhow::anyhow!("404 for {path}"))?;
        std::thread::sleep(*delay);
        Ok(bytes.clone())
    }
}

#[test]
fn empty_and_malformed_locators_skip_io() {
    let fetcher = Arc::new(FakeFetcher::default());
    let resolver = AssetResolver::new(fetcher.clone());

    assert_eq!(resolver.resolve(""), ResolvedAsset::Unavailable);
    assert_eq!(resolver.resolve("   "), ResolvedAsset::Unavailable);
    assert_eq!(resolver.resolve("../etc/passwd"), ResolvedAsset::Unavailable);
    assert_eq!(resolver.resolve("gopher://x/y"), ResolvedAsset::Unavailable);
    assert!(fetcher.calls.lock().unwrap().is_empty());
}

#[test]
fn fetch_and_decode_failures_become_unavailable() {
    let fetcher = Arc::new(FakeFetcher::default().with("corrupt.png", b"garbage".to_vec(), 0));
    let resolver = AssetResolver::new(fetcher.clone());

    assert_eq!(resolver.resolve("missing.png"), ResolvedAsset::Unavailable);
    assert_eq!(resolver.resolve("corrupt.png"), ResolvedAsset::Unavailable);
    assert_eq!(
        resolver.resolve("https://unreachable.invalid/p.png"),
        ResolvedAsset::Unavailable
    );
    assert_eq!(fetcher.calls.lock().unwrap().len(), 3);
}

#[test]
fn decoded_asset_exposes_intrinsic_size() {
    let fetcher = Arc::new(FakeFetcher::default().with("wide.png", png(6, 2, [1, 2, 3, 255]), 0));
    let resolver = AssetResolver::new(fetcher);

    let asset = resolver.resolve("/wide.png");
    assert!(asset.is_available());
    let img = asset.image().unwrap();
    assert_eq!((img.width, img.height), (6, 2));
}

#[test]
fn batch_preserves_input_order_under_uneven_latency() {
    let fetcher = Arc::new(
        FakeFetcher::default()
            .with("a.png", png(1, 1, [255, 0, 0, 255]), 60)
            .with("b.png", png(2, 1, [0, 255, 0, 255]), 0)
            .with("c.png", png(3, 1, [0, 0, 255, 255]), 30),
    );
    let resolver = AssetResolver::new(fetcher);

    let out = resolver.resolve_all(&["a.png", "b.png", "c.png", "", "nope.png"]);
    assert_eq!(out.len(), 5);
    let widths: Vec<Option<u32>> = out.iter().map(|a| a.image().map(|i| i.width)).collect();
    assert_eq!(widths, vec![Some(1), Some(2), Some(3), None, None]);
}

#[test]
fn one_failure_does_not_abort_the_batch() {
    let fetcher = Arc::new(FakeFetcher::default().with("b.png", png(2, 2, [9, 9, 9, 255]), 0));
    let resolver = AssetResolver::new(fetcher);

    let out = resolver.resolve_all(&["missing.png", "b.png", "https://down.invalid/c.png"]);
    assert_eq!(out[0], ResolvedAsset::Unavailable);
    assert!(out[1].is_available());
    assert_eq!(out[2], ResolvedAsset::Unavailable);
}
