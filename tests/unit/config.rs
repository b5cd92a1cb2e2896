use std::collections::HashMap;

use super::*;

fn with_env(cfg: RenderConfig, pairs: &[(&str, &str)]) -> PodiumResult<RenderConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    cfg.apply_env_from(|k| vars.get(k).cloned())
}

#[test]
fn empty_object_is_default() {
    let cfg: RenderConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, RenderConfig::default());
    assert_eq!(cfg.canvas, Canvas::REFERENCE);
    assert_eq!(cfg.fetch_timeout(), Duration::from_secs(5));
    assert!(cfg.allow_remote);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<RenderConfig>(r#"{"canvass": {}}"#).is_err());
}

#[test]
fn from_path_parses_and_validates_canvas() {
    let dir = std::env::temp_dir().join(format!("podium_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.json");
    std::fs::write(
        &good,
        r#"{"canvas":{"width":700,"height":500},"watermark":"wm.png","allow_remote":false}"#,
    )
    .unwrap();
    let cfg = RenderConfig::from_path(&good).unwrap();
    assert_eq!(cfg.canvas, Canvas::new(700, 500).unwrap());
    assert_eq!(cfg.watermark, "wm.png");
    assert!(!cfg.allow_remote);

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{"canvas":{"width":0,"height":500}}"#).unwrap();
    assert!(RenderConfig::from_path(&bad).is_err());

    let err = RenderConfig::from_path(dir.join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("config error:"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn env_overrides_apply() {
    let cfg = with_env(
        RenderConfig::default(),
        &[
            ("PODIUM_FONT", "fonts/regular.ttf"),
            ("PODIUM_ASSETS_ROOT", "/srv/podium"),
            ("PODIUM_FETCH_TIMEOUT_MS", "250"),
            ("PODIUM_FONT_BOLD", "  "),
        ],
    )
    .unwrap();
    assert_eq!(cfg.font_regular, Some(PathBuf::from("fonts/regular.ttf")));
    assert_eq!(cfg.font_bold, None);
    assert_eq!(cfg.assets_root, PathBuf::from("/srv/podium"));
    assert_eq!(cfg.fetch_timeout_ms, 250);
}

#[test]
fn bad_timeout_override_is_config_error() {
    for bad in ["abc", "0", "-5"] {
        let err = with_env(RenderConfig::default(), &[("PODIUM_FETCH_TIMEOUT_MS", bad)])
            .unwrap_err();
        assert!(err.to_string().contains("config error:"), "{bad}");
    }
}

#[test]
fn fonts_are_optional_but_bold_needs_regular() {
    assert!(RenderConfig::default().load_fonts().unwrap().is_none());

    let cfg = RenderConfig {
        font_bold: Some(PathBuf::from("bold.ttf")),
        ..RenderConfig::default()
    };
    assert!(cfg.load_fonts().is_err());
}
