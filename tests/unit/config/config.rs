use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_are_valid() {
    let cfg = BoothConfig::default();
    assert_eq!(cfg.camera, CameraConstraints { width: 1280, height: 720 });
    assert_eq!(cfg.countdown_secs, 3);
    assert_eq!(cfg.jpeg_quality, 100);
    assert_eq!(cfg.pattern_tile_px, 20);
    assert_eq!(cfg.decode_threads, None);
    assert_eq!(cfg.export_dir, PathBuf::from("./photobooth-export"));
    assert_eq!(cfg.logging, LoggingConfig::default());
    cfg.validate().unwrap();
}

#[test]
fn empty_document_takes_defaults() {
    assert_eq!(BoothConfig::from_json("{}").unwrap(), BoothConfig::default());
}

#[test]
fn partial_document_overrides_named_fields() {
    let cfg = BoothConfig::from_json(
        r#"{ "countdown_secs": 5, "camera": { "width": 640, "height": 480 },
             "logging": { "json": true } }"#,
    )
    .unwrap();
    assert_eq!(cfg.countdown_secs, 5);
    assert_eq!(cfg.camera.width, 640);
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.level, "info");
    assert_eq!(cfg.jpeg_quality, 100);
}

#[test]
fn unknown_fields_are_config_errors() {
    let err = BoothConfig::from_json(r#"{ "countdown": 5 }"#).unwrap_err();
    assert!(matches!(err, PhotoboothError::Config(_)));
}

#[test]
fn load_reports_missing_file() {
    let path = std::env::temp_dir().join("photobooth-config-does-not-exist.json");
    let err = BoothConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("photobooth-config-does-not-exist.json"));
}

#[test]
fn load_reads_json_file() {
    let path = std::env::temp_dir().join(format!("photobooth-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "jpeg_quality": 85 }"#).unwrap();
    let cfg = BoothConfig::load(&path).unwrap();
    assert_eq!(cfg.jpeg_quality, 85);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn overrides_replace_file_values() {
    let mut cfg = BoothConfig::default();
    cfg.apply_overrides_from(vars(&[
        (ENV_EXPORT_DIR, "/tmp/booth"),
        (ENV_DECODE_THREADS, "2"),
        (ENV_JPEG_QUALITY, " 90 "),
    ]));
    assert_eq!(cfg.export_dir, PathBuf::from("/tmp/booth"));
    assert_eq!(cfg.decode_threads, Some(2));
    assert_eq!(cfg.jpeg_quality, 90);
}

#[test]
fn unparsable_overrides_are_ignored() {
    let mut cfg = BoothConfig::default();
    cfg.apply_overrides_from(vars(&[
        (ENV_DECODE_THREADS, "many"),
        (ENV_JPEG_QUALITY, "300"),
        (ENV_EXPORT_DIR, "  "),
    ]));
    assert_eq!(cfg, BoothConfig::default());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let bad = [
        BoothConfig {
            jpeg_quality: 0,
            ..Default::default()
        },
        BoothConfig {
            countdown_secs: 0,
            ..Default::default()
        },
        BoothConfig {
            decode_threads: Some(0),
            ..Default::default()
        },
        BoothConfig {
            camera: CameraConstraints { width: 0, height: 720 },
            ..Default::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(PhotoboothError::Config(_))), "{cfg:?}");
    }
}

#[test]
fn compositor_opts_follow_config() {
    let cfg = BoothConfig {
        jpeg_quality: 80,
        pattern_tile_px: 40,
        decode_threads: Some(3),
        ..Default::default()
    };
    let opts = cfg.compositor_opts();
    assert_eq!(opts.jpeg_quality, 80);
    assert_eq!(opts.pattern_tile_px, 40);
    assert_eq!(opts.decode_threads, Some(3));
}
