use std::fs;
use std::path::PathBuf;

use nanogpt_bootstrap::{
    BootstrapConfig, ConfigOverrides, DevicePreference, RefreshPolicy, config_layers,
    load_bootstrap_config, resolve_bootstrap_config,
};
use tempfile::tempdir;

#[test]
fn base_config_matches_defaults() {
    let config = load_bootstrap_config(&[PathBuf::from("config/base.toml")]).expect("load base");
    assert_eq!(config, BootstrapConfig::default());
}

#[test]
fn no_files_yields_defaults() {
    let config = load_bootstrap_config(&[]).expect("load defaults");
    assert_eq!(config, BootstrapConfig::default());
}

#[test]
fn later_files_override_individual_keys() {
    let dir = tempdir().expect("tempdir");
    let small = dir.path().join("small.toml");
    fs::write(
        &small,
        r#"
[training]
block_size = 64
batch_size = 16

[model]
n_embd = 128
n_head = 4

[device]
preference = "cpu"

[dataset]
cache_dir = "data"
refresh = "if_missing"
"#,
    )
    .expect("write override");

    let config = load_bootstrap_config(&[PathBuf::from("config/base.toml"), small])
        .expect("load layered");

    assert_eq!(config.training.block_size, 64);
    assert_eq!(config.training.batch_size, 16);
    assert_eq!(config.training.max_iters, 5000);
    assert_eq!(config.model.n_embd, 128);
    assert_eq!(config.model.n_head, 4);
    assert_eq!(config.model.n_layer, 6);
    assert_eq!(config.model.dropout, 0.2);
    assert_eq!(config.device.preference, DevicePreference::Cpu);
    assert_eq!(config.dataset.refresh, RefreshPolicy::IfMissing);
    assert_eq!(config.dataset.local_path(), PathBuf::from("data/input.txt"));
}

#[test]
fn invalid_override_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[model]\ndropout = 1.5\n").expect("write override");

    let err = load_bootstrap_config(&[bad]).unwrap_err();
    assert!(format!("{err:#}").contains("dropout"), "{err:#}");
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let typo = dir.path().join("typo.toml");
    fs::write(&typo, "[training]\nmax_iter = 10\n").expect("write override");

    assert!(load_bootstrap_config(&[typo]).is_err());
}

#[test]
fn missing_file_names_path() {
    let err = load_bootstrap_config(&[PathBuf::from("config/does-not-exist.toml")]).unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist.toml"), "{err:#}");
}

#[test]
fn layers_start_with_existing_base() {
    let extra = vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")];

    let layers = config_layers(&PathBuf::from("config/base.toml"), &extra);
    assert_eq!(
        layers,
        vec![
            PathBuf::from("config/base.toml"),
            PathBuf::from("a.toml"),
            PathBuf::from("b.toml"),
        ]
    );

    let layers = config_layers(&PathBuf::from("config/missing.toml"), &extra);
    assert_eq!(layers, extra);
}

#[test]
fn flags_beat_config_files() {
    let dir = tempdir().expect("tempdir");
    let local = dir.path().join("local.toml");
    fs::write(
        &local,
        "[device]\npreference = \"wgpu\"\n\n[dataset]\nrefresh = \"always\"\ncache_dir = \"from-file\"\n",
    )
    .expect("write override");

    let overrides = ConfigOverrides {
        device: Some(DevicePreference::Cpu),
        refresh: Some(RefreshPolicy::IfMissing),
        cache_dir: Some(PathBuf::from("from-flag")),
        url: Some("http://127.0.0.1:9/input.txt".to_string()),
    };
    let layers = config_layers(&PathBuf::from("config/base.toml"), &[local]);
    let config = resolve_bootstrap_config(&layers, &overrides).expect("resolve");

    assert_eq!(config.device.preference, DevicePreference::Cpu);
    assert_eq!(config.dataset.refresh, RefreshPolicy::IfMissing);
    assert_eq!(config.dataset.cache_dir, PathBuf::from("from-flag"));
    assert_eq!(config.dataset.url, "http://127.0.0.1:9/input.txt");
    assert_eq!(config.training.block_size, 256);
}

#[test]
fn absent_flags_keep_file_values() {
    let layers = config_layers(&PathBuf::from("config/base.toml"), &[]);
    let config = resolve_bootstrap_config(&layers, &ConfigOverrides::default()).expect("resolve");
    assert_eq!(config, BootstrapConfig::default());
}

#[test]
fn empty_url_flag_is_rejected() {
    let overrides = ConfigOverrides {
        url: Some(String::new()),
        ..ConfigOverrides::default()
    };

    let err = resolve_bootstrap_config(&[PathBuf::from("config/base.toml")], &overrides)
        .unwrap_err();
    assert!(format!("{err:#}").contains("dataset.url"), "{err:#}");
}

#[test]
fn flag_repairs_invalid_file_value() {
    let dir = tempdir().expect("tempdir");
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[dataset]\nurl = \"\"\n").expect("write override");

    assert!(load_bootstrap_config(&[broken.clone()]).is_err());

    let overrides = ConfigOverrides {
        url: Some("http://127.0.0.1:9/input.txt".to_string()),
        ..ConfigOverrides::default()
    };
    let config = resolve_bootstrap_config(&[broken], &overrides).expect("flag fixes url");
    assert_eq!(config.dataset.url, "http://127.0.0.1:9/input.txt");
}
