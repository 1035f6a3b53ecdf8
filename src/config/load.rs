use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toml::Value;
use toml::map::Map;

use super::{BootstrapConfig, ConfigOverrides};

/// Load a bootstrap configuration from layered TOML files.
///
/// Files are applied in order; tables merge key by key so a later file only needs
/// to name the values it overrides. The merged document is validated before it is
/// returned.
pub fn load_bootstrap_config(paths: &[PathBuf]) -> Result<BootstrapConfig> {
    resolve_bootstrap_config(paths, &ConfigOverrides::default())
}

/// Merge `paths`, apply `overrides` on top, then validate the result once.
pub fn resolve_bootstrap_config(
    paths: &[PathBuf],
    overrides: &ConfigOverrides,
) -> Result<BootstrapConfig> {
    let mut config = merge_config_files(paths)?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Layer order for a run: `base` when it exists, then each extra file as given.
pub fn config_layers(base: &Path, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut layers = Vec::with_capacity(extra.len() + 1);
    if base.is_file() {
        layers.push(base.to_path_buf());
    }
    layers.extend(extra.iter().cloned());
    layers
}

fn merge_config_files(paths: &[PathBuf]) -> Result<BootstrapConfig> {
    let mut merged = Value::Table(Map::new());

    for path in paths {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let layer: Value = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        merge_value(&mut merged, layer);
    }

    merged
        .try_into::<BootstrapConfig>()
        .context("failed to deserialize merged configuration")
}

fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base), Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
