use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const TINY_SHAKESPEARE_URL: &str =
    "https://raw.githubusercontent.com/karpathy/char-rnn/master/data/tinyshakespeare/input.txt";

/// Optimization schedule of a training run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingHyperparameters {
    /// Independent sequences processed per step.
    pub batch_size: usize,
    /// Maximum context length per sequence.
    pub block_size: usize,
    pub max_iters: usize,
    /// Steps between loss evaluations.
    pub eval_interval: usize,
    pub learning_rate: f64,
    /// Batches averaged per evaluation.
    pub eval_iters: usize,
}

impl Default for TrainingHyperparameters {
    fn default() -> Self {
        Self {
            batch_size: 64,
            block_size: 256,
            max_iters: 5000,
            eval_interval: 500,
            learning_rate: 3e-4,
            eval_iters: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelHyperparameters {
    pub n_embd: usize,
    pub n_head: usize,
    pub n_layer: usize,
    pub dropout: f64,
}

impl Default for ModelHyperparameters {
    fn default() -> Self {
        Self {
            n_embd: 384,
            n_head: 6,
            n_layer: 6,
            dropout: 0.2,
        }
    }
}

impl ModelHyperparameters {
    pub fn head_size(&self) -> usize {
        self.n_embd / self.n_head.max(1)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DevicePreference {
    /// Accelerator when one is available, CPU otherwise.
    #[default]
    Auto,
    Cuda,
    Wgpu,
    Cpu,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    pub preference: DevicePreference,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Download on every run, overwriting the local copy.
    #[default]
    Always,
    /// Reuse the local copy when it exists.
    IfMissing,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub url: String,
    pub cache_dir: PathBuf,
    pub file_name: String,
    pub refresh: RefreshPolicy,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: TINY_SHAKESPEARE_URL.to_string(),
            cache_dir: PathBuf::from("."),
            file_name: "input.txt".to_string(),
            refresh: RefreshPolicy::default(),
        }
    }
}

impl DatasetConfig {
    pub fn local_path(&self) -> PathBuf {
        self.cache_dir.join(&self.file_name)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    pub training: TrainingHyperparameters,
    pub model: ModelHyperparameters,
    pub device: DeviceConfig,
    pub dataset: DatasetConfig,
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<()> {
        let training = &self.training;
        if training.batch_size == 0 {
            bail!("training.batch_size must be positive");
        }
        if training.block_size == 0 {
            bail!("training.block_size must be positive");
        }
        if training.eval_interval == 0 {
            bail!("training.eval_interval must be positive");
        }
        if training.eval_iters == 0 {
            bail!("training.eval_iters must be positive");
        }
        if !training.learning_rate.is_finite() || training.learning_rate <= 0.0 {
            bail!(
                "training.learning_rate must be a positive finite number, got {}",
                training.learning_rate
            );
        }

        let model = &self.model;
        if model.n_head == 0 {
            bail!("model.n_head must be positive");
        }
        if model.n_layer == 0 {
            bail!("model.n_layer must be positive");
        }
        if model.n_embd == 0 || !model.n_embd.is_multiple_of(model.n_head) {
            bail!(
                "model.n_embd ({}) must be a positive multiple of model.n_head ({})",
                model.n_embd,
                model.n_head
            );
        }
        if !(0.0..=1.0).contains(&model.dropout) {
            bail!("model.dropout must lie in [0, 1], got {}", model.dropout);
        }

        if self.dataset.url.trim().is_empty() {
            bail!("dataset.url must not be empty");
        }
        if self.dataset.file_name.trim().is_empty() {
            bail!("dataset.file_name must not be empty");
        }

        Ok(())
    }
}
