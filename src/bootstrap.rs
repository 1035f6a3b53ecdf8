use anyhow::{Context, Result};
use tracing::info;

use crate::config::BootstrapConfig;
use crate::dataset::{Corpus, FetchReport, fetch_dataset};
use crate::device::{AcceleratorProbe, ComputeTarget, SystemProbe, select_compute_target};

/// Everything a training run needs from the bootstrap step.
#[derive(Debug, Clone)]
pub struct BootstrapOutput {
    pub target: ComputeTarget,
    pub fetch: FetchReport,
    pub corpus: Corpus,
}

/// One-shot startup sequence: pick the compute target, fetch the corpus, load it.
pub struct Bootstrap<P: AcceleratorProbe = SystemProbe> {
    config: BootstrapConfig,
    probe: P,
}

impl Bootstrap<SystemProbe> {
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        Self::with_probe(config, SystemProbe)
    }
}

impl<P: AcceleratorProbe> Bootstrap<P> {
    pub fn with_probe(config: BootstrapConfig, probe: P) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, probe })
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn run(&self) -> Result<BootstrapOutput> {
        log_hyperparameters(&self.config);

        let target = select_compute_target(self.config.device.preference, &self.probe)
            .context("failed to select compute target")?;
        info!("compute target: {target}");

        let dataset = &self.config.dataset;
        let path = dataset.local_path();
        let fetch = fetch_dataset(&dataset.url, &path, dataset.refresh)
            .with_context(|| format!("failed to fetch dataset from {}", dataset.url))?;

        let corpus = Corpus::load(&fetch.path)
            .with_context(|| format!("failed to load corpus {}", fetch.path.display()))?;
        info!("{}", corpus.summary());

        Ok(BootstrapOutput {
            target,
            fetch,
            corpus,
        })
    }
}

fn log_hyperparameters(config: &BootstrapConfig) {
    let training = &config.training;
    let model = &config.model;
    info!(
        "training: batch_size={}, block_size={}, max_iters={}, eval_interval={}, eval_iters={}, lr={}",
        training.batch_size,
        training.block_size,
        training.max_iters,
        training.eval_interval,
        training.eval_iters,
        training.learning_rate
    );
    info!(
        "model: n_embd={}, n_head={} (head_size={}), n_layer={}, dropout={}",
        model.n_embd,
        model.n_head,
        model.head_size(),
        model.n_layer,
        model.dropout
    );
}
