pub mod bootstrap;
pub mod config;
pub mod dataset;
pub mod device;
pub mod wgpu;

pub use bootstrap::{Bootstrap, BootstrapOutput};
pub use config::{
    BootstrapConfig, ConfigOverrides, DatasetConfig, DeviceConfig, DevicePreference,
    ModelHyperparameters, RefreshPolicy, TrainingHyperparameters, config_layers,
    load_bootstrap_config, resolve_bootstrap_config,
};
pub use dataset::{Corpus, FetchReport, fetch_dataset};
pub use device::{
    AcceleratorProbe, ComputeDevice, ComputeTarget, FixedProbe, SystemProbe,
    select_compute_target,
};
