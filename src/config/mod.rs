pub mod core;
pub mod load;
mod overrides;

pub use core::{
    BootstrapConfig, DatasetConfig, DeviceConfig, DevicePreference, ModelHyperparameters,
    RefreshPolicy, TINY_SHAKESPEARE_URL, TrainingHyperparameters,
};
pub use load::{config_layers, load_bootstrap_config, resolve_bootstrap_config};
pub use overrides::ConfigOverrides;
