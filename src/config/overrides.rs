use std::path::PathBuf;

use super::{BootstrapConfig, DevicePreference, RefreshPolicy};

/// Values supplied on the command line; each one replaces the layered file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub device: Option<DevicePreference>,
    pub refresh: Option<RefreshPolicy>,
    pub cache_dir: Option<PathBuf>,
    pub url: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut BootstrapConfig) {
        if let Some(device) = self.device {
            config.device.preference = device;
        }
        if let Some(refresh) = self.refresh {
            config.dataset.refresh = refresh;
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.dataset.cache_dir = cache_dir.clone();
        }
        if let Some(url) = &self.url {
            config.dataset.url = url.clone();
        }
    }
}
