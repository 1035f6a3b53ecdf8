use std::env;
use std::fmt;
use std::path::Path;

use anyhow::{Result, bail};
use burn::tensor::backend::Backend as BackendTrait;
use burn_ndarray::NdArray;
use tracing::debug;

use crate::config::DevicePreference;
use crate::wgpu::{WgpuDevice, init_runtime};

#[cfg(feature = "cuda")]
pub use burn_cuda::CudaDevice;

pub type CpuDevice = <NdArray<f32> as BackendTrait>::Device;

const CUDA_VISIBLE_DEVICES: &str = "CUDA_VISIBLE_DEVICES";
const NVIDIA_DRIVER_MARKERS: [&str; 2] = ["/dev/nvidiactl", "/proc/driver/nvidia/version"];

/// Where tensors of a run live. `Cpu` is the fallback when no accelerator is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeTarget {
    Cuda,
    Wgpu,
    Cpu,
}

impl ComputeTarget {
    pub fn is_accelerator(self) -> bool {
        !matches!(self, ComputeTarget::Cpu)
    }

    pub fn name(self) -> &'static str {
        match self {
            ComputeTarget::Cuda => "cuda",
            ComputeTarget::Wgpu => "wgpu",
            ComputeTarget::Cpu => "cpu",
        }
    }
}

impl fmt::Display for ComputeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability query answering whether a CUDA accelerator can be used.
pub trait AcceleratorProbe {
    fn cuda_available(&self) -> bool;
}

/// Probes the host: requires the `cuda` feature, an NVIDIA driver and at least one
/// device left visible by `CUDA_VISIBLE_DEVICES`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl AcceleratorProbe for SystemProbe {
    fn cuda_available(&self) -> bool {
        if !cfg!(feature = "cuda") {
            return false;
        }
        let driver_present = NVIDIA_DRIVER_MARKERS
            .iter()
            .any(|marker| Path::new(marker).exists());
        let visible = env::var(CUDA_VISIBLE_DEVICES).ok();
        cuda_devices_visible(visible.as_deref(), driver_present)
    }
}

/// Probe with a predetermined answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

impl AcceleratorProbe for FixedProbe {
    fn cuda_available(&self) -> bool {
        self.0
    }
}

fn cuda_devices_visible(visible_devices: Option<&str>, driver_present: bool) -> bool {
    if !driver_present {
        return false;
    }
    match visible_devices.map(str::trim) {
        None => true,
        Some("") | Some("-1") => false,
        Some(_) => true,
    }
}

/// Resolve a device preference into a concrete target, probing at most once.
pub fn select_compute_target(
    preference: DevicePreference,
    probe: &impl AcceleratorProbe,
) -> Result<ComputeTarget> {
    let target = match preference {
        DevicePreference::Auto => {
            if probe.cuda_available() {
                ComputeTarget::Cuda
            } else {
                ComputeTarget::Cpu
            }
        }
        DevicePreference::Cuda => {
            if !probe.cuda_available() {
                if cfg!(feature = "cuda") {
                    bail!("cuda device requested but no visible CUDA device was found");
                }
                bail!(
                    "cuda device requested but this build lacks `cuda` feature; rebuild with `--features cuda`"
                );
            }
            ComputeTarget::Cuda
        }
        DevicePreference::Wgpu => ComputeTarget::Wgpu,
        DevicePreference::Cpu => ComputeTarget::Cpu,
    };
    debug!("resolved device preference {preference:?} to {target}");
    Ok(target)
}

/// A materialized backend device for a [`ComputeTarget`].
#[derive(Debug, Clone)]
pub enum ComputeDevice {
    #[cfg(feature = "cuda")]
    Cuda(CudaDevice),
    Wgpu(WgpuDevice),
    Cpu(CpuDevice),
}

impl ComputeDevice {
    /// Build the default device for `target`, initializing the wgpu runtime when needed.
    pub fn open(target: ComputeTarget) -> Result<Self> {
        match target {
            ComputeTarget::Cuda => {
                #[cfg(feature = "cuda")]
                {
                    Ok(ComputeDevice::Cuda(CudaDevice::new(0)))
                }
                #[cfg(not(feature = "cuda"))]
                {
                    bail!("cuda target selected but this build lacks `cuda` feature")
                }
            }
            ComputeTarget::Wgpu => {
                let device = WgpuDevice::default();
                init_runtime(&device);
                Ok(ComputeDevice::Wgpu(device))
            }
            ComputeTarget::Cpu => Ok(ComputeDevice::Cpu(CpuDevice::default())),
        }
    }

    pub fn target(&self) -> ComputeTarget {
        match self {
            #[cfg(feature = "cuda")]
            ComputeDevice::Cuda(_) => ComputeTarget::Cuda,
            ComputeDevice::Wgpu(_) => ComputeTarget::Wgpu,
            ComputeDevice::Cpu(_) => ComputeTarget::Cpu,
        }
    }
}
