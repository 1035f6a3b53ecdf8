use std::env;

use burn::tensor::backend::Backend as BackendTrait;
use burn_wgpu::{self, RuntimeOptions, Wgpu, graphics};
use tracing::warn;

pub type WgpuDevice = <Wgpu<f32> as BackendTrait>::Device;

pub const WGPU_BACKEND_ENV: &str = "NANOGPT_WGPU_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsApi {
    Auto,
    Vulkan,
    Dx12,
    Metal,
    OpenGl,
}

impl GraphicsApi {
    /// Parse an API name. Returns `None` for unrecognized names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Some(Self::Auto),
            "vulkan" => Some(Self::Vulkan),
            "dx12" | "directx" => Some(Self::Dx12),
            "metal" => Some(Self::Metal),
            "opengl" | "gl" => Some(Self::OpenGl),
            _ => None,
        }
    }

    fn from_env() -> Self {
        let raw = env::var(WGPU_BACKEND_ENV).unwrap_or_default();
        Self::parse(&raw).unwrap_or_else(|| {
            warn!("unsupported {WGPU_BACKEND_ENV} value '{raw}', falling back to auto");
            Self::Auto
        })
    }
}

/// Initialize the global wgpu runtime for `device`.
///
/// The graphics API comes from `NANOGPT_WGPU_BACKEND` (`auto`, `vulkan`, `dx12`,
/// `metal` or `opengl`).
pub fn init_runtime(device: &WgpuDevice) {
    if matches!(device, WgpuDevice::Existing(_)) {
        return;
    }

    let options = RuntimeOptions::default();
    match GraphicsApi::from_env() {
        GraphicsApi::Auto => {
            burn_wgpu::init_setup::<graphics::AutoGraphicsApi>(device, options);
        }
        GraphicsApi::Vulkan => {
            burn_wgpu::init_setup::<graphics::Vulkan>(device, options);
        }
        GraphicsApi::Dx12 => {
            burn_wgpu::init_setup::<graphics::Dx12>(device, options);
        }
        GraphicsApi::Metal => {
            burn_wgpu::init_setup::<graphics::Metal>(device, options);
        }
        GraphicsApi::OpenGl => {
            burn_wgpu::init_setup::<graphics::OpenGl>(device, options);
        }
    }
}
