/* ------------------------------------------------------------------ */
/* Compute device, chosen once per process                           */
/* ------------------------------------------------------------------ */
//
// CUDA first, then Metal, else CPU. Both GPU backends only exist when the
// matching cargo feature is enabled; without it candle reports an error
// (or falls back to CPU for CUDA) and we stay on the CPU.

use std::panic::{self, AssertUnwindSafe};

use candle_core::Device;
use tracing::{info, warn};

use crate::config::USE_GPU;

lazy_static::lazy_static! {
    pub static ref DEVICE: Device = select_device(USE_GPU);
}

pub fn select_device(use_gpu: bool) -> Device {
    if !use_gpu {
        return Device::Cpu;
    }

    match Device::cuda_if_available(0) {
        Ok(dev) if dev.is_cuda() => {
            info!("CUDA device enabled");
            return dev;
        }
        Ok(_) => {}
        Err(e) => warn!("CUDA unavailable: {e}"),
    }

    // Metal init can panic on machines without a usable GPU.
    match panic::catch_unwind(AssertUnwindSafe(|| Device::new_metal(0))) {
        Ok(Ok(dev)) => {
            info!("Metal device enabled: {dev:?}");
            dev
        }
        Ok(Err(_)) => Device::Cpu,
        Err(_) => {
            warn!("Metal unavailable (initialization panicked), using CPU");
            Device::Cpu
        }
    }
}
