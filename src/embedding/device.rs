use candle_core::Device;

/// Selects the compute device based on enabled features (falls back to CPU).
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                tracing::info!("Using Metal GPU acceleration");
                return device;
            }
            Err(e) => tracing::warn!(error = %e, "Metal device unavailable"),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                tracing::info!("Using CUDA GPU acceleration");
                return device;
            }
            Err(e) => tracing::warn!(error = %e, "CUDA device unavailable"),
        }
    }

    #[cfg(any(feature = "metal", feature = "cuda"))]
    {
        tracing::warn!("Falling back to CPU device");
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    {
        tracing::debug!("No GPU backend compiled, using CPU");
    }

    Device::Cpu
}
