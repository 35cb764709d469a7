use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing with compact console output.
/// Respects `RUST_LOG` if set, defaults to `info` (and keeps wgpu quiet).
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}
