use std::{any::Any, backtrace::Backtrace};

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber and routes panics through it. `RUST_LOG`
/// overrides `default_filter`. Calling it again is a no-op.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if fmt().with_env_filter(filter).with_target(false).try_init().is_ok() {
        std::panic::set_hook(Box::new(|info| {
            let message = panic_message(info.payload());
            let location = info
                .location()
                .map(ToString::to_string)
                .unwrap_or_else(|| "<unknown>".to_string());
            tracing::error!(
                panic = %message,
                location = %location,
                backtrace = %Backtrace::capture(),
                "panic"
            );
        }));
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
