use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `RUST_LOG`-filtered subscriber writing to stderr.
///
/// Does nothing unless `RUST_LOG` is set, and runs at most once per
/// process. A host that already installed a global subscriber keeps it.
/// `RUST_LOG=luma_value=trace` shows every metamethod dispatch;
/// `RUST_LOG=luma_value=debug` shows finalizer activity.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        // Stderr keeps diagnostics out of the stdout print sink.
        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already installed; keeping it");
        }
    });
}
