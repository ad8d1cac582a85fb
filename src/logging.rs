use std::env;
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber used by the `paramstore` binary.
///
/// Values go to stdout, so log lines stay on stderr and can be separated in
/// a pipe. `RUST_LOG` filters, defaulting to `info`.
pub fn init_logging() {
    let ansi = color_choice(
        |name| env::var_os(name).is_some(),
        std::io::stderr().is_terminal(),
    );
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .with(env_filter)
        .init();
}

/// NO_COLOR / PARAMSTORE_NO_COLOR win over FORCE_COLOR / PARAMSTORE_FORCE_COLOR;
/// with neither set, color only when stderr is a terminal.
fn color_choice(is_set: impl Fn(&str) -> bool, stderr_is_tty: bool) -> bool {
    if is_set("NO_COLOR") || is_set("PARAMSTORE_NO_COLOR") {
        false
    } else if is_set("FORCE_COLOR") || is_set("PARAMSTORE_FORCE_COLOR") {
        true
    } else {
        stderr_is_tty
    }
}
