//! Process-level setup shared by every frontend.

use std::io::{self, IsTerminal};

use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::error::{GameError, GameResult};
use crate::formatter::FrameFormatter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber.
///
/// Output goes to stdout through [`FrameFormatter`], colored only when stdout is a
/// terminal. `RUST_LOG` overrides the default filter.
pub fn init_tracing() -> GameResult<()> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(io::stdout().is_terminal())
                .event_format(FrameFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameError::InvalidState(format!("Failed to set tracing subscriber: {e}")))
}

/// Sleeps for `duration`, spinning near the end for accurate frame pacing.
#[cfg(feature = "sdl")]
pub fn sleep(duration: std::time::Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}
