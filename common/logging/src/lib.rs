use slog::Logger;
use sloggers::Build;

pub use sloggers::types::Severity;

/// Return a logger suitable for test usage.
///
/// By default no logs will be printed, but they can be enabled via the `test_logger` feature:
///
/// ```bash
/// $ cargo test -p validator_service --features 'logging/test_logger'
/// ```
pub fn test_logger() -> Logger {
    if cfg!(feature = "test_logger") {
        terminal_logger(Severity::Debug)
    } else {
        sloggers::null::NullLoggerBuilder
            .build()
            .unwrap_or_else(|_| Logger::root(slog::Discard, slog::o!()))
    }
}

/// Builds a logger that writes to stderr at `level` and above.
///
/// Falls back to a discarding logger if the terminal cannot be set up.
pub fn terminal_logger(level: Severity) -> Logger {
    sloggers::terminal::TerminalLoggerBuilder::new()
        .level(level)
        .destination(sloggers::terminal::Destination::Stderr)
        .build()
        .unwrap_or_else(|_| Logger::root(slog::Discard, slog::o!()))
}
