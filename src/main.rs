//! `osavl` - reads `k`/`m`/`n` commands from stdin and answers them with an
//! order-statistic AVL set. See [`protocol`] for the command language.
//!
//! ```bash
//! echo "k 5 k 3 k 8 m 2 n 6" | osavl
//! RUST_LOG=osavl=trace osavl < commands.txt
//! ```

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod protocol;

use protocol::CommandError;

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .compact()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn log_failure(err: &CommandError) {
    match err {
        CommandError::Duplicate(key) => error!(key, "duplicate key rejected"),
        CommandError::WrongIndex(index) => error!(index, "rank out of range"),
        CommandError::Io(io_err) => error!(%io_err, "i/o failure"),
        other => error!(error = %other, "malformed command stream"),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());

    let status = match protocol::run(stdin, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            // Protocol errors are part of the stdout transcript.
            if !matches!(err, CommandError::Io(_)) {
                if let Err(write_err) = writeln!(stdout, "{err}") {
                    error!(%write_err, "failed to report error");
                }
            }
            ExitCode::FAILURE
        }
    };

    if let Err(err) = stdout.flush() {
        error!(%err, "failed to flush stdout");
        return ExitCode::FAILURE;
    }
    status
}
