// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, create the master
//   client and hand it to the UI loop.
// - Returns `anyhow::Result` to simplify error handling.

use textstats_cli::api::{MasterClient, ProcessingResult, RequestObserver};
use textstats_cli::ui::main_menu;
use tracing_subscriber::EnvFilter;

/// Observer that reports request activity through `tracing`. The client core
/// itself never logs; this is the only place logging is wired in.
struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request_start(&self, endpoint: &str) {
        tracing::info!(endpoint, "request started");
    }

    fn on_request_complete(&self, endpoint: &str, result: &ProcessingResult) {
        if result.success {
            tracing::info!(
                endpoint,
                letters = result.letters_count,
                numbers = result.numbers_count,
                time_ms = result.processing_time_ms,
                "request completed"
            );
        } else {
            tracing::warn!(endpoint, error = %result.error_message, "request failed");
        }
    }

    fn on_health_checked(&self, healthy: bool) {
        if healthy {
            tracing::info!("master is healthy");
        } else {
            tracing::warn!("master health check failed");
        }
    }
}

/// Parse a positional port argument. Port 0 is not a usable endpoint, so it
/// is rejected along with anything non-numeric.
fn parse_port_arg(raw: &str) -> Option<u16> {
    match raw.parse() {
        Ok(p) if p > 0 => Some(p),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Positional arguments: [host] [port], defaulting to localhost:8080.
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port = match args.next() {
        Some(raw) => parse_port_arg(&raw).unwrap_or_else(|| {
            eprintln!("Invalid port '{raw}', using 8080.");
            8080
        }),
        None => 8080,
    };

    let client = MasterClient::new(&host, port).with_observer(Box::new(TracingObserver));

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(client)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_port_arg;

    #[test]
    fn port_argument_rejects_zero_and_garbage() {
        assert_eq!(parse_port_arg("8080"), Some(8080));
        assert_eq!(parse_port_arg("1"), Some(1));
        assert_eq!(parse_port_arg("65535"), Some(65535));
        assert_eq!(parse_port_arg("0"), None);
        assert_eq!(parse_port_arg("65536"), None);
        assert_eq!(parse_port_arg("eight"), None);
        assert_eq!(parse_port_arg(""), None);
    }
}
