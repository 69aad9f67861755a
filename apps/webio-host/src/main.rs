//! WebIO headless host entry point.
//!
//! Reads newline-delimited JSON events (`{"event": ..., "payload": ...}`)
//! from stdin, feeds them to a mounted console and prints the resulting
//! container as HTML on stdout once input ends.

mod config;
mod host;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use host::Host;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the HTML.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting WebIO host");

    let path = config::config_path(std::env::args().nth(1));
    let setup = match config::load(path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Default::default()
        }
    };

    let host = Host::new(setup)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if let Err(e) = host.dispatch_line(&line) {
            tracing::warn!(line = line_no, error = %e, "skipping event line");
        }
    }

    println!("{}", host.html());
    host.shutdown();
    Ok(())
}
