use anyhow::{Context, Result};
use teller::{bank::Bank, bin_utils::Shell};
use tracing_subscriber::EnvFilter;

const DEFAULT_STATE_PATH: &str = "bank_state.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let state_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string());
    let bank = Bank::open(&state_path)
        .with_context(|| format!("Failed to open ledger state `{state_path}`"))?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let shell = Shell {
        input: stdin.lock(),
        output: &mut stdout,
        bank,
    };
    shell.run()
}
