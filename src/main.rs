use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use newsdesk::cli::{Cli, Command};
use newsdesk::commands::{self, Services};
use newsdesk::logging::{init_tracing, LogMode};
use newsdesk::ui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    let mode = if command == Command::Tui {
        LogMode::Tui
    } else {
        LogMode::Cli
    };
    init_tracing(mode);

    let services = Services::from_cli(&cli)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    if command == Command::Tui {
        ui::runtime::run(services, runtime.handle().clone()).context("Terminal UI failed")?;
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    runtime.block_on(commands::execute(&command, &services, &mut stdout))
}
