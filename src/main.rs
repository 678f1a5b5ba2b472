use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use log::debug;

use notify_watch::cli::Args;
use notify_watch::client::send_watch_command;
use notify_watch::path::resolve_project_path;
use notify_watch::{configure_log, Error};

fn run(args: Args) -> anyhow::Result<()> {
    let project_path = resolve_project_path(&args.project_path)?;
    let config = args.client_config();
    debug!("Config: {:?}", config);

    send_watch_command(&config, &project_path)?;
    println!(
        "✅ Sent watch command for: {}",
        project_path.display().to_string().green()
    );
    Ok(())
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<Error>() {
        Some(Error::ServerNotRunning { addr, source }) => {
            eprintln!(
                "{}",
                format!("❌ Connection to {addr} failed ({source}) - is the injection server running?")
                    .red()
                    .bold()
            );
            eprintln!("   Make sure the InjectionNext app is running");
        }
        Some(e @ Error::PathNotFound(_)) => {
            eprintln!("{}", format!("❌ {e}").red());
        }
        _ => {
            eprintln!("{}", format!("❌ Error: {e}").red());
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = configure_log() {
        eprintln!("Failed to configure logging: {e}");
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit();
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}
