use clap::Parser;

use setup_cli::{cli, commands, logging};

fn main() {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log = logging::Logger::new(args.verbose);
    install_interrupt_handler();

    let result = match args.command.unwrap_or(cli::Command::Setup) {
        cli::Command::Setup => commands::setup::run(&args.global, &log),
        cli::Command::Version => {
            let version = option_env!("SETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("setup {version}");
            Ok(())
        }
    };

    if let Err(e) = result {
        log.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Catch Ctrl-C once at the top level and turn it into a short message and a
/// clean exit instead of a stack trace. Files already written stay as-is.
fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        eprintln!("\n\x1b[31mProcess interrupted by user.\x1b[0m");
        std::process::exit(130);
    });
    if let Err(e) = result {
        eprintln!("\x1b[33mWARN\x1b[0m  could not install interrupt handler: {e}");
    }
}
