use clap::Parser;
use std::process;

mod cli;
mod commands;
mod config;
mod context;
mod format;
mod version;

use cli::Cli;
use context::AppContext;

fn main() {
    let cli = Cli::parse();

    if cli.version {
        version::print_version();
        return;
    }

    let ctx = match AppContext::build(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            let choice = cli.color.unwrap_or_default();
            format::create_formatter(choice).error(&e.to_string());
            process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = commands::scan::run(&ctx, &mut out) {
        format::error(&ctx, &e);
        process::exit(1);
    }
}
