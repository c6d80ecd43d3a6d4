mod account;
mod customer;
mod money;
mod services;
mod session;

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::session::Prefill;

/// Interactive single-account teller console.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Customer name, pre-filling the first prompt
    #[arg(long)]
    name: Option<String>,

    /// Customer email, pre-filling the second prompt
    #[arg(long)]
    email: Option<String>,
}

fn main() {
    let args = Args::parse();

    // Diagnostics go to stderr behind RUST_LOG; stdout belongs to the
    // conversation with the user.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let prefill = Prefill {
        name: args.name,
        email: args.email,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    if let Err(err) = session::run(&mut input, &mut output, prefill) {
        drop(output);
        println!("An unexpected error occurred: {err}");
        std::process::exit(1);
    }
}
