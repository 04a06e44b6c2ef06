use clap::Parser;

mod args;
mod materials;
mod quote;

use args::{Args, Commands};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let stdout = std::io::stdout().lock();
    match args.command {
        Commands::Quote(args) => quote::quote_command(args, stdout),
        Commands::Materials(args) => materials::materials_command(args, stdout),
    }
}
