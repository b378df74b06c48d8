use clap::Parser;
use punchlist::cli::commands::Cli;
use punchlist::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let dir = cli.dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = punchlist::tui::run(dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
