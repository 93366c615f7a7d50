use clap::Parser;
use keydo::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();

    let options = match keydo::cli::resolve(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let log_guard = keydo::logging::init(&options.data_dir);
    let result = keydo::tui::run(options);
    if let Err(ref e) = result {
        tracing::error!(error = %e, "popup exited with error");
    }
    // Flush the log before a possible process::exit
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
