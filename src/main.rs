use clap::Parser;
use colored::Colorize;

use snaplink::cli::{Cli, Commands};
use snaplink::config::{get_config, init_config_from};
use snaplink::errors::SnaplinkError;
use snaplink::runtime::modes::{run_cli, run_server};
use snaplink::system::init_logging;

fn report_fatal(err: &anyhow::Error) {
    match err.downcast_ref::<SnaplinkError>() {
        Some(e) => eprintln!("{}", e.format_colored()),
        None => eprintln!("{} {:#}", "[ERROR]".red().bold(), err),
    }
}

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = init_config_from(cli.config.as_deref()) {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    let config = get_config();

    let result = match cli.command {
        None | Some(Commands::Serve) => {
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };
            run_server(&config).await
        }
        Some(command) => run_cli(command, &config).await,
    };

    if let Err(e) = result {
        report_fatal(&e);
        std::process::exit(1);
    }
}
