//! CLI mode
//!
//! Link and config management straight against the configured store,
//! without a running server.

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::services::LinkService;
use crate::storage::StorageFactory;

async fn open_service(config: &StaticConfig) -> Result<LinkService> {
    let store = StorageFactory::create(&config.database)
        .await
        .context("Failed to open storage")?;
    Ok(LinkService::from_config(store, &config.allocator))
}

fn generate_config(output_path: Option<String>, force: bool) -> Result<()> {
    let Some(path) = output_path else {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    };

    if Path::new(&path).exists() && !force {
        bail!("{} already exists, use --force to overwrite", path);
    }

    StaticConfig::default()
        .save_to_file(&path)
        .with_context(|| format!("Failed to write {}", path))?;
    println!(
        "{} Sample configuration written to {}",
        "✓".bold().green(),
        path.cyan()
    );
    Ok(())
}

/// Run a management command
///
/// `Serve` is handled by the caller and never reaches here.
pub async fn run_cli(command: Commands, config: &StaticConfig) -> Result<()> {
    match command {
        Commands::Serve => bail!("serve is not a CLI command"),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => generate_config(output_path, force),
        Commands::Add { target_url } => {
            let service = open_service(config).await?;
            let link = service.create_link(&target_url).await?;
            println!(
                "{} Added short link: {} -> {}",
                "✓".bold().green(),
                link.code.cyan(),
                link.target_url.blue().underline()
            );
            Ok(())
        }
        Commands::List => {
            let service = open_service(config).await?;
            let links = service.list_links().await?;

            if links.is_empty() {
                println!("{} No short links found", "ℹ".bold().blue());
                return Ok(());
            }

            println!("{}", "Short link list:".bold().green());
            println!();
            for link in &links {
                println!(
                    "  {} -> {} {}",
                    link.code.cyan(),
                    link.target_url.blue().underline(),
                    format!("(updated: {})", link.updated_at.format("%Y-%m-%d %H:%M:%S UTC"))
                        .dimmed()
                );
            }
            println!();
            println!(
                "{} Total {} short links",
                "ℹ".bold().blue(),
                links.len().to_string().green()
            );
            Ok(())
        }
        Commands::Update {
            short_code,
            target_url,
        } => {
            let service = open_service(config).await?;
            let link = service.update_link(&short_code, &target_url).await?;
            println!(
                "{} Updated short link: {} -> {}",
                "✓".bold().green(),
                link.code.cyan(),
                link.target_url.blue().underline()
            );
            Ok(())
        }
        Commands::Remove { short_code } => {
            let service = open_service(config).await?;
            service.delete_link(&short_code).await?;
            println!(
                "{} Deleted short link: {}",
                "✓".bold().green(),
                short_code.cyan()
            );
            Ok(())
        }
    }
}
