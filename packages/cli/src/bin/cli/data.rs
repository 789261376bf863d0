use clap::Subcommand;
use colored::*;
use folio_projects::{CatalogManager, CatalogSnapshot};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DataCommands {
    /// Write the whole catalog as JSON
    Export {
        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the whole catalog with a JSON export
    Import {
        /// File produced by `folio export`
        file: PathBuf,
    },
    /// Show catalog and storage statistics
    Stats,
}

pub async fn handle_data_command(
    manager: &CatalogManager,
    command: DataCommands,
) -> anyhow::Result<()> {
    match command {
        DataCommands::Export { output } => {
            let snapshot = manager.export().await;
            let json = serde_json::to_string_pretty(&snapshot)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!(
                        "{} Exported {} projects to {}",
                        "✓".green(),
                        snapshot.projects.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        DataCommands::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let snapshot: CatalogSnapshot = serde_json::from_str(&content)?;
            let summary = manager.import(snapshot).await?;
            println!(
                "{} Imported {} projects, {} categories, {} tags",
                "✓".green(),
                summary.projects,
                summary.categories,
                summary.tags
            );
            Ok(())
        }
        DataCommands::Stats => {
            let stats = manager.storage_manager().get_stats().await?;
            println!("{}", "📊 Catalog Statistics".blue().bold());
            println!();
            println!("{:<15} {}", "Storage:".cyan(), stats.provider);
            if let Some(location) = &stats.location {
                println!("{:<15} {}", "Location:".cyan(), location);
            }
            println!("{:<15} {}", "Projects:".cyan(), stats.total_projects);
            println!("{:<15} {}", "Featured:".cyan(), stats.featured_projects);
            println!("{:<15} {}", "CodePens:".cyan(), stats.codepen_projects);
            println!("{:<15} {}", "Categories:".cyan(), stats.total_categories);
            println!("{:<15} {}", "Tags:".cyan(), stats.total_tags);
            Ok(())
        }
    }
}
