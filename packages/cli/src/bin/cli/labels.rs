use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use folio_projects::{CascadeReport, CatalogManager, LabelKind};
use inquire::Confirm;

#[derive(Subcommand)]
pub enum LabelsCommands {
    /// List labels with how many projects use each
    List {
        /// Case-insensitive substring filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a new label
    Add {
        name: String,
    },
    /// Rename a label and every project reference to it
    Rename {
        old_name: String,
        new_name: String,
    },
    /// Delete a label and strip it from every project
    Delete {
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_labels_command(
    manager: &CatalogManager,
    kind: LabelKind,
    command: LabelsCommands,
) -> anyhow::Result<()> {
    match command {
        LabelsCommands::List { search } => list_labels(manager, kind, search.as_deref()).await,
        LabelsCommands::Add { name } => {
            manager.add_label(kind, &name).await?;
            println!("{} Added {} '{}'", "✓".green(), kind, name);
            Ok(())
        }
        LabelsCommands::Rename { old_name, new_name } => {
            let report = manager.rename_label(kind, &old_name, &new_name).await?;
            println!(
                "{} Renamed {} '{}' to '{}'",
                "✓".green(),
                kind,
                old_name,
                new_name
            );
            print_cascade(&report);
            Ok(())
        }
        LabelsCommands::Delete { name, yes } => delete_label(manager, kind, &name, yes).await,
    }
}

async fn list_labels(
    manager: &CatalogManager,
    kind: LabelKind,
    search: Option<&str>,
) -> anyhow::Result<()> {
    let usage = manager.label_usage(kind, search).await;

    if usage.is_empty() {
        println!("{}", format!("No {} found", kind.collection()).yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![kind.to_string(), "Projects".to_string()]);

    for label in &usage {
        table.add_row(vec![label.name.clone(), label.usage_count.to_string()]);
    }

    println!("{}", table);
    println!("Total: {} {}", usage.len().to_string().cyan(), kind.collection());

    Ok(())
}

async fn delete_label(
    manager: &CatalogManager,
    kind: LabelKind,
    name: &str,
    yes: bool,
) -> anyhow::Result<()> {
    let usage = manager.usage_count(kind, name).await?;

    if !yes {
        let prompt = format!(
            "Delete {} '{}'? It is used by {} project(s).",
            kind, name, usage
        );
        let confirmed = Confirm::new(&prompt).with_default(false).prompt()?;
        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    let report = manager.delete_label(kind, name).await?;
    println!("{} Deleted {} '{}'", "✓".green(), kind, name);
    print_cascade(&report);

    Ok(())
}

fn print_cascade(report: &CascadeReport) {
    if report.affected_projects.is_empty() {
        return;
    }
    println!(
        "  Updated {} project(s)",
        report.affected_projects.len().to_string().cyan()
    );
    if !report.emptied_projects.is_empty() {
        println!(
            "  {} {} project(s) now have no {}: {}",
            "!".yellow().bold(),
            report.emptied_projects.len(),
            report.kind.collection(),
            report.emptied_projects.join(", ")
        );
    }
}
