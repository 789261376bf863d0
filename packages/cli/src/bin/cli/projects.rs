use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use folio_projects::{CatalogManager, Embed, Project};
use inquire::Confirm;

#[derive(Subcommand)]
pub enum ProjectsCommands {
    /// List all projects
    List {
        /// Only projects whose title, description, or labels match
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show project details
    Show {
        /// Project ID to show
        id: String,
    },
    /// Delete a project
    Delete {
        /// Project ID to delete
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_projects_command(
    manager: &CatalogManager,
    command: ProjectsCommands,
) -> anyhow::Result<()> {
    match command {
        ProjectsCommands::List { search } => list_projects(manager, search.as_deref()).await,
        ProjectsCommands::Show { id } => show_project(manager, &id).await,
        ProjectsCommands::Delete { id, yes } => delete_project(manager, &id, yes).await,
    }
}

async fn list_projects(manager: &CatalogManager, search: Option<&str>) -> anyhow::Result<()> {
    let projects = match search {
        Some(term) => manager.search_projects(term).await,
        None => manager.list_projects().await,
    };

    if projects.is_empty() {
        println!("{}", "No projects found".yellow());
        return Ok(());
    }

    println!("{}", "📂 Folio Projects".blue().bold());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Title", "Featured", "Embed", "Categories", "Tags", "Updated"]);

    for project in &projects {
        table.add_row(vec![
            project.id.clone(),
            folio_core::truncate(&project.title, 25),
            (if project.featured { "★" } else { "" }).to_string(),
            embed_kind(&project.embed).to_string(),
            folio_core::truncate(&join_or_dash(&project.categories), 25),
            folio_core::truncate(&join_or_dash(&project.tags), 25),
            project.updated_at.format("%Y-%m-%d").to_string(),
        ]);
    }

    println!("{}", table);
    println!("Total: {} projects", projects.len().to_string().cyan());

    Ok(())
}

async fn show_project(manager: &CatalogManager, id: &str) -> anyhow::Result<()> {
    let project = manager.get_project(id).await?;

    println!(
        "{}",
        format!("📂 Project Details - {}", project.title).blue().bold()
    );
    println!();
    print_project_details(&project);

    Ok(())
}

async fn delete_project(manager: &CatalogManager, id: &str, yes: bool) -> anyhow::Result<()> {
    let project = manager.get_project(id).await?;

    if !yes {
        let confirmed = Confirm::new(&format!("Delete project '{}'?", project.title))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    manager.delete_project(id).await?;
    println!("{} Deleted '{}'", "✓".green(), project.title);

    Ok(())
}

fn print_project_details(project: &Project) {
    println!("{:<15} {}", "ID:".cyan(), project.id);
    println!("{:<15} {}", "Title:".cyan(), project.title);
    println!("{:<15} {}", "Description:".cyan(), project.description);
    println!("{:<15} {}", "Image:".cyan(), project.image);
    println!("{:<15} {}", "Demo:".cyan(), project.demo_url);
    println!("{:<15} {}", "Repository:".cyan(), project.repo_url);
    if let Some(url) = project.embed.url() {
        println!(
            "{:<15} {} ({})",
            "Embed:".cyan(),
            url,
            embed_kind(&project.embed)
        );
    }
    let featured = if project.featured {
        "Yes".green()
    } else {
        "No".dimmed()
    };
    println!("{:<15} {}", "Featured:".cyan(), featured);
    println!("{:<15} {}", "Categories:".cyan(), join_or_dash(&project.categories));
    println!("{:<15} {}", "Tags:".cyan(), join_or_dash(&project.tags));
    println!("{:<15} {}", "Created:".cyan(), project.created_at.to_rfc3339());
    println!("{:<15} {}", "Updated:".cyan(), project.updated_at.to_rfc3339());
}

fn embed_kind(embed: &Embed) -> &'static str {
    match embed {
        Embed::None => "",
        Embed::Stackblitz(_) => "StackBlitz",
        Embed::Codepen(_) => "CodePen",
    }
}

fn join_or_dash(labels: &[String]) -> String {
    if labels.is_empty() {
        "—".to_string()
    } else {
        labels.join(", ")
    }
}
