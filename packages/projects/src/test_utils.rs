//! Fixtures shared by unit and integration tests

use chrono::{Duration, TimeZone, Utc};
use folio_core::{Embed, Project, ProjectInput};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// A valid project with fixed timestamps
pub fn project(id: &str, title: &str, categories: &[&str], tags: &[&str]) -> Project {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("About {}", title),
        image: "https://example.com/image.png".to_string(),
        demo_url: "https://example.com/demo".to_string(),
        repo_url: "https://github.com/example/repo".to_string(),
        embed: Embed::None,
        featured: false,
        categories: strings(categories),
        tags: strings(tags),
        created_at: created,
        updated_at: created + Duration::seconds(1),
    }
}

pub fn featured(mut project: Project) -> Project {
    project.featured = true;
    project
}

pub fn codepen(mut project: Project) -> Project {
    project.embed = Embed::Codepen(format!("https://codepen.io/example/pen/{}", project.id));
    project
}

/// A valid create/replace payload
pub fn input(title: &str, categories: &[&str], tags: &[&str]) -> ProjectInput {
    ProjectInput {
        title: title.to_string(),
        description: format!("About {}", title),
        image: "https://example.com/image.png".to_string(),
        demo_url: "https://example.com/demo".to_string(),
        repo_url: "https://github.com/example/repo".to_string(),
        embed: Embed::None,
        featured: false,
        categories: strings(categories),
        tags: strings(tags),
    }
}

/// `count` regular projects all in category "Web App" tagged "Rust"
pub fn numbered_projects(count: usize) -> Vec<Project> {
    (1..=count)
        .map(|n| project(&format!("p{}", n), &format!("Project {}", n), &["Web App"], &["Rust"]))
        .collect()
}
