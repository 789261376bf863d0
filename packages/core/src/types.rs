use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Live-preview embed attached to a project.
///
/// A project carries at most one embed, so StackBlitz and CodePen links can
/// never both be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum Embed {
    #[default]
    None,
    Stackblitz(String),
    Codepen(String),
}

impl Embed {
    /// URL of the embed, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Embed::None => None,
            Embed::Stackblitz(url) | Embed::Codepen(url) => Some(url),
        }
    }

    pub fn is_codepen(&self) -> bool {
        matches!(self, Embed::Codepen(_))
    }
}

/// The two label collections a project can reference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Category,
    Tag,
}

impl LabelKind {
    /// Plural collection name, also used as the project field name
    pub fn collection(&self) -> &'static str {
        match self {
            LabelKind::Category => "categories",
            LabelKind::Tag => "tags",
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Category => write!(f, "Category"),
            LabelKind::Tag => write!(f, "Tag"),
        }
    }
}

impl FromStr for LabelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "category" | "categories" => Ok(LabelKind::Category),
            "tag" | "tags" => Ok(LabelKind::Tag),
            other => Err(format!("Unknown label kind: {}", other)),
        }
    }
}

/// A showcased project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "demoUrl")]
    pub demo_url: String,
    #[serde(rename = "repoUrl")]
    pub repo_url: String,
    #[serde(default)]
    pub embed: Embed,
    #[serde(default)]
    pub featured: bool,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Build a new project record from validated input
    pub fn from_input(id: String, input: ProjectInput, now: DateTime<Utc>) -> Self {
        Project {
            id,
            title: input.title,
            description: input.description,
            image: input.image,
            demo_url: input.demo_url,
            repo_url: input.repo_url,
            embed: input.embed,
            featured: input.featured,
            categories: input.categories,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field, keeping id and creation time
    pub fn replace_with(&mut self, input: ProjectInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.description = input.description;
        self.image = input.image;
        self.demo_url = input.demo_url;
        self.repo_url = input.repo_url;
        self.embed = input.embed;
        self.featured = input.featured;
        self.categories = input.categories;
        self.tags = input.tags;
        self.updated_at = now;
    }

    /// The label set of the given kind
    pub fn labels(&self, kind: LabelKind) -> &[String] {
        match kind {
            LabelKind::Category => &self.categories,
            LabelKind::Tag => &self.tags,
        }
    }

    pub fn labels_mut(&mut self, kind: LabelKind) -> &mut Vec<String> {
        match kind {
            LabelKind::Category => &mut self.categories,
            LabelKind::Tag => &mut self.tags,
        }
    }

    pub fn has_label(&self, kind: LabelKind, name: &str) -> bool {
        self.labels(kind).iter().any(|label| label == name)
    }
}

/// Input for creating a project or replacing an existing one
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "demoUrl")]
    pub demo_url: String,
    #[serde(rename = "repoUrl")]
    pub repo_url: String,
    #[serde(default)]
    pub embed: Embed,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&Project> for ProjectInput {
    fn from(project: &Project) -> Self {
        ProjectInput {
            title: project.title.clone(),
            description: project.description.clone(),
            image: project.image.clone(),
            demo_url: project.demo_url.clone(),
            repo_url: project.repo_url.clone(),
            embed: project.embed.clone(),
            featured: project.featured,
            categories: project.categories.clone(),
            tags: project.tags.clone(),
        }
    }
}
