// ABOUTME: Showcase filtering, search, and load-more feed
// ABOUTME: Featured items are split out; regular items are filtered then windowed

use folio_core::Project;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::pagination::{PageMeta, PageParams, DEFAULT_PAGE_SIZE};

/// Featured items in full plus the filtered regular items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    pub featured: Vec<Project>,
    pub regular: Vec<Project>,
}

fn matches_categories(project: &Project, selected: &[String]) -> bool {
    selected.is_empty() || project.categories.iter().any(|c| selected.contains(c))
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// `needle` must already be lowercased and non-empty
fn matches_term(project: &Project, needle: &str) -> bool {
    project.title.to_lowercase().contains(needle)
        || project.description.to_lowercase().contains(needle)
        || project.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Split `items` into featured and regular, then keep regular items that
/// share a category with `categories` (any of them) and match `search` in
/// title, description or a tag. Input order is preserved.
pub fn filter(items: &[Project], categories: &[String], search: &str) -> FilterResult {
    let needle = normalize_term(search);
    let mut result = FilterResult::default();

    for item in items {
        if item.featured {
            result.featured.push(item.clone());
        } else if matches_categories(item, categories)
            && (needle.is_empty() || matches_term(item, &needle))
        {
            result.regular.push(item.clone());
        }
    }

    result
}

/// Which items a showcase draws from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ShowcaseSource {
    /// Every project in insertion order
    #[default]
    Projects,
    /// Only projects with a CodePen embed
    Codepens,
    /// Projects and CodePens alternated
    Combined,
}

impl ShowcaseSource {
    pub fn select(&self, projects: &[Project]) -> Vec<Project> {
        match self {
            ShowcaseSource::Projects => projects.to_vec(),
            ShowcaseSource::Codepens => projects
                .iter()
                .filter(|p| p.embed.is_codepen())
                .cloned()
                .collect(),
            ShowcaseSource::Combined => {
                let (pens, others): (Vec<Project>, Vec<Project>) =
                    projects.iter().cloned().partition(|p| p.embed.is_codepen());
                interleave(&others, &pens)
            }
        }
    }
}

impl TryFrom<String> for ShowcaseSource {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for ShowcaseSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "projects" | "all" => Ok(ShowcaseSource::Projects),
            "codepens" => Ok(ShowcaseSource::Codepens),
            "combined" => Ok(ShowcaseSource::Combined),
            other => Err(format!("Unknown showcase source: {}", other)),
        }
    }
}

/// A stateless showcase request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowcaseQuery {
    pub categories: Vec<String>,
    pub search: String,
    pub page: PageParams,
}

/// Featured items plus the regular items revealed up to the requested page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcasePage {
    pub featured: Vec<Project>,
    pub items: Vec<Project>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

pub fn showcase(items: &[Project], query: &ShowcaseQuery) -> ShowcasePage {
    let filtered = filter(items, &query.categories, &query.search);
    let end = query.page.window_end(filtered.regular.len());
    let meta = PageMeta::new(&query.page, filtered.regular.len());

    let mut regular = filtered.regular;
    regular.truncate(end);

    ShowcasePage {
        featured: filtered.featured,
        items: regular,
        meta,
    }
}

/// Handle for one in-flight "load more"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    page: usize,
}

impl LoadTicket {
    pub fn page(&self) -> usize {
        self.page
    }
}

/// Stateful load-more view over a list of projects.
///
/// Every filter change rebuilds the first page and bumps the generation, so a
/// ticket issued before the change is rejected by `complete`.
#[derive(Debug, Clone)]
pub struct Feed {
    items: Vec<Project>,
    page_size: usize,
    categories: Vec<String>,
    search: String,
    filtered: FilterResult,
    visible: Vec<Project>,
    page: usize,
    has_more: bool,
    generation: u64,
    pending: Option<u64>,
}

impl Feed {
    pub fn new(items: Vec<Project>, page_size: usize) -> Self {
        let mut feed = Self {
            items,
            page_size: PageParams::first(page_size).page_size(),
            categories: Vec::new(),
            search: String::new(),
            filtered: FilterResult::default(),
            visible: Vec::new(),
            page: 1,
            has_more: false,
            generation: 0,
            pending: None,
        };
        feed.reset();
        feed
    }

    fn reset(&mut self) {
        self.filtered = filter(&self.items, &self.categories, &self.search);
        let first = PageParams::first(self.page_size);
        self.visible = self.filtered.regular[first.page_range(self.filtered.regular.len())].to_vec();
        self.page = 1;
        self.has_more = first.has_more(self.filtered.regular.len());
        self.generation += 1;
        self.pending = None;
    }

    pub fn set_filters(&mut self, categories: Vec<String>, search: impl Into<String>) {
        self.categories = categories;
        self.search = search.into();
        self.reset();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.reset();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
        self.reset();
    }

    /// Add the category to the selection, or remove it if already selected
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(index) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(index);
        } else {
            self.categories.push(category.to_string());
        }
        self.reset();
    }

    pub fn clear_filters(&mut self) {
        self.categories.clear();
        self.search.clear();
        self.reset();
    }

    /// Start loading the next page. Returns None while a load is pending or
    /// when nothing is left to load.
    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        if self.pending.is_some() || !self.has_more {
            return None;
        }
        self.pending = Some(self.generation);
        Some(LoadTicket {
            generation: self.generation,
            page: self.page + 1,
        })
    }

    /// Apply a loaded page. Returns false and changes nothing when the
    /// filters changed after the ticket was issued.
    pub fn complete(&mut self, ticket: LoadTicket) -> bool {
        if ticket.generation != self.generation || self.pending != Some(ticket.generation) {
            return false;
        }

        let params = PageParams::new(ticket.page, self.page_size);
        let total = self.filtered.regular.len();
        self.visible
            .extend_from_slice(&self.filtered.regular[params.page_range(total)]);
        self.page = ticket.page;
        self.has_more = params.has_more(total);
        self.pending = None;
        true
    }

    /// Begin and complete a load in one step
    pub fn load_more(&mut self) -> bool {
        match self.begin_load_more() {
            Some(ticket) => self.complete(ticket),
            None => false,
        }
    }

    pub fn featured(&self) -> &[Project] {
        &self.filtered.featured
    }

    pub fn visible(&self) -> &[Project] {
        &self.visible
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Regular items matching the current filters
    pub fn total(&self) -> usize {
        self.filtered.regular.len()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn search(&self) -> &str {
        &self.search
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_PAGE_SIZE)
    }
}

/// Sorted unique categories referenced by `items`
pub fn available_categories(items: &[Project]) -> Vec<String> {
    items
        .iter()
        .flat_map(|p| p.categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Labels containing `term`, case-insensitively
pub fn search_labels<'a, I>(labels: I, term: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let needle = normalize_term(term);
    labels
        .into_iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Admin search: title, description, tags or categories
pub fn search_projects(projects: &[Project], term: &str) -> Vec<Project> {
    let needle = normalize_term(term);
    projects
        .iter()
        .filter(|p| {
            needle.is_empty()
                || matches_term(p, &needle)
                || p.categories.iter().any(|c| c.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Alternate items from `a` and `b`, starting with `a`; leftovers go last
pub fn interleave<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let mut left = a.iter();
    let mut right = b.iter();

    loop {
        match (left.next(), right.next()) {
            (None, None) => break,
            (x, y) => {
                merged.extend(x.cloned());
                merged.extend(y.cloned());
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{codepen, featured, numbered_projects, project};
    use pretty_assertions::assert_eq;

    fn ids(items: &[Project]) -> Vec<&str> {
        items.iter().map(|p| p.id.as_str()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_featured_split_and_unfiltered() {
        let items = vec![
            featured(project("f1", "Flagship", &["Games"], &["Rust"])),
            project("r1", "Regular", &["Web"], &["React"]),
        ];

        let result = filter(&items, &strings(&["Web"]), "react");
        assert_eq!(ids(&result.featured), vec!["f1"]);
        assert_eq!(ids(&result.regular), vec!["r1"]);
    }

    #[test]
    fn test_category_filter_is_or() {
        let items = vec![
            project("a", "Only A", &["A"], &["x"]),
            project("c", "Only C", &["C"], &["x"]),
            project("ac", "A and C", &["A", "C"], &["x"]),
            project("b", "Only B", &["B"], &["x"]),
        ];

        let result = filter(&items, &strings(&["A", "B"]), "");
        assert_eq!(ids(&result.regular), vec!["a", "ac", "b"]);
    }

    #[test]
    fn test_search_matches_tag_case_insensitively() {
        let items = vec![
            project("t", "Todo list", &["Web"], &["React"]),
            project("w", "Weather", &["Web"], &["Vue"]),
        ];

        let result = filter(&items, &[], "  react ");
        assert_eq!(ids(&result.regular), vec!["t"]);
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let mut described = project("d", "Plain", &["Web"], &["Go"]);
        described.description = "A CHART dashboard".to_string();
        let items = vec![
            project("t", "Chart maker", &["Web"], &["Go"]),
            described,
            project("n", "Nothing", &["Web"], &["Go"]),
        ];

        let result = filter(&items, &[], "chart");
        assert_eq!(ids(&result.regular), vec!["t", "d"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let items = numbered_projects(3);
        let result = filter(&items, &strings(&["Nope"]), "");
        assert!(result.regular.is_empty());
        assert_eq!(filter(&items, &[], "").regular.len(), 3);
    }

    #[test]
    fn test_feed_load_more_sequence() {
        let mut feed = Feed::new(numbered_projects(13), 6);
        let mut visible = vec![feed.visible().len()];
        let mut has_more = vec![feed.has_more()];

        while feed.load_more() {
            visible.push(feed.visible().len());
            has_more.push(feed.has_more());
        }

        assert_eq!(visible, vec![6, 12, 13]);
        assert_eq!(has_more, vec![true, true, false]);
        assert_eq!(feed.page(), 3);
        assert_eq!(ids(&feed.visible()[12..]), vec!["p13"]);
    }

    #[test]
    fn test_filter_change_resets_to_first_page() {
        let mut items = numbered_projects(13);
        items[0].tags = vec!["Special".to_string()];
        items[1].tags = vec!["Special".to_string()];

        let mut feed = Feed::new(items, 6);
        feed.load_more();
        assert_eq!(feed.visible().len(), 12);

        feed.set_search("special");
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.visible().len(), 2);
        assert!(!feed.has_more());

        feed.clear_filters();
        assert_eq!(feed.visible().len(), 6);
    }

    #[test]
    fn test_one_load_at_a_time() {
        let mut feed = Feed::new(numbered_projects(20), 6);
        let ticket = feed.begin_load_more().unwrap();
        assert!(feed.is_loading());
        assert!(feed.begin_load_more().is_none());

        assert!(feed.complete(ticket));
        assert!(!feed.is_loading());
        assert_eq!(feed.visible().len(), 12);

        // Completing the same ticket again must not append twice
        assert!(!feed.complete(ticket));
        assert_eq!(feed.visible().len(), 12);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut feed = Feed::new(numbered_projects(20), 6);
        let ticket = feed.begin_load_more().unwrap();
        let generation = feed.generation();

        feed.toggle_category("Web App");
        assert!(feed.generation() > generation);
        assert!(!feed.is_loading());

        assert!(!feed.complete(ticket));
        assert_eq!(feed.visible().len(), 6);
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.categories(), &["Web App".to_string()]);
    }

    #[test]
    fn test_nothing_more_to_load() {
        let mut feed = Feed::new(numbered_projects(4), 6);
        assert!(!feed.has_more());
        assert!(feed.begin_load_more().is_none());
        assert!(!feed.load_more());
    }

    #[test]
    fn test_showcase_window() {
        let mut items = numbered_projects(13);
        items.insert(0, featured(project("f", "Featured", &["Games"], &["Rust"])));

        let query = ShowcaseQuery {
            page: PageParams::new(2, 6),
            ..Default::default()
        };
        let page = showcase(&items, &query);

        assert_eq!(ids(&page.featured), vec!["f"]);
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.meta.total_items, 13);
        assert!(page.meta.has_more);
    }

    #[test]
    fn test_sources() {
        let items = vec![
            project("a", "A", &["Web"], &["x"]),
            project("b", "B", &["Web"], &["x"]),
            codepen(project("c", "C", &["Web"], &["x"])),
        ];

        assert_eq!(ids(&ShowcaseSource::Codepens.select(&items)), vec!["c"]);
        assert_eq!(ids(&ShowcaseSource::Combined.select(&items)), vec!["a", "c", "b"]);
        assert_eq!(ids(&ShowcaseSource::Projects.select(&items)), vec!["a", "b", "c"]);
        assert_eq!("all".parse::<ShowcaseSource>().unwrap(), ShowcaseSource::Projects);
        assert!("pens".parse::<ShowcaseSource>().is_err());
    }

    #[test]
    fn test_available_categories() {
        let items = vec![
            project("a", "A", &["Web", "Games"], &["x"]),
            project("b", "B", &["AI/ML", "Web"], &["x"]),
        ];
        assert_eq!(available_categories(&items), vec!["AI/ML", "Games", "Web"]);
    }

    #[test]
    fn test_search_labels() {
        let labels = strings(&["JavaScript", "Java", "Rust"]);
        assert_eq!(search_labels(&labels, "JAVA"), vec!["JavaScript", "Java"]);
        assert_eq!(search_labels(&labels, "").len(), 3);
    }

    #[test]
    fn test_search_projects_includes_categories() {
        let items = vec![
            project("a", "Alpha", &["Machine Learning"], &["Python"]),
            project("b", "Beta", &["Web"], &["Go"]),
        ];
        assert_eq!(ids(&search_projects(&items, "learning")), vec!["a"]);
        assert_eq!(ids(&search_projects(&items, "go")), vec!["b"]);
    }

    #[test]
    fn test_interleave() {
        assert_eq!(interleave(&[1, 3, 5, 7], &[2, 4]), vec![1, 2, 3, 4, 5, 7]);
        assert_eq!(interleave::<u8>(&[], &[9]), vec![9]);
    }
}
