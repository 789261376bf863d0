// ABOUTME: HTTP request handlers for the public showcase
// ABOUTME: Featured items plus a filtered, load-more window of regular items

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;

use super::extract::ApiQuery;
use super::response::ok;
use crate::pagination::PageParams;
use crate::query::{ShowcaseQuery, ShowcaseSource};
use crate::state::CatalogState;

/// Query string for the showcase: `categories` is comma separated
#[derive(Debug, Default, Deserialize)]
pub struct ShowcaseParams {
    pub categories: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub source: ShowcaseSource,
}

impl ShowcaseParams {
    pub fn into_query(self, default_page_size: usize) -> ShowcaseQuery {
        let categories = self
            .categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        ShowcaseQuery {
            categories,
            search: self.search.unwrap_or_default(),
            page: PageParams::new(
                self.page.unwrap_or(1),
                self.page_size.unwrap_or(default_page_size),
            ),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SourceParams {
    #[serde(default)]
    pub source: ShowcaseSource,
}

/// Featured items and the regular items up to the requested page
pub async fn get_showcase(
    State(state): State<CatalogState>,
    ApiQuery(params): ApiQuery<ShowcaseParams>,
) -> impl IntoResponse {
    let source = params.source;
    let query = params.into_query(state.page_size);
    info!(
        "Showcase request: source={:?} categories={:?} search='{}' page={}",
        source,
        query.categories,
        query.search,
        query.page.page()
    );

    let page = state.manager.showcase(source, &query).await;
    ok(StatusCode::OK, page)
}

/// Categories available as filter chips
pub async fn list_showcase_categories(
    State(state): State<CatalogState>,
    ApiQuery(params): ApiQuery<SourceParams>,
) -> impl IntoResponse {
    let categories = state.manager.available_categories(params.source).await;
    ok(StatusCode::OK, categories)
}
