//! Axum + Askama web UI for the hackathon discovery pipeline.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use hackscope_catalog::load_workspace_catalog;
use hackscope_core::{
    Category, Difficulty, HackathonRecord, Mode, SortKey, Status, PRIZE_RANGES,
};
use hackscope_query::{discover, FilterState, ParsedTokens};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const CRATE_NAME: &str = "hackscope-web";

#[derive(Clone)]
pub struct AppState {
    pub workspace_root: PathBuf,
}

impl AppState {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }
}

/// Listing query parameters. Multi-value filters arrive as single
/// comma-separated params so the whole filter state round-trips through
/// one flat query string.
#[derive(Debug, Deserialize, Default)]
struct DiscoveryParams {
    q: Option<String>,
    category: Option<String>,
    status: Option<String>,
    difficulty: Option<String>,
    mode: Option<String>,
    prize: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
    per_page: Option<usize>,
}

impl DiscoveryParams {
    fn filter_state(&self) -> FilterState {
        FilterState {
            search_text: self.q.clone().unwrap_or_default(),
            selected_categories: split_csv(&self.category),
            selected_statuses: split_csv(&self.status),
            selected_difficulties: split_csv(&self.difficulty),
            selected_modes: split_csv(&self.mode),
            selected_prize_ranges: split_range_indices(&self.prize),
            sort_by: self
                .sort
                .as_deref()
                .and_then(SortKey::parse)
                .unwrap_or_default(),
        }
    }
}

fn split_csv(value: &Option<String>) -> BTreeSet<String> {
    value
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn split_range_indices(value: &Option<String>) -> BTreeSet<usize> {
    value
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .filter(|idx| *idx < PRIZE_RANGES.len())
        .collect()
}

#[derive(Debug, Clone)]
struct CardRow {
    id: String,
    title: String,
    organizer: String,
    location: String,
    category: &'static str,
    status: &'static str,
    prize: String,
    window: String,
    registrations: u64,
}

impl CardRow {
    fn from_record(record: &HackathonRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            organizer: record.organizer.clone(),
            location: record.location.clone(),
            category: record.category.label(),
            status: record.status.label(),
            prize: prize_text(record),
            window: window_text(record),
            registrations: record.registration_count(),
        }
    }
}

fn prize_text(record: &HackathonRecord) -> String {
    match record.prize_amount {
        Some(amount) if amount > 0 => format!("${amount}"),
        _ => "no prize listed".to_string(),
    }
}

fn window_text(record: &HackathonRecord) -> String {
    format!(
        "{} to {}",
        record.start_date.format("%Y-%m-%d"),
        record.end_date.format("%Y-%m-%d")
    )
}

#[derive(Debug, Clone)]
struct FacetRow {
    value: String,
    label: String,
    count: usize,
    selected: bool,
}

#[derive(Debug, Clone)]
struct FacetGroup {
    param: &'static str,
    title: &'static str,
    rows: Vec<FacetRow>,
}

fn facet_groups(records: &[HackathonRecord], state: &FilterState) -> Vec<FacetGroup> {
    let categories = Category::ALL
        .iter()
        .map(|category| FacetRow {
            value: category.label().to_string(),
            label: category.label().to_string(),
            count: records.iter().filter(|r| r.category == *category).count(),
            selected: state.selected_categories.contains(category.label()),
        })
        .collect();
    let statuses = Status::ALL
        .iter()
        .map(|status| FacetRow {
            value: status.label().to_string(),
            label: status.label().to_string(),
            count: records.iter().filter(|r| r.status == *status).count(),
            selected: state.selected_statuses.contains(status.label()),
        })
        .collect();
    let difficulties = Difficulty::ALL
        .iter()
        .map(|difficulty| FacetRow {
            value: difficulty.label().to_string(),
            label: difficulty.label().to_string(),
            count: records
                .iter()
                .filter(|r| r.difficulty == Some(*difficulty))
                .count(),
            selected: state.selected_difficulties.contains(difficulty.label()),
        })
        .collect();
    let modes = Mode::ALL
        .iter()
        .map(|mode| FacetRow {
            value: mode.label().to_string(),
            label: mode.label().to_string(),
            count: records.iter().filter(|r| r.mode == Some(*mode)).count(),
            selected: state.selected_modes.contains(mode.label()),
        })
        .collect();
    let prize_ranges = PRIZE_RANGES
        .iter()
        .enumerate()
        .map(|(idx, range)| FacetRow {
            value: idx.to_string(),
            label: range.label.to_string(),
            count: records.iter().filter(|r| range.contains(r.prize())).count(),
            selected: state.selected_prize_ranges.contains(&idx),
        })
        .collect();

    vec![
        FacetGroup {
            param: "category",
            title: "Category",
            rows: categories,
        },
        FacetGroup {
            param: "status",
            title: "Status",
            rows: statuses,
        },
        FacetGroup {
            param: "difficulty",
            title: "Difficulty",
            rows: difficulties,
        },
        FacetGroup {
            param: "mode",
            title: "Mode",
            rows: modes,
        },
        FacetGroup {
            param: "prize",
            title: "Prize pool",
            rows: prize_ranges,
        },
    ]
}

#[derive(Debug, Clone)]
struct SortOptionRow {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    total_hackathons: usize,
    total_live: usize,
    total_upcoming: usize,
    total_prize_pool: u64,
}

#[derive(Template)]
#[template(path = "hackathons.html")]
struct HackathonsPageTemplate {
    query_text: String,
    sort_options: Vec<SortOptionRow>,
}

#[derive(Template)]
#[template(path = "hackathons_table_partial.html")]
struct HackathonsTablePartialTemplate {
    cards: Vec<CardRow>,
    page: usize,
    total_pages: usize,
    total_matches: usize,
}

#[derive(Template)]
#[template(path = "hackathons_facets_partial.html")]
struct HackathonsFacetsPartialTemplate {
    groups: Vec<FacetGroup>,
}

#[derive(Template)]
#[template(path = "hackathon_detail.html")]
struct HackathonDetailTemplate {
    title: String,
    description: String,
    organizer: String,
    location: String,
    category: &'static str,
    status: &'static str,
    difficulty: String,
    mode: String,
    window: String,
    prize: String,
    registrations: u64,
    tags_text: String,
}

/// JSON shape returned by `/api/hackathons`: the paginated matches plus
/// the parsed token state for chip rendering.
#[derive(Debug, Serialize)]
struct DiscoveryResponse {
    total: usize,
    page: usize,
    total_pages: usize,
    tokens: ParsedTokens,
    items: Vec<HackathonRecord>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/hackathons", get(hackathons_page_handler))
        .route("/hackathons/table", get(hackathons_table_handler))
        .route("/hackathons/facets", get(hackathons_facets_handler))
        .route("/hackathons/{id}", get(hackathon_detail_handler))
        .route("/api/hackathons", get(api_hackathons_handler))
        .route("/assets/static/app.css", get(app_css_handler))
        .with_state(Arc::new(state))
}

pub async fn serve_from_env() -> anyhow::Result<()> {
    let port: u16 = std::env::var("HACKSCOPE_WEB_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let state = AppState::new(".");
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    match load_records(&state.workspace_root).await {
        Ok(records) => {
            let tpl = IndexTemplate {
                total_hackathons: records.len(),
                total_live: records.iter().filter(|r| r.status == Status::Live).count(),
                total_upcoming: records
                    .iter()
                    .filter(|r| r.status == Status::Upcoming)
                    .count(),
                total_prize_pool: records.iter().map(|r| r.prize()).sum(),
            };
            render_html(tpl)
        }
        Err(err) => server_error(err),
    }
}

async fn hackathons_page_handler(Query(params): Query<DiscoveryParams>) -> Response {
    let state = params.filter_state();
    let sort_options = SortKey::ALL
        .iter()
        .map(|key| SortOptionRow {
            value: key.as_str(),
            label: key.label(),
            selected: *key == state.sort_by,
        })
        .collect();
    render_html(HackathonsPageTemplate {
        query_text: state.search_text,
        sort_options,
    })
}

async fn hackathons_table_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DiscoveryParams>,
) -> Response {
    match load_records(&state.workspace_root).await {
        Ok(records) => {
            let filter_state = params.filter_state();
            let discovery = discover(&records, &filter_state);
            let total_matches = discovery.records.len();
            let (page_rows, page, total_pages) =
                paginate(&discovery.records, params.page, params.per_page);
            let mut resp = render_html(HackathonsTablePartialTemplate {
                cards: page_rows.iter().map(CardRow::from_record).collect(),
                page,
                total_pages,
                total_matches,
            });
            resp.headers_mut().insert(
                header::HeaderName::from_static("hx-trigger"),
                header::HeaderValue::from_static("hackathonsTableLoaded"),
            );
            resp
        }
        Err(err) => server_error(err),
    }
}

async fn hackathons_facets_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DiscoveryParams>,
) -> Response {
    match load_records(&state.workspace_root).await {
        Ok(records) => {
            let filter_state = params.filter_state();
            render_html(HackathonsFacetsPartialTemplate {
                groups: facet_groups(&records, &filter_state),
            })
        }
        Err(err) => server_error(err),
    }
}

async fn hackathon_detail_handler(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<String>,
) -> Response {
    match load_records(&state.workspace_root).await {
        Ok(records) => {
            if let Some(record) = records.iter().find(|r| r.id.to_string() == id) {
                let tags_text = if record.tags.is_empty() {
                    "none".to_string()
                } else {
                    record.tags.join(", ")
                };
                render_html(HackathonDetailTemplate {
                    title: record.title.clone(),
                    description: record.description.clone(),
                    organizer: record.organizer.clone(),
                    location: record.location.clone(),
                    category: record.category.label(),
                    status: record.status.label(),
                    difficulty: record
                        .difficulty
                        .map(|d| d.label().to_string())
                        .unwrap_or_else(|| "not stated".to_string()),
                    mode: record
                        .mode
                        .map(|m| m.label().to_string())
                        .unwrap_or_else(|| "not stated".to_string()),
                    window: window_text(record),
                    prize: prize_text(record),
                    registrations: record.registration_count(),
                    tags_text,
                })
            } else {
                (
                    StatusCode::NOT_FOUND,
                    Html("Hackathon not found".to_string()),
                )
                    .into_response()
            }
        }
        Err(err) => server_error(err),
    }
}

async fn api_hackathons_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DiscoveryParams>,
) -> Response {
    match load_records(&state.workspace_root).await {
        Ok(records) => {
            let filter_state = params.filter_state();
            let discovery = discover(&records, &filter_state);
            let total = discovery.records.len();
            let (items, page, total_pages) =
                paginate(&discovery.records, params.page, params.per_page);
            Json(DiscoveryResponse {
                total,
                page,
                total_pages,
                tokens: discovery.tokens,
                items,
            })
            .into_response()
        }
        Err(err) => server_error(err),
    }
}

async fn app_css_handler(State(state): State<Arc<AppState>>) -> Response {
    let css_path = state.workspace_root.join("assets/static/app.css");
    match tokio::fs::read_to_string(&css_path).await {
        Ok(css) => ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Html("/* missing app.css */".to_string()),
        )
            .into_response(),
    }
}

async fn load_records(workspace_root: &Path) -> anyhow::Result<Vec<HackathonRecord>> {
    load_workspace_catalog(workspace_root).await
}

fn paginate(
    rows: &[HackathonRecord],
    page: Option<usize>,
    per_page: Option<usize>,
) -> (Vec<HackathonRecord>, usize, usize) {
    let per_page = per_page.unwrap_or(20).max(1);
    let total_pages = rows.len().max(1).div_ceil(per_page);
    let page = page.unwrap_or(1).clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let page_rows = rows.iter().skip(start).take(per_page).cloned().collect();
    (page_rows, page, total_pages)
}

fn render_html<T: Template>(tpl: T) -> Response {
    match tpl.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => server_error(anyhow::anyhow!(err.to_string())),
    }
}

fn server_error(err: anyhow::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("Server error: {}", err)),
    )
        .into_response()
}
