//! HTTP handlers for the page routes
//!
//! Each view issues its fetches concurrently. The menu and the primary
//! resource are required for their part of the page; plugin fragments and
//! tabs are optional and simply left out when they fail.

use super::pages::{self, DetailPage, ListItem, LoadedTab, Nav};
use crate::config::{is_safe_segment, FrontendConfig};
use crate::fetch::Fetcher;
use crate::menu::{self, MenuDocument};
use crate::plugins::{FragmentCompositor, PluginRoute, PluginTab, RouteTable, RouteTarget};
use crate::render::{humanize, Markup, ResourceObject};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Shared, read-only state of every view
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FrontendConfig>,
    pub fetcher: Arc<dyn Fetcher>,
    pub compositor: FragmentCompositor,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(config: FrontendConfig, fetcher: Arc<dyn Fetcher>, routes: RouteTable) -> Self {
        Self {
            config: Arc::new(config),
            compositor: FragmentCompositor::new(fetcher.clone()),
            fetcher,
            routes: Arc::new(routes),
        }
    }
}

/// Create the page router from the state's route table
pub fn views_router(state: AppState) -> Router {
    let routes = state.routes.clone();
    let mut router: Router<AppState> = Router::new().route("/health", get(health_check));

    for (path, target) in routes.flatten() {
        router = match target {
            RouteTarget::Home => router.route(&path, get(home)),
            RouteTarget::ListView => router.route(&path, get(list_view)),
            RouteTarget::DetailView => router.route(&path, get(detail_view)),
            RouteTarget::InstalledPlugins => router.route(&path, get(installed_plugins)),
            RouteTarget::Plugin(route) => {
                let route = route.clone();
                router.route(
                    &path,
                    get(move |State(state): State<AppState>| plugin_page(state, route.clone())),
                )
            }
            RouteTarget::Group => router,
        };
    }

    router.with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /
async fn home(State(state): State<AppState>) -> Response {
    let nav = load_nav(&state).await;
    page(StatusCode::OK, "Home", &nav, &pages::home_body())
}

/// GET /:app_name/:model_name
async fn list_view(
    State(state): State<AppState>,
    Path((app, model)): Path<(String, String)>,
) -> Response {
    let view_id = Uuid::new_v4();
    let span = tracing::info_span!("list_view", %view_id, app = %app, model = %model);

    async move {
        if ![&app, &model].iter().all(|p| is_safe_segment(p)) {
            return not_found(&load_nav(&state).await);
        }
        let url = state.config.api.list_url(&app, &model);
        let (nav, listing) = tokio::join!(load_nav(&state), state.fetcher.get_json(&url));

        let listing = match listing {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to load list");
                return failure(&nav, &url);
            }
        };

        let title = humanize(&model.replace('-', "_"));
        let items = list_items(&listing, &app, &model);
        page(StatusCode::OK, &title, &nav, &pages::list_body(&title, &items))
    }
    .instrument(span)
    .await
}

/// GET /:app_name/:model_name/:id
async fn detail_view(
    State(state): State<AppState>,
    Path((app, model, id)): Path<(String, String, String)>,
) -> Response {
    let view_id = Uuid::new_v4();
    let span = tracing::info_span!("detail_view", %view_id, app = %app, model = %model, id = %id);

    async move {
        if ![&app, &model, &id].iter().all(|p| is_safe_segment(p)) {
            return not_found(&load_nav(&state).await);
        }
        let api = &state.config.api;
        let api_url = api.object_url(&app, &model, &id);

        let (nav, object, fragment) = tokio::join!(
            load_nav(&state),
            state.fetcher.get_json(&api_url),
            state.compositor.fetch_fragment(&api_url),
        );

        let object = match object.map(|value| ResourceObject::from_json(&value)) {
            Ok(Some(object)) => object,
            Ok(None) => {
                tracing::warn!(url = %api_url, "Resource is not a JSON object");
                return failure(&nav, &api_url);
            }
            Err(e) => {
                tracing::warn!(url = %api_url, error = %e, "Failed to load resource");
                return failure(&nav, &api_url);
            }
        };

        let mut fragments: Vec<Markup> = fragment.into_iter().collect();
        let mut tabs = Vec::new();

        // Slug-addressed views expose a second fragment and extra tabs, both
        // keyed by the slug we only know once the object has arrived.
        if api.uses_slug_view(&app, &model) {
            if let Some(slug) = object.slug().filter(|slug| is_safe_segment(slug)) {
                let (slug_fragment, plugin_tabs) = tokio::join!(
                    state.compositor.fetch_slug_fragment(api, &app, &model, slug),
                    state.compositor.fetch_tabs(api, &app, &model, slug),
                );
                fragments.extend(slug_fragment);
                tabs = load_tabs(&state.compositor, plugin_tabs).await;
            }
        }
        fragments.retain(|f| !f.is_empty());

        tracing::debug!(
            fields = object.len(),
            fragments = fragments.len(),
            tabs = tabs.len(),
            "Rendering detail view"
        );

        let title = object.display().unwrap_or_else(|| object.title()).to_string();
        let body = pages::detail_body(&DetailPage {
            object: &object,
            fragments,
            tabs,
            now: Utc::now(),
        });
        page(StatusCode::OK, &title, &nav, &body)
    }
    .instrument(span)
    .await
}

/// GET /plugins/installed-plugins
async fn installed_plugins(State(state): State<AppState>) -> Response {
    let nav = load_nav(&state).await;
    let plugins = state.routes.plugins();
    page(
        StatusCode::OK,
        "Installed Plugins",
        &nav,
        &pages::installed_plugins_body(&plugins),
    )
}

/// GET /plugins/{mount_path}
async fn plugin_page(state: AppState, route: PluginRoute) -> Response {
    let (nav, component) = tokio::join!(load_nav(&state), route.component.resolve());

    match component {
        Ok(component) => page(StatusCode::OK, &route.title, &nav, component.render().as_str()),
        Err(e) => {
            tracing::error!(plugin = %route.identifier, error = %e, "Failed to load plugin component");
            page(
                StatusCode::INTERNAL_SERVER_ERROR,
                &route.title,
                &nav,
                &pages::failure_body(&format!("Failed to load plugin {}", route.identifier)),
            )
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn page(status: StatusCode, title: &str, nav: &Nav, body: &str) -> Response {
    (status, Html(pages::layout(title, nav, body))).into_response()
}

fn not_found(nav: &Nav) -> Response {
    page(
        StatusCode::NOT_FOUND,
        "Not Found",
        nav,
        &pages::failure_body("Not found"),
    )
}

fn failure(nav: &Nav, url: &str) -> Response {
    page(
        StatusCode::BAD_GATEWAY,
        "Error",
        nav,
        &pages::failure_body(&format!("Failed to load {}", url)),
    )
}

async fn load_nav(state: &AppState) -> Nav {
    let url = state.config.api.menu_url();
    match state.fetcher.get_json(&url).await {
        Ok(document) => Nav::Loaded(menu::build(&MenuDocument::from_json(&document))),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to load menu");
            Nav::Failed
        }
    }
}

async fn load_tabs(compositor: &FragmentCompositor, tabs: Vec<PluginTab>) -> Vec<LoadedTab> {
    join_all(tabs.into_iter().map(|tab| async move {
        let content = compositor.fetch_tab_content(&tab).await;
        LoadedTab { tab, content }
    }))
    .await
}

/// Rows of a list response: `{results: [...]}` or a bare array
fn list_items(listing: &Value, app: &str, model: &str) -> Vec<ListItem> {
    let results = listing
        .get("results")
        .and_then(Value::as_array)
        .or_else(|| listing.as_array());
    let Some(results) = results else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(Value::as_object)
        .map(|object| {
            let text = |key: &str| match object.get(key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            let id = text("id");
            ListItem {
                label: text("display")
                    .or_else(|| text("name"))
                    .or_else(|| id.clone())
                    .unwrap_or_else(|| "—".to_string()),
                href: id.map(|id| format!("/{}/{}/{}", app, model, id)),
            }
        })
        .collect()
}
