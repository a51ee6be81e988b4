//! Server-rendered HTML pages

use crate::menu::{MenuChild, MenuNode};
use crate::plugins::{PluginRoute, PluginTab};
use crate::render::{escape, rows, FieldRow, Markup, ResourceObject, Tier};
use chrono::{DateTime, Utc};

/// Navigation bar contents
#[derive(Debug, Clone)]
pub enum Nav {
    Loaded(Vec<MenuNode>),
    /// The menu could not be fetched; the page still renders
    Failed,
}

/// An extra tab with its content, if the content could be fetched
#[derive(Debug, Clone)]
pub struct LoadedTab {
    pub tab: PluginTab,
    pub content: Option<Markup>,
}

/// Everything a detail page shows
#[derive(Debug)]
pub struct DetailPage<'a> {
    pub object: &'a ResourceObject,
    /// Plugin fragments spliced below the main table
    pub fragments: Vec<Markup>,
    pub tabs: Vec<LoadedTab>,
    pub now: DateTime<Utc>,
}

/// One row of a list page
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub label: String,
    pub href: Option<String>,
}

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; padding-top: 3.5rem; }
nav.navbar { position: fixed; top: 0; left: 0; right: 0; background: #f8f9fa; padding: .5rem 1rem; display: flex; gap: 1rem; font-size: 14px; }
nav .dropdown { position: relative; }
nav .dropdown-menu { display: none; position: absolute; background: #fff; border: 1px solid #ddd; min-width: 14rem; padding: .25rem 0; }
nav .dropdown:hover .dropdown-menu { display: block; }
nav .dropdown-header { color: #6c757d; padding: .25rem 1rem; font-size: 12px; }
nav .dropdown-item { display: block; padding: .25rem 1rem; font-size: 13px; }
nav .dropdown-divider { border-top: 1px solid #e9ecef; margin: .25rem 0; }
main { padding: 1rem 2rem; }
table { border-collapse: collapse; width: 100%; }
td { border-top: 1px solid #dee2e6; padding: .5rem; vertical-align: top; }
.nav-tabs { display: flex; gap: 1rem; list-style: none; padding: 0; border-bottom: 1px solid #dee2e6; }
.tab-pane { padding-top: 1rem; }
.list-unstyled { list-style: none; padding: 0; margin: 0; }
.text-muted { color: #6c757d; }
.alert { color: #842029; background: #f8d7da; padding: 1rem; }
"#;

/// Wrap a body in the page chrome
pub fn layout(title: &str, nav: &Nav, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Netfront</title>
    <style>{style}</style>
</head>
<body>
{nav}
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        style = STYLE,
        nav = nav_html(nav),
        body = body,
    )
}

/// Navigation bar markup
pub fn nav_html(nav: &Nav) -> String {
    let nodes = match nav {
        Nav::Loaded(nodes) => nodes,
        Nav::Failed => return r#"<div class="alert">Failed to load menu</div>"#.to_string(),
    };

    let mut html = String::from(r#"<nav class="navbar"><a class="navbar-brand" href="/">Netfront</a>"#);
    for node in nodes {
        html.push_str(&format!(
            r#"<div class="dropdown" data-key="{}"><span class="dropdown-toggle">{}</span><div class="dropdown-menu">"#,
            escape(&node.key),
            escape(&node.label)
        ));
        for group in &node.groups {
            html.push_str(&format!(
                r#"<div data-key="{}"><h6 class="dropdown-header">{}</h6>"#,
                escape(&group.key),
                escape(&group.header)
            ));
            for child in &group.children {
                match child {
                    MenuChild::Item(item) => html.push_str(&format!(
                        r#"<a class="dropdown-item" data-key="{}" href="{}">{}</a>"#,
                        escape(&item.key),
                        escape(&item.href),
                        escape(&item.label)
                    )),
                    MenuChild::Divider => html.push_str(r#"<div class="dropdown-divider"></div>"#),
                }
            }
            html.push_str("</div>");
        }
        html.push_str("</div></div>");
    }
    html.push_str("</nav>");
    html
}

/// Body shown when a primary fetch failed
pub fn failure_body(message: &str) -> String {
    format!(r#"<div class="alert">{}</div>"#, escape(message))
}

/// Table of rows, keyed by field name
pub fn rows_table(rows: &[FieldRow]) -> String {
    let mut html = String::from(r#"<table class="table table-hover"><tbody>"#);
    for row in rows {
        html.push_str(&format!(
            r#"<tr data-key="{}"><td>{}</td><td>{}</td></tr>"#,
            escape(&row.key),
            escape(&row.label),
            row.rendered.to_html()
        ));
    }
    html.push_str("</tbody></table>");
    html
}

fn card(title: &str, content: &str) -> String {
    format!(
        r#"<div class="card"><div class="card-header"><strong>{}</strong></div>{}</div>"#,
        escape(title),
        content
    )
}

fn tab_pane(key: &str, content: &str) -> String {
    format!(
        r#"<section class="tab-pane" id="tab-{key}" data-key="{key}">{content}</section>"#,
        key = escape(key),
        content = content
    )
}

/// Body of a resource detail page
pub fn detail_body(page: &DetailPage<'_>) -> String {
    let object = page.object;
    let mut html = format!("<h1>{}</h1>", escape(object.title()));

    html.push_str(r#"<p><small class="text-muted">"#);
    if let Some(created) = object.created() {
        html.push_str(&format!("Created {} &middot; ", escape(created)));
    }
    if let Some(updated) = object.last_updated() {
        let ago = time_ago(updated, page.now).unwrap_or_else(|| updated.to_string());
        html.push_str(&format!(
            r#"Updated <span title="{}">{}</span> ago"#,
            escape(updated),
            escape(&ago)
        ));
    }
    html.push_str("</small></p>");

    let mut tabs = vec![
        ("main".to_string(), "Main".to_string()),
        ("advanced".to_string(), "Advanced".to_string()),
        ("notes".to_string(), "Notes".to_string()),
        ("change_log".to_string(), "Change Log".to_string()),
    ];
    tabs.extend(
        page.tabs
            .iter()
            .map(|t| (format!("plugin-{}", t.tab.key), t.tab.title.clone())),
    );

    html.push_str(r#"<ul class="nav-tabs">"#);
    for (key, title) in &tabs {
        html.push_str(&format!(
            r##"<li data-key="{key}"><a href="#tab-{key}">{title}</a></li>"##,
            key = escape(key),
            title = escape(title)
        ));
    }
    html.push_str("</ul>");

    // The "Main" tab lists business fields, "Advanced" lists system fields.
    let mut main = card("Main", &rows_table(&rows(object, Tier::Advanced)));
    for fragment in &page.fragments {
        main.push_str("<br>");
        main.push_str(fragment.as_str());
    }
    html.push_str(&tab_pane("main", &main));
    html.push_str(&tab_pane(
        "advanced",
        &card("Advanced", &rows_table(&rows(object, Tier::Basic))),
    ));
    html.push_str(&tab_pane("notes", ""));
    html.push_str(&tab_pane("change_log", ""));

    for loaded in &page.tabs {
        let content = loaded
            .content
            .as_ref()
            .map(|m| m.as_str())
            .unwrap_or_default();
        html.push_str(&tab_pane(&format!("plugin-{}", loaded.tab.key), content));
    }

    html
}

/// Body of a generic list page
pub fn list_body(title: &str, items: &[ListItem]) -> String {
    let mut html = format!("<h1>{}</h1>", escape(title));
    if items.is_empty() {
        html.push_str(r#"<p class="text-muted">No objects found.</p>"#);
        return html;
    }

    html.push_str(r#"<table class="table table-hover"><tbody>"#);
    for item in items {
        let cell = match &item.href {
            Some(href) => format!(r#"<a href="{}">{}</a>"#, escape(href), escape(&item.label)),
            None => escape(&item.label),
        };
        html.push_str(&format!("<tr><td>{}</td></tr>", cell));
    }
    html.push_str("</tbody></table>");
    html
}

/// Body of the landing page
pub fn home_body() -> String {
    r#"<h1>Netfront</h1><p class="text-muted">Select a resource type from the menu.</p>"#.to_string()
}

/// Body of the installed plugins listing
pub fn installed_plugins_body(plugins: &[&PluginRoute]) -> String {
    let mut html = String::from("<h1>Installed Plugins</h1>");
    if plugins.is_empty() {
        html.push_str(r#"<p class="text-muted">No plugins installed.</p>"#);
        return html;
    }

    html.push_str(r#"<table class="table table-hover"><tbody>"#);
    for plugin in plugins {
        html.push_str(&format!(
            r#"<tr data-key="{id}"><td><a href="/plugins/{mount}">{title}</a></td><td>{id}</td></tr>"#,
            id = escape(&plugin.identifier),
            mount = escape(&plugin.mount_path),
            title = escape(&plugin.title)
        ));
    }
    html.push_str("</tbody></table>");
    html
}

/// Coarse "N units" distance between an RFC 3339 timestamp and `now`
pub fn time_ago(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let then = DateTime::parse_from_rfc3339(timestamp).ok()?;
    let seconds = (now - then.with_timezone(&Utc)).num_seconds().max(0);

    let (value, unit) = match seconds {
        s if s < 60 => (s, "second"),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s => (s / 86_400, "day"),
    };
    let plural = if value == 1 { "" } else { "s" };
    Some(format!("{} {}{}", value, unit, plural))
}
