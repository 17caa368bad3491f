//! Static HTML site generation.
//!
//! Renders both hubs as plain HTML. A static site cannot run a query per
//! keystroke, so every category × page combination is evaluated up front and
//! written as its own page; free-text search stays a CLI feature.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                          # Landing page with both hubs
//! ├── 404.html                            # NODE_NOT_FOUND
//! ├── style.css                           # Colors from config + base CSS
//! ├── modules/
//! │   ├── index.html                      # All modules
//! │   └── category/security/index.html    # One listing per facet
//! └── projects/
//!     ├── index.html                      # All projects, page 1
//!     ├── page/2/index.html
//!     ├── category/communication/index.html
//!     ├── category/communication/page/2/index.html
//!     └── esp32-lora-long-range/index.html  # Project manual
//! ```
//!
//! Category labels become path segments through `slug::slugify`
//! (`Cloud/IoT` → `cloud-iot`). The "All" facet maps to the hub root.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Pages are pure functions of the read-only catalogs, so they are rendered
//! and written in parallel with rayon.

use crate::badge::category_badge;
use crate::catalog::{Catalog, CatalogError};
use crate::config::{self, BrowserConfig};
use crate::data::Catalogs;
use crate::engine::{self, QueryResult};
use crate::facets::ALL;
use crate::types::{Entry, Module, Project};
use maud::{DOCTYPE, Markup, html};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Characters of the catalog fingerprint shown in page footers.
const VERSION_CHARS: usize = 12;

/// What [`generate`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub module_listings: usize,
    pub project_listings: usize,
    pub project_pages: usize,
    /// Every HTML file, including the landing and 404 pages.
    pub total_pages: usize,
}

/// A rendered page and its path relative to the output directory.
struct SitePage {
    path: String,
    html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hub {
    Modules,
    Projects,
}

impl Hub {
    fn dir(self) -> &'static str {
        match self {
            Hub::Modules => "modules",
            Hub::Projects => "projects",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Hub::Modules => "Library_Hub",
            Hub::Projects => "Project_Nodes",
        }
    }

    fn body_class(self) -> &'static str {
        match self {
            Hub::Modules => "hub-modules",
            Hub::Projects => "hub-projects",
        }
    }
}

/// Shared rendering inputs.
struct Site<'a> {
    config: &'a BrowserConfig,
    version: String,
}

impl Site<'_> {
    /// Absolute href for a path relative to the site root.
    fn href(&self, rel: &str) -> String {
        format!("{}{}", self.config.site.base_url, rel)
    }
}

/// Path segment for a category label.
pub fn category_slug(category: &str) -> String {
    let slug = slug::slugify(category);
    if slug.is_empty() {
        "uncategorized".to_string()
    } else {
        slug
    }
}

/// Directory (relative, with trailing slash) of one listing page.
fn listing_dir(hub: Hub, category: &str, page: usize) -> String {
    let mut dir = format!("{}/", hub.dir());
    if category != ALL {
        dir.push_str(&format!("category/{}/", category_slug(category)));
    }
    if page > 1 {
        dir.push_str(&format!("page/{}/", page));
    }
    dir
}

fn project_dir(project: &Project) -> String {
    format!("{}/{}/", Hub::Projects.dir(), project.slug)
}

pub fn generate(
    catalogs: &Catalogs,
    config: &BrowserConfig,
    output_dir: &Path,
) -> Result<SiteSummary, GenerateError> {
    // Identifiers become directories and download file names.
    catalogs.modules.validate()?;
    catalogs.projects.validate()?;

    let site = Site {
        config,
        version: combined_version(catalogs),
    };

    fs::create_dir_all(output_dir)?;
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    fs::write(output_dir.join("style.css"), css)?;

    let mut pages = vec![
        SitePage {
            path: "index.html".to_string(),
            html: render_index(&site, catalogs).into_string(),
        },
        SitePage {
            path: "404.html".to_string(),
            html: render_not_found(&site).into_string(),
        },
    ];

    let module_pages = listing_pages(&site, Hub::Modules, &catalogs.modules, |m| {
        render_module_card(&site, m)
    });
    let module_listings = module_pages.len();
    tracing::info!(pages = module_listings, "rendered module listings");
    pages.extend(module_pages);

    let project_pages = listing_pages(&site, Hub::Projects, &catalogs.projects, |p| {
        render_project_card(&site, p)
    });
    let project_listings = project_pages.len();
    tracing::info!(pages = project_listings, "rendered project listings");
    pages.extend(project_pages);

    let manuals: Vec<SitePage> = catalogs
        .projects
        .all()
        .par_iter()
        .map(|project| SitePage {
            path: format!("{}index.html", project_dir(project)),
            html: render_project_page(&site, project).into_string(),
        })
        .collect();
    let project_manuals = manuals.len();
    tracing::info!(pages = project_manuals, "rendered project manuals");
    pages.extend(manuals);

    pages.par_iter().try_for_each(|page| -> std::io::Result<()> {
        let path = output_dir.join(&page.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &page.html)
    })?;

    tracing::info!(dir = %output_dir.display(), pages = pages.len(), "site written");
    Ok(SiteSummary {
        module_listings,
        project_listings,
        project_pages: project_manuals,
        total_pages: pages.len(),
    })
}

/// Short version tag covering both catalogs.
fn combined_version(catalogs: &Catalogs) -> String {
    let modules = catalogs.modules.fingerprint();
    let projects = catalogs.projects.fingerprint();
    format!(
        "{}.{}",
        &modules[..VERSION_CHARS / 2],
        &projects[..VERSION_CHARS / 2]
    )
}

/// Facets that get their own listing directory.
///
/// Labels that map to an already-claimed directory (`Cloud IoT` after
/// `Cloud/IoT`, or an entity category spelled "All") are dropped, so the
/// first label in facet order owns the page.
fn listing_facets(hub: Hub, categories: &[String]) -> Vec<&str> {
    let mut claimed = HashSet::new();
    categories
        .iter()
        .map(String::as_str)
        .filter(|category| {
            let fresh = claimed.insert(listing_dir(hub, category, 1));
            if !fresh {
                tracing::warn!(category, hub = hub.dir(), "category shares a listing path, skipped");
            }
            fresh
        })
        .collect()
}

/// Evaluate every facet × page of `catalog` and render each listing.
fn listing_pages<T, F>(site: &Site<'_>, hub: Hub, catalog: &Catalog<T>, card: F) -> Vec<SitePage>
where
    T: Entry + Sync,
    F: Fn(&T) -> Markup + Sync,
{
    let facets = listing_facets(hub, catalog.categories());
    facets
        .par_iter()
        .flat_map_iter(|&category| {
            let total = engine::evaluate(catalog, "", category, 1).total_pages;
            (1..=total)
                .map(|page| {
                    let result = engine::evaluate(catalog, "", category, page);
                    SitePage {
                        path: format!("{}index.html", listing_dir(hub, category, page)),
                        html: render_listing(site, hub, &facets, category, &result, &card).into_string(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &Site<'_>, title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " // " (site.config.site.title) }
                link rel="stylesheet" href=(site.href("style.css"));
            }
            body class=[body_class] {
                (content)
                footer.site-footer {
                    span { (site.config.site.title) }
                    span.catalog-version { "catalog " (site.version) }
                }
            }
        }
    }
}

fn category_badge_tag(category: &str) -> Markup {
    html! {
        span class={ "badge badge-" (category_badge(category)) } { (category) }
    }
}

fn difficulty_tag(project: &Project) -> Markup {
    html! {
        span class={ "difficulty badge-" (project.difficulty.badge()) } { (project.difficulty) }
    }
}

/// Facet links; the active one is marked `current`.
fn render_facets(site: &Site<'_>, hub: Hub, facets: &[&str], active: &str) -> Markup {
    html! {
        nav.facets {
            ul {
                @for &category in facets {
                    li class=[(category == active).then_some("current")] {
                        a href=(site.href(&listing_dir(hub, category, 1))) { (category) }
                    }
                }
            }
        }
    }
}

/// Prev / numbered / next links. Omitted entirely for a single page.
fn render_pagination<T>(site: &Site<'_>, hub: Hub, category: &str, result: &QueryResult<'_, T>) -> Markup {
    let page_href = |page: usize| site.href(&listing_dir(hub, category, page));
    html! {
        @if result.total_pages > 1 {
            nav.pagination {
                @if result.has_previous() {
                    a.page-prev href=(page_href(result.current_page - 1)) { "‹" }
                } @else {
                    span.page-prev.disabled { "‹" }
                }
                @for page in 1..=result.total_pages {
                    @if page == result.current_page {
                        span.page-number.current { (page) }
                    } @else {
                        a.page-number href=(page_href(page)) { (page) }
                    }
                }
                @if result.has_next() {
                    a.page-next href=(page_href(result.current_page + 1)) { "›" }
                } @else {
                    span.page-next.disabled { "›" }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(site: &Site<'_>, catalogs: &Catalogs) -> Markup {
    let content = html! {
        main.landing {
            header.hero {
                p.status { "System_Online" }
                h1 { (site.config.site.title) }
                p.tagline { "IoT modules and project manuals, in one place." }
            }
            div.portals {
                a.portal.portal-modules href=(site.href(&listing_dir(Hub::Modules, ALL, 1))) {
                    h2 { (Hub::Modules.title()) }
                    p { "Drivers, protocols and sensor libraries." }
                    span.count { (catalogs.modules.len()) " modules" }
                }
                a.portal.portal-projects href=(site.href(&listing_dir(Hub::Projects, ALL, 1))) {
                    h2 { (Hub::Projects.title()) }
                    p { "Step-by-step manuals with wiring, code and parts lists." }
                    span.count { (catalogs.projects.len()) " projects" }
                }
            }
        }
    };
    base_document(site, "Home", Some("landing-page"), content)
}

fn render_listing<T, F>(
    site: &Site<'_>,
    hub: Hub,
    facets: &[&str],
    category: &str,
    result: &QueryResult<'_, T>,
    card: &F,
) -> Markup
where
    F: Fn(&T) -> Markup,
{
    let content = html! {
        header.site-header {
            nav.breadcrumb {
                a href=(site.href("")) { "Home" }
                " › "
                a href=(site.href(&listing_dir(hub, ALL, 1))) { (hub.title()) }
                @if category != ALL {
                    " › " (category)
                }
            }
        }
        main.listing {
            (render_facets(site, hub, facets, category))
            @if result.is_empty() {
                p.empty { "No entries in this category." }
            } @else {
                div.card-grid {
                    @for item in &result.items {
                        (card(item))
                    }
                }
            }
            (render_pagination(site, hub, category, result))
            p.match-count {
                (result.total_matches) " entries · page " (result.current_page) "/" (result.total_pages)
            }
        }
    };
    base_document(site, hub.title(), Some(hub.body_class()), content)
}

fn render_module_card(site: &Site<'_>, module: &Module) -> Markup {
    html! {
        article.card.module-card {
            (category_badge_tag(&module.category))
            h3 { (module.name) }
            @if !module.description.is_empty() {
                p.description { (module.description) }
            }
            a.download href=(site.config.modules.download_url(&module.file)) download {
                "Download " (module.file)
            }
        }
    }
}

fn render_project_card(site: &Site<'_>, project: &Project) -> Markup {
    html! {
        a.card.project-card href=(site.href(&project_dir(project))) {
            div.card-badges {
                (category_badge_tag(&project.category))
                (difficulty_tag(project))
            }
            h3 { (project.name) }
            @if !project.description.is_empty() {
                p.description { (project.description) }
            }
        }
    }
}

fn render_project_page(site: &Site<'_>, project: &Project) -> Markup {
    let content = html! {
        header.site-header {
            nav.breadcrumb {
                a href=(site.href(&listing_dir(Hub::Projects, ALL, 1))) { "‹ Back to Projects" }
            }
        }
        main.manual {
            header.manual-header {
                div.card-badges {
                    span.manual-tag { "Technical_Manual" }
                    (difficulty_tag(project))
                    (category_badge_tag(&project.category))
                }
                h1 { (project.name) }
                @if !project.description.is_empty() {
                    p.description { (project.description) }
                }
            }
            @if !project.requirements.is_empty() {
                section.requirements {
                    h2 { "Requirements" }
                    ul { @for item in &project.requirements { li { (item) } } }
                }
            }
            section.components {
                h2 { "Components" }
                ul { @for item in &project.components { li { (item) } } }
            }
            @for section in &project.sections {
                section.tutorial-section {
                    h2 { (section.title) }
                    p { (section.content) }
                }
            }
            section.instructions {
                h2 { "Instructions" }
                ol { @for step in &project.instructions { li { (step) } } }
            }
            @if let Some(code) = &project.code {
                section.code {
                    h2 { "Code" }
                    pre { code { (code) } }
                }
            }
            @if let Some(url) = &project.diagram_url {
                section.diagram {
                    h2 { "Diagram" }
                    img src=(url) alt={ (project.name) " wiring diagram" } loading="lazy";
                }
            }
        }
    };
    base_document(site, &project.name, Some("manual-page"), content)
}

fn render_not_found(site: &Site<'_>) -> Markup {
    let content = html! {
        main.not-found {
            h1 { "404 // NODE_NOT_FOUND" }
            a href=(site.href(&listing_dir(Hub::Projects, ALL, 1))) { "Return to Hub" }
        }
    };
    base_document(site, "Not Found", Some("not-found-page"), content)
}

// ============================================================================
// Tests
// ============================================================================
