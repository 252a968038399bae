pub mod hosts;
pub mod models;
pub mod services;
pub mod traits;

use std::fs;

use anyhow::{Context, anyhow, bail};
use tracing::{info, warn};

use crate::models::{Action, CutReport, DocumentFormat, Job, ReturnMode, Truncated, TruncationSettings};
use crate::services::settings::{AppConfig, LoggingConfig, load_config};
use crate::services::{CollapseSettings, describe, plan_all, truncate_shaped};
use crate::traits::TreeNode;

pub use crate::models::TruncateError;
pub use crate::services::{Selector, closest_child, plan_collapse, truncate};

/// High-level entrypoint: load config, init logging, run one job
pub fn run_with_config_path(path: Option<&str>, job: &Job) -> anyhow::Result<()> {
    let cfg = match path {
        Some(path) => load_config(path).map_err(|e| anyhow!("Failed to load {}: {}", path, e))?,
        None => AppConfig::default(),
    };

    init_logging(&cfg.logging);

    let rendered = run_job(&cfg, job)?;
    match &job.output {
        Some(output) => fs::write(output, rendered + "\n")
            .with_context(|| format!("Failed to write {}", output.display()))?,
        None => println!("{}", rendered),
    }
    info!(action = %job.action, "job finished");
    Ok(())
}

/// Initialize structured logging on stderr (RUST_LOG wins over the config level)
pub fn init_logging(cfg: &LoggingConfig) {
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| cfg.level.clone());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Reads the job input and renders the result as it should be printed.
pub fn run_job(cfg: &AppConfig, job: &Job) -> anyhow::Result<String> {
    let source = fs::read_to_string(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))?;
    info!(input = %job.input.display(), action = %job.action, min_length = job.min_length, "job starting");

    let settings = match job.return_mode {
        Some(mode) => cfg.truncate.with_return_mode(mode),
        None => cfg.truncate,
    };
    let selector = job.selector.as_deref();

    match job.action {
        Action::Truncate => truncate_markup(&source, job.format, selector, job.min_length, &settings),
        Action::Collapse => {
            if job.format != DocumentFormat::Html {
                bail!("collapse renders html only, got {}", job.format);
            }
            collapse_markup(&source, selector, job.min_length, &settings, &cfg.collapse)
        }
    }
}

/// Truncates the first root matching `selector` and formats the outcome per `settings.return_mode`.
pub fn truncate_markup(
    source: &str,
    format: DocumentFormat,
    selector: Option<&str>,
    min_length: usize,
    settings: &TruncationSettings,
) -> anyhow::Result<String> {
    match format {
        DocumentFormat::Html => {
            let html = hosts::html::parse(source);
            let root = match selector {
                Some(css) => hosts::html::select_roots(&html, css)?.first().copied(),
                None => default_html_roots(&html).first().copied(),
            };
            render_truncated(root, min_length, settings)
        }
        DocumentFormat::Xml => {
            let doc = hosts::xml::parse(source)?;
            let root = match selector {
                Some(name) => hosts::xml::select_roots(&doc, name)?.first().copied(),
                None => Some(doc.root_element()),
            };
            render_truncated(root, min_length, settings)
        }
    }
}

/// Collapses every root matching `selector` and serializes the resulting html.
pub fn collapse_markup(
    source: &str,
    selector: Option<&str>,
    min_length: usize,
    settings: &TruncationSettings,
    collapse: &CollapseSettings,
) -> anyhow::Result<String> {
    let html = hosts::html::parse(source);
    let roots = match selector {
        Some(css) => hosts::html::select_roots(&html, css)?,
        None => default_html_roots(&html),
    };
    if roots.is_empty() {
        warn!(selector = ?selector, "collapse: nothing selected");
    }
    let plans = plan_all(&roots, min_length, settings)?;
    info!(roots = roots.len(), collapsed = plans.len(), "collapse: planned");
    Ok(hosts::html::render_collapsed(&html, &plans, collapse)?)
}

fn default_html_roots(html: &scraper::Html) -> Vec<ego_tree::NodeRef<'_, scraper::Node>> {
    match hosts::html::select_roots(html, "body") {
        Ok(bodies) if !bodies.is_empty() => bodies,
        _ => vec![*html.root_element()],
    }
}

fn render_truncated<N: TreeNode>(
    root: Option<N>,
    min_length: usize,
    settings: &TruncationSettings,
) -> anyhow::Result<String> {
    let Some(root) = root else {
        warn!("truncate: selector matched nothing");
        return Ok(match settings.return_mode {
            ReturnMode::TextOnly => String::new(),
            _ => "null".to_string(),
        });
    };

    let rendered = match truncate_shaped(root, min_length, settings) {
        Truncated::Both(result) => serde_json::to_string_pretty(&CutReport {
            text: result.text,
            truncated: result.truncated,
            node: result.last_visited.map(describe),
        })?,
        Truncated::Text(text) => text,
        Truncated::Node(node) => serde_json::to_string_pretty(&node.map(describe))?,
    };
    Ok(rendered)
}
