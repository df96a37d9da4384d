//! Generate page data

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{GenerateReport, Generator};
use crate::Folio;

/// Generate page data for the whole site
pub fn run(folio: &Folio) -> Result<()> {
    run_with_report(folio).map(|_| ())
}

/// Generate and return what was written
pub fn run_with_report(folio: &Folio) -> Result<GenerateReport> {
    let start = Instant::now();

    let report = Generator::new(folio).generate()?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(report)
}

/// Watch for file changes and regenerate
///
/// The configuration is re-read on every change so edits to `_config.yml`
/// take effect without a restart.
pub async fn watch(folio: &Folio) -> Result<()> {
    let folio = folio.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&folio)).await?
}

fn watch_blocking(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    // Fires once a burst of events has settled
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if folio.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&folio.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", folio.content_dir);
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", folio.base_dir);

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events
                    .iter()
                    .map(|e| e.path.as_path())
                    .filter(|p| is_relevant(p))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }

                tracing::info!("Regenerating...");
                let result = Folio::new(&folio.base_dir).and_then(|site| run(&site));
                if let Err(e) = result {
                    tracing::error!("Generation failed: {}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Editor swap files and VCS internals don't trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let in_vcs = path.components().any(|c| c.as_os_str() == ".git");

    !in_vcs && !name.ends_with('~') && !name.ends_with(".swp") && name != ".DS_Store"
}
