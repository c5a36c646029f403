use tracing::debug;

use crate::app::{AppContext, Result};
use crate::config::RunMode;
use crate::domain::{Entry, OwnershipIndex};
use crate::downloader::DownloadOutcome;
use crate::fetcher;
use crate::normalizer::Normalizer;
use crate::sync::{self, FetchPlan, PlanMode};

/// Build the run's entry window and dispatch on the configured mode.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let owned = OwnershipIndex::scan(&ctx.settings.output_dir)?;
    debug!(
        dir = %ctx.settings.output_dir.display(),
        files = owned.len(),
        "ownership index built"
    );

    let body = fetcher::load_feed(&ctx.settings.feed_source, ctx.fetcher.as_ref()).await?;
    let entries = Normalizer::new().normalize(&body, &owned)?;
    debug!(entries = entries.len(), "feed window parsed");

    match ctx.settings.mode {
        RunMode::Interactive => crate::tui::run(ctx, entries, owned).await,
        RunMode::Count(n) => batch(ctx, entries, owned, PlanMode::Count(n)).await,
        RunMode::Boundary => batch(ctx, entries, owned, PlanMode::Boundary).await,
    }
}

/// Batch sync: plan, then download the planned prefix one entry at a
/// time. Per-item failures are reported and the run continues.
async fn batch(
    ctx: &AppContext,
    mut entries: Vec<Entry>,
    mut owned: OwnershipIndex,
    mode: PlanMode,
) -> Result<()> {
    let count = match sync::plan(&entries, mode, &owned)? {
        FetchPlan::UpToDate => {
            if let Some(newest) = entries.first() {
                println!(
                    "{} is the newest entry in the feed. Nothing to download.",
                    newest.filename
                );
            }
            return Ok(());
        }
        FetchPlan::Prefix(0) => {
            println!("Nothing to download.");
            return Ok(());
        }
        FetchPlan::Prefix(n) => n,
    };

    if mode == PlanMode::Boundary && count < entries.len() {
        println!(
            "Found {} locally; everything newer will be downloaded",
            entries[count].filename
        );
    }

    println!(
        "Downloading {} of {} entries to {}",
        count,
        entries.len(),
        ctx.settings.output_dir.display()
    );

    let mut downloaded = 0;
    let mut skipped = 0;
    let mut errors = 0;

    for entry in entries[..count].iter_mut() {
        match ctx
            .downloader
            .download(entry, &ctx.settings.output_dir)
            .await
        {
            Ok(DownloadOutcome::Downloaded) => {
                downloaded += 1;
                entry.owned = true;
                owned.insert(entry.filename.clone());
                println!("  + {}", entry.filename);
            }
            Ok(DownloadOutcome::AlreadyOwned) => {
                skipped += 1;
                println!("  = {} already exists, skipping", entry.filename);
            }
            Err(e) => {
                errors += 1;
                eprintln!("  ! {} - {}", entry.filename, e);
            }
        }
    }

    println!(
        "Sync complete: {} downloaded, {} skipped, {} errors",
        downloaded, skipped, errors
    );

    Ok(())
}
