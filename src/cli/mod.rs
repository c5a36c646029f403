pub mod commands;

use std::path::PathBuf;

use clap::Parser;

/// Incremental downloader for The Mod Archive's recent-modules feeds.
///
/// By default the output directory is searched for a module that was
/// recently featured; everything featured more recently is downloaded.
/// With no overlap at all, the whole feed window is fetched.
#[derive(Parser, Debug)]
#[command(
    name = "modfetch",
    version,
    about = "Sync recently featured Mod Archive modules into a local directory",
    long_about = None
)]
pub struct Cli {
    /// Download exactly the last N modules (max 40, or 100 with --all-recent)
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Poll the all-recent-uploads feed instead of the featured feed
    #[arg(short, long)]
    pub all_recent: bool,

    /// Browse the feed in an interactive terminal UI
    #[arg(short, long, conflicts_with = "count")]
    pub interactive: bool,

    /// Destination directory for downloaded modules
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Feed URL, or a path to a local copy of the feed
    #[arg(long)]
    pub feed: Option<String>,
}
