//! # modfetch
//!
//! Incremental downloader for The Mod Archive's recently-featured and
//! recent-uploads feeds.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Sync planner → Downloader
//!                                     ↘ TUI selector
//! ```
//!
//! - [`fetcher`]: retrieves the feed body over HTTP or from a local file
//! - [`normalizer`]: converts raw feed items to ranked [`domain::Entry`] values
//! - [`sync`]: finds the ownership boundary and plans what to fetch
//! - [`downloader`]: streams modules into the output directory
//! - [`tui`]: interactive terminal browser built with ratatui
//!
//! ## Quick start
//!
//! ```bash
//! # Download everything featured since the last run
//! modfetch
//!
//! # Download the last 10 featured modules
//! modfetch -c 10
//!
//! # Browse the recent-uploads feed interactively
//! modfetch -a -i
//! ```

/// Application context and error handling.
pub mod app;

/// Command-line interface and the batch sync command.
pub mod cli;

/// Configuration file handling and the immutable per-run [`config::Settings`].
pub mod config;

/// Core domain models.
///
/// - [`domain::Entry`]: one feed item / one tracker module
/// - [`domain::OwnershipIndex`]: filenames already present locally
pub mod domain;

/// Download adapter streaming modules to disk.
pub mod downloader;

/// Feed retrieval.
pub mod fetcher;

/// Feed parsing and normalization into ranked entries.
pub mod normalizer;

/// Incremental-sync core: boundary detection and fetch planning.
pub mod sync;

/// Interactive terminal browser.
///
/// Single-list layout with a detail pane. Keybindings: j/k navigate,
/// Enter/d downloads, s streams in the browser, o opens the module page,
/// q quits.
pub mod tui;
