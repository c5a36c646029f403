use chrono::{DateTime, Utc};

/// Title prefix the uploads feed puts on modules that were also featured.
pub const FEATURED_PREFIX: &str = "Featured: ";

/// One feed item, i.e. one tracker module.
///
/// Entries are rebuilt from the feed on every run and never persisted.
/// `position` is the 1-based rank in published order, rank 1 being the
/// newest item in the window.
#[derive(Debug, Clone)]
pub struct Entry {
    pub position: usize,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub filename: String,
    pub download_url: String,
    pub page_url: String,
    pub module_id: u64,
    pub stream_url: String,
    pub featured: bool,
    pub owned: bool,
}

impl Entry {
    /// Player URL for in-browser playback of a module.
    pub fn stream_url_for(module_id: u64) -> String {
        format!("https://modarchive.org/index.php?request=view_player&query={module_id}")
    }

    /// Module detail page, used when the feed item carries no second link.
    pub fn page_url_for(module_id: u64) -> String {
        format!("https://modarchive.org/index.php?request=view_by_moduleid&query={module_id}")
    }

    /// Title without the featured marker.
    pub fn display_title(&self) -> &str {
        self.title
            .strip_prefix(FEATURED_PREFIX)
            .unwrap_or(&self.title)
    }
}
