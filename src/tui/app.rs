use crate::domain::{Entry, OwnershipIndex};

/// Interactive browser state: the entry window, the selection cursor and
/// the ownership index the run started with.
pub struct TuiApp {
    pub entries: Vec<Entry>,
    pub owned: OwnershipIndex,
    pub index: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub is_downloading: bool,
}

impl TuiApp {
    pub fn new(entries: Vec<Entry>, owned: OwnershipIndex) -> Self {
        Self {
            entries,
            owned,
            index: 0,
            should_quit: false,
            status_message: None,
            is_downloading: false,
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.index)
    }

    pub fn move_up(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if !self.entries.is_empty() && self.index < self.entries.len() - 1 {
            self.index += 1;
        }
    }

    /// Flip the selected entry to owned so the next render reflects the
    /// completed download without restarting the process.
    pub fn mark_selected_owned(&mut self) {
        if let Some(entry) = self.entries.get_mut(self.index) {
            entry.owned = true;
            self.owned.insert(entry.filename.clone());
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entries(n: usize) -> Vec<Entry> {
        (1..=n)
            .map(|position| Entry {
                position,
                title: format!("module {}", position),
                published_at: Utc::now(),
                filename: format!("mod{:02}.mod", position),
                download_url: format!(
                    "https://api.modarchive.org/downloads.php?moduleid={}",
                    position
                ),
                page_url: Entry::page_url_for(position as u64),
                module_id: position as u64,
                stream_url: Entry::stream_url_for(position as u64),
                featured: false,
                owned: false,
            })
            .collect()
    }

    #[test]
    fn test_navigation_clamps_to_window() {
        let mut app = TuiApp::new(entries(2), OwnershipIndex::default());
        app.move_up();
        assert_eq!(app.index, 0);
        app.move_down();
        assert_eq!(app.index, 1);
        app.move_down();
        assert_eq!(app.index, 1);
    }

    #[test]
    fn test_mark_selected_owned_updates_entry_and_index() {
        let mut app = TuiApp::new(entries(2), OwnershipIndex::default());
        app.move_down();
        app.mark_selected_owned();

        assert!(app.entries[1].owned);
        assert!(!app.entries[0].owned);
        assert!(app.owned.contains("mod02.mod"));
    }

    #[test]
    fn test_empty_window_has_no_selection() {
        let app = TuiApp::new(Vec::new(), OwnershipIndex::default());
        assert!(app.selected_entry().is_none());
    }
}
