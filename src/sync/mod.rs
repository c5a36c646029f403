//! Incremental-sync core: boundary detection and fetch planning.
//!
//! The feed is a fixed-size window of entries ranked newest-first. A run
//! either fetches an explicit count, or scans for the boundary between
//! "already owned" and "new" and fetches everything on the new side.

use crate::app::{ModfetchError, Result};
use crate::domain::{Entry, OwnershipIndex};

/// Outcome of scanning the window for the newest owned entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryScan {
    /// The newest entry is already owned; there is nothing new.
    UpToDate,
    /// Rank of the newest owned entry; every rank before it is new.
    Boundary(usize),
    /// Nothing in the window is owned; the whole window is presumed new.
    AllNew,
}

/// How a batch run decides what to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// Fetch exactly the first N entries regardless of ownership.
    Count(usize),
    /// Fetch everything newer than the ownership boundary.
    Boundary,
}

/// The ordered set of entries a batch run will fetch.
///
/// Plans are always a prefix of the window: explicit counts take the
/// first N ranks, and boundary mode takes every rank before the newest
/// owned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    /// Terminal success with no side effects.
    UpToDate,
    /// Fetch the first `n` entries, rank 1 first.
    Prefix(usize),
}

/// Scan from rank 1 upward for the first entry whose filename is owned.
pub fn find_boundary(entries: &[Entry], owned: &OwnershipIndex) -> BoundaryScan {
    for entry in entries {
        if owned.contains(&entry.filename) {
            return if entry.position == 1 {
                BoundaryScan::UpToDate
            } else {
                BoundaryScan::Boundary(entry.position)
            };
        }
    }
    BoundaryScan::AllNew
}

/// Produce the fetch plan for a batch run.
///
/// An explicit count larger than the window the feed actually returned is
/// a configuration error, raised before any download side effect.
pub fn plan(entries: &[Entry], mode: PlanMode, owned: &OwnershipIndex) -> Result<FetchPlan> {
    match mode {
        PlanMode::Count(n) => {
            if n > entries.len() {
                return Err(ModfetchError::Config(format!(
                    "count {} exceeds the {} entries the feed returned",
                    n,
                    entries.len()
                )));
            }
            Ok(FetchPlan::Prefix(n))
        }
        PlanMode::Boundary => Ok(match find_boundary(entries, owned) {
            BoundaryScan::UpToDate => FetchPlan::UpToDate,
            BoundaryScan::Boundary(rank) => FetchPlan::Prefix(rank - 1),
            BoundaryScan::AllNew => FetchPlan::Prefix(entries.len()),
        }),
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

    fn owning(names: &[&str]) -> OwnershipIndex {
        let mut index = OwnershipIndex::default();
        for name in names {
            index.insert(name.to_string());
        }
        index
    }

    #[test]
    fn test_up_to_date_iff_rank_one_owned() {
        let window = entries(5);
        assert_eq!(
            find_boundary(&window, &owning(&["mod01.mod"])),
            BoundaryScan::UpToDate
        );
        assert_ne!(
            find_boundary(&window, &owning(&["mod02.mod"])),
            BoundaryScan::UpToDate
        );
    }

    #[test]
    fn test_boundary_at_rank_three_fetches_two() {
        let window = entries(5);
        let owned = owning(&["mod03.mod"]);
        assert_eq!(find_boundary(&window, &owned), BoundaryScan::Boundary(3));
        assert_eq!(
            plan(&window, PlanMode::Boundary, &owned).unwrap(),
            FetchPlan::Prefix(2)
        );
    }

    #[test]
    fn test_nothing_owned_fetches_whole_window() {
        let window = entries(5);
        let owned = OwnershipIndex::default();
        assert_eq!(find_boundary(&window, &owned), BoundaryScan::AllNew);
        assert_eq!(
            plan(&window, PlanMode::Boundary, &owned).unwrap(),
            FetchPlan::Prefix(5)
        );
    }

    #[test]
    fn test_boundary_ignores_deeper_owned_entries() {
        // Ranks 3 and 5 owned: the scan stops at the first hit.
        let window = entries(5);
        let owned = owning(&["mod03.mod", "mod05.mod"]);
        assert_eq!(find_boundary(&window, &owned), BoundaryScan::Boundary(3));
    }

    #[test]
    fn test_up_to_date_plan_is_empty() {
        let window = entries(5);
        let owned = owning(&["mod01.mod", "mod02.mod"]);
        assert_eq!(
            plan(&window, PlanMode::Boundary, &owned).unwrap(),
            FetchPlan::UpToDate
        );
    }

    #[test]
    fn test_explicit_count_ignores_ownership() {
        // Rank 1 already owned; the plan still covers ranks 1 and 2 and
        // leaves the no-op to the downloader.
        let window = entries(5);
        let owned = owning(&["mod01.mod"]);
        assert_eq!(
            plan(&window, PlanMode::Count(2), &owned).unwrap(),
            FetchPlan::Prefix(2)
        );
    }

    #[test]
    fn test_count_past_window_is_config_error() {
        let window = entries(5);
        let result = plan(&window, PlanMode::Count(6), &OwnershipIndex::default());
        assert!(matches!(result, Err(ModfetchError::Config(_))));
    }

    #[test]
    fn test_second_run_with_unchanged_feed_is_up_to_date() {
        let window = entries(5);
        let mut owned = OwnershipIndex::default();

        // First run: nothing owned, the whole window gets fetched.
        assert_eq!(
            plan(&window, PlanMode::Boundary, &owned).unwrap(),
            FetchPlan::Prefix(5)
        );
        for entry in &window {
            owned.insert(entry.filename.clone());
        }

        // Second run against the same window downloads nothing.
        assert_eq!(
            plan(&window, PlanMode::Boundary, &owned).unwrap(),
            FetchPlan::UpToDate
        );
    }

    #[test]
    fn test_empty_window_is_all_new() {
        let window = entries(0);
        assert_eq!(
            find_boundary(&window, &OwnershipIndex::default()),
            BoundaryScan::AllNew
        );
        assert_eq!(
            plan(&window, PlanMode::Boundary, &OwnershipIndex::default()).unwrap(),
            FetchPlan::Prefix(0)
        );
    }
}
