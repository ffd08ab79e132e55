use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use std::path::{Path, PathBuf};

use crate::service::draft::Draft;
use crate::service::search::{EmptyState, filter_links};
use crate::storage::{Link, LinkStore};

/// Owns the link store and the add/search operations the UI drives
pub struct LinkService {
    store: LinkStore,
}

impl LinkService {
    pub fn new() -> Self {
        LinkService {
            store: LinkStore::new(),
        }
    }

    /// Service preloaded with the two sample links, GitHub first
    pub fn with_sample_links() -> Self {
        let mut service = Self::new();
        let samples = [
            (
                2,
                "https://dribbble.com",
                "Dribbble",
                "Сообщество дизайнеров для вдохновения и портфолио",
                Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0),
            ),
            (
                1,
                "https://github.com",
                "GitHub",
                "Платформа для разработчиков и совместной работы над кодом",
                Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0),
            ),
        ];
        for (id, url, title, description, created_at) in samples {
            // Fixed calendar dates always resolve in UTC
            if let Some(created_at) = created_at.single() {
                service.store.add(Link::with_created_at(
                    id,
                    url.to_string(),
                    title.to_string(),
                    description.to_string(),
                    created_at,
                ));
            }
        }
        service
    }

    /// Commit the draft as a new link.
    ///
    /// Returns `None` and leaves both draft and store untouched when url or
    /// title is empty. On success the draft is cleared.
    pub fn submit(&mut self, draft: &mut Draft) -> Option<Link> {
        if !draft.is_complete() {
            tracing::debug!(
                url_present = !draft.url.is_empty(),
                title_present = !draft.title.is_empty(),
                "draft rejected"
            );
            return None;
        }

        let id = self.store.next_id();
        let link = Link::new(
            id,
            std::mem::take(&mut draft.url),
            std::mem::take(&mut draft.title),
            std::mem::take(&mut draft.description),
        );
        draft.reset();
        self.store.add(link.clone());
        tracing::info!(id = link.id, url = %link.url, "link added");
        Some(link)
    }

    pub fn links(&self) -> &LinkStore {
        &self.store
    }

    pub fn search(&self, query: &str) -> Vec<&Link> {
        filter_links(query, self.store.all())
    }

    pub fn empty_state(&self, query: &str) -> Option<EmptyState> {
        EmptyState::for_results(query, self.search(query).len())
    }

    /// Write `links` as pretty JSON into `dir`, named after the current time
    pub fn export_json(&self, links: &[&Link], dir: &Path) -> Result<PathBuf> {
        let file_name = format!("links-{}.json", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        let path = dir.join(file_name);
        let json = serde_json::to_string_pretty(links)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        tracing::info!(count = links.len(), path = %path.display(), "exported links");
        Ok(path)
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::draft::Field;

    fn draft(url: &str, title: &str, description: &str) -> Draft {
        let mut draft = Draft::new();
        draft.set_field(Field::Url, url);
        draft.set_field(Field::Title, title);
        draft.set_field(Field::Description, description);
        draft
    }

    fn add(service: &mut LinkService, url: &str, title: &str, description: &str) -> Link {
        service
            .submit(&mut draft(url, title, description))
            .expect("complete draft should be accepted")
    }

    #[test]
    fn submit_prepends_and_clears_draft() {
        let mut service = LinkService::with_sample_links();
        let existing: Vec<u64> = service.links().all().iter().map(|l| l.id).collect();

        let mut form = draft("https://a.com", "A", "");
        let link = service.submit(&mut form).unwrap();

        let first = service.links().get(0).unwrap();
        assert_eq!(first, &link);
        assert_eq!(first.url, "https://a.com");
        assert_eq!(first.title, "A");
        assert_eq!(first.description, "");
        assert!(!existing.contains(&first.id));
        assert_eq!(form, Draft::default());
    }

    #[test]
    fn empty_title_is_rejected_silently() {
        let mut service = LinkService::with_sample_links();
        let before = service.links().all().clone();

        let mut form = draft("https://a.com", "", "kept");
        assert!(service.submit(&mut form).is_none());

        assert_eq!(service.links().all(), &before);
        assert_eq!(form.url, "https://a.com");
        assert_eq!(form.description, "kept");
    }

    #[test]
    fn empty_url_is_rejected_silently() {
        let mut service = LinkService::with_sample_links();
        let before = service.links().all().clone();

        assert!(service.submit(&mut draft("", "A", "")).is_none());
        assert_eq!(service.links().all(), &before);
    }

    #[test]
    fn newest_first() {
        let mut service = LinkService::new();
        let x = add(&mut service, "https://x.com", "X", "");
        let y = add(&mut service, "https://y.com", "Y", "");
        let all: Vec<&Link> = service.links().all().iter().collect();
        assert_eq!(all, vec![&y, &x]);
    }

    #[test]
    fn rapid_submits_get_distinct_increasing_ids() {
        let mut service = LinkService::with_sample_links();
        let ids: Vec<u64> = (0..50)
            .map(|i| add(&mut service, "https://a.com", &format!("A{}", i), "").id)
            .collect();
        assert!(ids[0] > 2);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut service = LinkService::new();
        add(&mut service, "https://a.com", "A", "");
        add(&mut service, "https://a.com", "A", "");
        assert_eq!(service.links().len(), 2);
    }

    #[test]
    fn samples_match_the_starting_list() {
        let service = LinkService::with_sample_links();
        let all = service.links().all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "GitHub");
        assert_eq!(all[0].id, 1);
        assert_eq!(crate::storage::link::format_ru_date(&all[0].created_at), "15.01.2024");
        assert_eq!(all[1].title, "Dribbble");
        assert_eq!(all[1].url, "https://dribbble.com");
    }

    #[test]
    fn search_goes_through_description() {
        let service = LinkService::with_sample_links();
        let found = service.search("платформа");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "GitHub");
        assert_eq!(service.search("").len(), 2);
    }

    #[test]
    fn empty_states() {
        let mut service = LinkService::new();
        assert_eq!(service.empty_state(""), Some(EmptyState::NoLinksYet));
        assert_eq!(service.empty_state("x"), Some(EmptyState::NothingFound));

        add(&mut service, "https://a.com", "Alpha", "");
        assert_eq!(service.empty_state(""), None);
        assert_eq!(service.empty_state("alp"), None);
        assert_eq!(service.empty_state("zzz"), Some(EmptyState::NothingFound));
    }

    #[test]
    fn export_writes_visible_links() {
        let dir = tempfile::tempdir().unwrap();
        let service = LinkService::with_sample_links();
        let visible = service.search("git");

        let path = service.export_json(&visible, dir.path()).unwrap();
        let written: Vec<Link> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(written.len(), 1);
        assert_eq!(&written[0], visible[0]);
    }
}
