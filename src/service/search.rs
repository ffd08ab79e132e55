use crate::storage::link::Link;

/// Filter `links` by `query`, preserving their order.
///
/// Case-insensitive substring match against title or description. The query
/// is used as typed: no trimming, so an empty query keeps every link. The url
/// is never searched.
pub fn filter_links<'a, I>(query: &str, links: I) -> Vec<&'a Link>
where
    I: IntoIterator<Item = &'a Link>,
{
    let query_lower = query.to_lowercase();
    links
        .into_iter()
        .filter(|link| {
            link.title.to_lowercase().contains(&query_lower)
                || link.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Why the list has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoLinksYet,
    NothingFound,
}

impl EmptyState {
    /// `None` when there are results. Otherwise the message depends only on
    /// whether a query was typed, the same as the web form does.
    pub fn for_results(query: &str, results_len: usize) -> Option<Self> {
        if results_len > 0 {
            None
        } else if query.is_empty() {
            Some(EmptyState::NoLinksYet)
        } else {
            Some(EmptyState::NothingFound)
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoLinksYet => "Пока нет сохраненных ссылок",
            EmptyState::NothingFound => "Ничего не найдено",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            EmptyState::NoLinksYet => "Добавьте первую ссылку с помощью формы выше",
            EmptyState::NothingFound => "Попробуйте изменить поисковый запрос",
        }
    }
}
