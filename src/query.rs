use crate::dates::normalize_date;
use crate::types::{EpisodeRecord, Pagination, PodcastError, Result, SearchPage};
use chrono::{DateTime, Utc};

/// Caller-supplied search criteria. All filters are conjunctive; at least
/// one must be present or the search is rejected.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub show_name: Option<String>,
    pub since_date: Option<String>,
    pub before_date: Option<String>,
    pub hosts: Option<Vec<String>>,
    pub text_search: Option<String>,
}

impl SearchParams {
    pub fn has_criteria(&self) -> bool {
        self.show_name.is_some()
            || self.since_date.is_some()
            || self.before_date.is_some()
            || self.hosts.is_some()
            || self.text_search.is_some()
    }
}

/// Requested result window. Pages are 1-indexed.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, per_page: 5 }
    }
}

/// Search criteria with dates normalized and host/text needles lowercased
/// once, so per-record matching stays cheap.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    since: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
    hosts: Vec<String>,
    text: Option<String>,
}

impl CompiledQuery {
    /// Fails with `InvalidQuery` when no criterion is supplied; there is no
    /// "return everything" mode. A filter date that itself fails to parse
    /// leaves that filter inactive (the normalizer already logged it).
    pub fn compile(params: &SearchParams) -> Result<Self> {
        if !params.has_criteria() {
            return Err(PodcastError::InvalidQuery);
        }

        Ok(Self {
            since: params.since_date.as_deref().and_then(normalize_date),
            before: params.before_date.as_deref().and_then(normalize_date),
            hosts: params
                .hosts
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|h| h.to_lowercase())
                .collect(),
            text: params.text_search.as_deref().map(str::to_lowercase),
        })
    }

    /// Conjunctive match. A record whose own date does not normalize never
    /// satisfies an active date bound, so it is excluded rather than waved
    /// through.
    pub fn matches(&self, record: &EpisodeRecord) -> bool {
        if self.since.is_some() || self.before.is_some() {
            let published = normalize_date(&record.published_date);
            if let Some(since) = self.since {
                match published {
                    Some(date) if date >= since => {}
                    _ => return false,
                }
            }
            if let Some(before) = self.before {
                match published {
                    Some(date) if date <= before => {}
                    _ => return false,
                }
            }
        }

        if !self.hosts.is_empty() {
            let record_hosts: Vec<String> =
                record.hosts.iter().map(|h| h.to_lowercase()).collect();
            if !self.hosts.iter().any(|wanted| record_hosts.contains(wanted)) {
                return false;
            }
        }

        if let Some(needle) = &self.text {
            let title = record.title.to_lowercase();
            let description = record.description.to_lowercase();
            if !title.contains(needle) && !description.contains(needle) {
                return false;
            }
        }

        true
    }
}

/// Slices an already-filtered, already-ordered result set into one window.
/// Slicing past the end yields an empty window, not an error; `per_page` of
/// zero yields zero pages.
pub fn paginate(results: Vec<EpisodeRecord>, page: usize, per_page: usize) -> SearchPage {
    let total = results.len();
    let total_pages = if per_page > 0 {
        (total + per_page - 1) / per_page
    } else {
        0
    };

    let episodes = if per_page == 0 || page == 0 {
        Vec::new()
    } else {
        results
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect()
    };

    SearchPage {
        episodes,
        pagination: Pagination {
            total,
            page,
            per_page,
            total_pages,
        },
    }
}
