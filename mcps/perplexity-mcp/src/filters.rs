//! Per-session search filters
//!
//! Holds the domain allow/block lists and the recency window that are applied
//! to every search request.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Perplexity accepts at most this many entries in `search_domain_filter`
pub const MAX_DOMAIN_FILTERS: usize = 3;

/// What to do with a domain passed to `domain_filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DomainAction {
    Allow,
    Block,
}

/// Trailing time window for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecencyWindow {
    Hour,
    Day,
    Week,
    Month,
}

impl RecencyWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecencyWindow::Hour => "hour",
            RecencyWindow::Day => "day",
            RecencyWindow::Week => "week",
            RecencyWindow::Month => "month",
        }
    }

    /// Human-readable span, e.g. "7 days"
    pub fn span(&self) -> &'static str {
        match self {
            RecencyWindow::Hour => "hour",
            RecencyWindow::Day => "24 hours",
            RecencyWindow::Week => "7 days",
            RecencyWindow::Month => "30 days",
        }
    }
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value accepted by the `recency_filter` tool: a window, or `none` to clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecencyChoice {
    Hour,
    Day,
    Week,
    Month,
    None,
}

impl From<RecencyChoice> for Option<RecencyWindow> {
    fn from(choice: RecencyChoice) -> Self {
        match choice {
            RecencyChoice::Hour => Some(RecencyWindow::Hour),
            RecencyChoice::Day => Some(RecencyWindow::Day),
            RecencyChoice::Week => Some(RecencyWindow::Week),
            RecencyChoice::Month => Some(RecencyWindow::Month),
            RecencyChoice::None => None,
        }
    }
}

/// Reduce user input such as `https://en.wikipedia.org/wiki/Rust` to a bare
/// host (`en.wikipedia.org`).
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Domain and recency filters for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    allowed_domains: Vec<String>,
    blocked_domains: Vec<String>,
    recency: Option<RecencyWindow>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    pub fn blocked_domains(&self) -> &[String] {
        &self.blocked_domains
    }

    pub fn recency(&self) -> Option<RecencyWindow> {
        self.recency
    }

    /// Add an already-normalized domain to one list, removing it from the other
    pub fn apply_domain(&mut self, domain: &str, action: DomainAction) {
        let (target, other) = match action {
            DomainAction::Allow => (&mut self.allowed_domains, &mut self.blocked_domains),
            DomainAction::Block => (&mut self.blocked_domains, &mut self.allowed_domains),
        };

        other.retain(|d| d != domain);
        if !target.iter().any(|d| d == domain) {
            target.push(domain.to_string());
        }
    }

    pub fn set_recency(&mut self, window: Option<RecencyWindow>) {
        self.recency = window;
    }

    /// Remove every domain and the recency window
    pub fn clear(&mut self) {
        self.allowed_domains.clear();
        self.blocked_domains.clear();
        self.recency = None;
    }

    /// The `search_domain_filter` list for an outbound request
    ///
    /// Allowed domains fill the slots first; any slots left over go to blocked
    /// domains, which are prefixed with `-`.
    pub fn domain_filter(&self) -> Vec<String> {
        let mut filter: Vec<String> = self
            .allowed_domains
            .iter()
            .take(MAX_DOMAIN_FILTERS)
            .cloned()
            .collect();

        let remaining = MAX_DOMAIN_FILTERS - filter.len();
        filter.extend(
            self.blocked_domains
                .iter()
                .take(remaining)
                .map(|d| format!("-{d}")),
        );

        filter
    }

    /// Multi-line summary used by `list_filters`
    pub fn describe(&self) -> String {
        let allowed = if self.allowed_domains.is_empty() {
            "No allowed domains configured.".to_string()
        } else {
            format!("Allowed domains: {}", self.allowed_domains.join(", "))
        };

        let blocked = if self.blocked_domains.is_empty() {
            "No blocked domains configured.".to_string()
        } else {
            format!("Blocked domains: {}", self.blocked_domains.join(", "))
        };

        let recency = match self.recency {
            Some(window) => format!(
                "Recency filter: {} (limiting to content from the last {})",
                window,
                window.span()
            ),
            None => "No recency filter configured.".to_string(),
        };

        format!(
            "Current filters:\n\n{allowed}\n{blocked}\n{recency}\n\n\
             Note: Perplexity API supports up to {MAX_DOMAIN_FILTERS} domains total \
             with priority given to allowed domains."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("https://wikipedia.org/Foo"), "wikipedia.org");
        assert_eq!(normalize_domain("http://example.com"), "example.com");
        assert_eq!(normalize_domain("  news.ycombinator.com/item?id=1 "), "news.ycombinator.com");
        assert_eq!(normalize_domain("docs.rs"), "docs.rs");
        assert_eq!(normalize_domain("https:///path"), "");
    }

    #[test]
    fn test_allow_then_block_moves_domain() {
        let mut filters = FilterState::new();
        filters.apply_domain("example.com", DomainAction::Allow);
        filters.apply_domain("example.com", DomainAction::Block);

        assert!(filters.allowed_domains().is_empty());
        assert_eq!(filters.blocked_domains(), ["example.com"]);
    }

    #[test]
    fn test_block_then_allow_moves_domain() {
        let mut filters = FilterState::new();
        filters.apply_domain("example.com", DomainAction::Block);
        filters.apply_domain("example.com", DomainAction::Allow);

        assert_eq!(filters.allowed_domains(), ["example.com"]);
        assert!(filters.blocked_domains().is_empty());
    }

    #[test]
    fn test_duplicate_domain_is_not_repeated() {
        let mut filters = FilterState::new();
        filters.apply_domain("rust-lang.org", DomainAction::Allow);
        filters.apply_domain("rust-lang.org", DomainAction::Allow);
        assert_eq!(filters.allowed_domains().len(), 1);
    }

    #[test]
    fn test_no_limit_at_insertion() {
        let mut filters = FilterState::new();
        for d in ["a.com", "b.com", "c.com", "d.com", "e.com"] {
            filters.apply_domain(d, DomainAction::Allow);
        }
        assert_eq!(filters.allowed_domains().len(), 5);
        assert_eq!(filters.domain_filter(), ["a.com", "b.com", "c.com"]);
    }

    #[test]
    fn test_domain_filter_drops_blocked_when_allowed_full() {
        let mut filters = FilterState::new();
        for d in ["a.com", "b.com", "c.com"] {
            filters.apply_domain(d, DomainAction::Allow);
        }
        for d in ["x.com", "y.com"] {
            filters.apply_domain(d, DomainAction::Block);
        }

        assert_eq!(filters.domain_filter(), ["a.com", "b.com", "c.com"]);
    }

    #[test]
    fn test_domain_filter_fills_with_blocked() {
        let mut filters = FilterState::new();
        filters.apply_domain("a.com", DomainAction::Allow);
        for d in ["v.com", "w.com", "x.com", "y.com", "z.com"] {
            filters.apply_domain(d, DomainAction::Block);
        }

        assert_eq!(filters.domain_filter(), ["a.com", "-v.com", "-w.com"]);
    }

    #[test]
    fn test_domain_filter_empty_by_default() {
        assert!(FilterState::new().domain_filter().is_empty());
    }

    #[test]
    fn test_recency_choice_conversion() {
        assert_eq!(Option::<RecencyWindow>::from(RecencyChoice::Week), Some(RecencyWindow::Week));
        assert_eq!(Option::<RecencyWindow>::from(RecencyChoice::None), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut filters = FilterState::new();
        filters.apply_domain("a.com", DomainAction::Allow);
        filters.apply_domain("b.com", DomainAction::Block);
        filters.set_recency(Some(RecencyWindow::Day));

        filters.clear();

        assert_eq!(filters, FilterState::new());
        assert!(filters.recency().is_none());
    }

    #[test]
    fn test_describe_lists_current_state() {
        let mut filters = FilterState::new();
        let empty = filters.describe();
        assert!(empty.contains("No allowed domains configured."));
        assert!(empty.contains("No blocked domains configured."));
        assert!(empty.contains("No recency filter configured."));

        filters.apply_domain("wikipedia.org", DomainAction::Allow);
        filters.apply_domain("pinterest.com", DomainAction::Block);
        filters.set_recency(Some(RecencyWindow::Month));

        let text = filters.describe();
        assert!(text.contains("Allowed domains: wikipedia.org"));
        assert!(text.contains("Blocked domains: pinterest.com"));
        assert!(text.contains("Recency filter: month (limiting to content from the last 30 days)"));
        assert!(text.contains("up to 3 domains"));
    }
}
