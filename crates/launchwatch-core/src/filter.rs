//! Operator relevance filtering on advisory summaries.

use crate::models::Advisory;

/// Operator and program names that mark an advisory as relevant.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "spacex",
    "starship",
    "starbase",
    "super heavy",
    "falcon",
    "dragon",
];

/// Keeps advisories whose `summary` mentions any keyword, ignoring case.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_relevant(&self, advisory: &Advisory) -> bool {
        let summary = advisory.summary.to_lowercase();
        self.keywords.iter().any(|k| summary.contains(k.as_str()))
    }

    /// Order-preserving subsequence of relevant advisories.
    pub fn apply(&self, advisories: Vec<Advisory>) -> Vec<Advisory> {
        advisories
            .into_iter()
            .filter(|a| self.is_relevant(a))
            .collect()
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn advisory(id: i64, summary: &str) -> Advisory {
        Advisory {
            advisoryid: id,
            summary: summary.to_string(),
            details: String::new(),
            advisorystarttime: "2024-01-01T00:00:00Z".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_keeps_operator_advisory() {
        let f = RelevanceFilter::default();
        assert!(f.is_relevant(&advisory(1, "Starship static fire advisory")));
        assert!(!f.is_relevant(&advisory(2, "Routine airspace notice")));
    }

    #[test]
    fn test_case_insensitive() {
        let f = RelevanceFilter::new(["SpaceX"]);
        assert!(f.is_relevant(&advisory(1, "SPACEX launch")));
        assert!(f.is_relevant(&advisory(2, "a spacex test")));
        assert!(!f.is_relevant(&advisory(3, "space x")));
    }

    #[test]
    fn test_apply_preserves_order() {
        let f = RelevanceFilter::default();
        let kept = f.apply(vec![
            advisory(3, "Falcon 9 launch"),
            advisory(1, "Airshow"),
            advisory(2, "Dragon recovery"),
            advisory(4, ""),
        ]);
        let ids: Vec<i64> = kept.iter().map(|a| a.advisoryid).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_blank_keywords_ignored() {
        let f = RelevanceFilter::new(["", "  ", "Starbase "]);
        assert_eq!(f.keywords(), &["starbase".to_string()]);
        assert!(!f.is_relevant(&advisory(1, "Routine airspace notice")));
    }
}
