//! Prompt search.
//!
//! Plain case-insensitive substring matching over display name and
//! description. An empty query returns an overview of the store instead.

use serde::Serialize;
use std::collections::BTreeSet;

use super::record::PromptRecord;

const SUMMARY_MESSAGE: &str = "Please provide a search query to find specific prompts";
const SUMMARY_HINT: &str =
    "Try searching by category (e.g., \"react\", \"api\", \"security\") or description keywords";

/// Overview returned for an empty query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    pub total_prompts: usize,
    pub message: String,
    pub categories: Vec<String>,
    pub hint: String,
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Summary(SearchSummary),
    Matches(Vec<PromptRecord>),
}

impl SearchOutcome {
    /// Pretty-printed JSON for a text response.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Summary(summary) => serde_json::to_string_pretty(summary),
            Self::Matches(records) => serde_json::to_string_pretty(records),
        }
    }
}

/// Filter `records` by `query`, keeping their order.
pub fn search(query: &str, records: Vec<PromptRecord>) -> SearchOutcome {
    if query.trim().is_empty() {
        return SearchOutcome::Summary(summarize(&records));
    }

    let needle = query.to_lowercase();
    let matches = records
        .into_iter()
        .filter(|record| {
            record.display_name().to_lowercase().contains(&needle)
                || record
                    .description()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect();

    SearchOutcome::Matches(matches)
}

fn summarize(records: &[PromptRecord]) -> SearchSummary {
    let categories: BTreeSet<&str> = records.iter().map(PromptRecord::category).collect();

    SearchSummary {
        total_prompts: records.len(),
        message: SUMMARY_MESSAGE.to_string(),
        categories: categories.into_iter().map(str::to_string).collect(),
        hint: SUMMARY_HINT.to_string(),
    }
}
