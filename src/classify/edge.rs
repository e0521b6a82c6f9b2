//! Relationship text -> edge type
//!
//! Patterns are evaluated in a fixed priority order and the first match wins:
//! custody, regulatory, board seat, ownership, funding, partnership. Anything
//! unmatched is `other`. The order is part of the contract: "treasury custodian
//! and partner" is custody, not partnership.

use crate::graph::EdgeType;
use regex::Regex;
use std::sync::LazyLock;

/// Maps free-text relationship descriptions to an `EdgeType`.
///
/// Implementations must be total: unmatched text maps to `EdgeType::Other`.
pub trait EdgeClassifier: Send + Sync {
    fn classify(&self, relationship: &str) -> EdgeType;
}

struct EdgePattern {
    regex: Regex,
    edge_type: EdgeType,
}

static EDGE_PATTERNS: LazyLock<Vec<EdgePattern>> = LazyLock::new(|| {
    [
        (
            EdgeType::Custody,
            r"(?i)custod|reserves?\b|treasur|safekeep|\bholds?\b|deposit",
        ),
        (
            EdgeType::Regulatory,
            r"(?i)regulat|licen[cs]|supervis|oversight|sanction|complian|enforce|charter|registered with",
        ),
        (
            EdgeType::BoardSeat,
            r"(?i)\bboard\b|director|\bchair|trustee|advis[eo]r",
        ),
        (
            EdgeType::Ownership,
            r"(?i)\bown|subsidiar|parent|acquir|issu(e|ed|er|es|ing)\b|\bcontrol|found(ed|er|ers|ing)\b|operat(ed|es|or)",
        ),
        (
            EdgeType::Funding,
            r"(?i)fund|invest|\bback(ed|er|ers|s)?\b|financ|grant|\blend|loan|\bcapital",
        ),
        (
            EdgeType::Partnership,
            r"(?i)partner|collaborat|integrat|allian|joint|member|cooperat",
        ),
    ]
    .into_iter()
    .map(|(edge_type, pattern)| EdgePattern {
        regex: Regex::new(pattern).expect("edge pattern is a valid regex"),
        edge_type,
    })
    .collect()
});

/// Keyword classifier backed by the ordered pattern table
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier;

impl PatternClassifier {
    pub fn new() -> Self {
        PatternClassifier
    }
}

impl EdgeClassifier for PatternClassifier {
    fn classify(&self, relationship: &str) -> EdgeType {
        EDGE_PATTERNS
            .iter()
            .find(|p| p.regex.is_match(relationship))
            .map(|p| p.edge_type)
            .unwrap_or(EdgeType::Other)
    }
}
