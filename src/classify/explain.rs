//! Natural-language explanation of a single relationship
//!
//! Templates are tried in order; the first whose predicate accepts the
//! relationship produces the explanation. The last entry accepts everything.
//! Each explanation keeps its one-sentence summary apart from the optional
//! detail, so callers never have to split rendered text.

use crate::graph::{EdgeType, Entity, EntityType};
use serde::Serialize;
use std::fmt;

/// Rendered explanation of one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// Single sentence naming both entities
    pub summary: String,
    /// Why the relationship matters, if the template says more
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Explanation {
    pub fn new(summary: impl Into<String>) -> Self {
        Explanation {
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} {}", self.summary, detail),
            None => write!(f, "{}", self.summary),
        }
    }
}

/// Produces a human-readable explanation of one connection.
///
/// Implementations must be total and always return some text.
pub trait ExplanationGenerator: Send + Sync {
    fn explain(
        &self,
        source: &Entity,
        target: &Entity,
        relationship: &str,
        edge_type: EdgeType,
    ) -> Explanation;
}

/// Inputs a template sees
pub struct ExplainContext<'a> {
    pub source: &'a Entity,
    pub target: &'a Entity,
    pub relationship: &'a str,
    pub edge_type: EdgeType,
}

impl ExplainContext<'_> {
    fn mentions(&self, needle: &str) -> bool {
        self.relationship.to_lowercase().contains(needle)
    }
}

struct Template {
    applies: fn(&ExplainContext) -> bool,
    render: fn(&ExplainContext) -> Explanation,
}

const TEMPLATES: &[Template] = &[
    Template {
        applies: |c| c.mentions("issued by"),
        render: |c| {
            Explanation::new(format!("{} is issued by {}.", c.source.name, c.target.name))
                .with_detail(format!(
                    "Holders depend on {} to honour redemptions and it can freeze balances at its discretion.",
                    c.target.name
                ))
        },
    },
    Template {
        applies: |c| c.mentions("issuer of") || c.mentions("issues"),
        render: |c| {
            Explanation::new(format!("{} issues {}.", c.source.name, c.target.name)).with_detail(
                format!(
                    "Every holder of {} trusts {} as the redemption counterparty.",
                    c.target.name, c.source.name
                ),
            )
        },
    },
    Template {
        applies: |c| c.edge_type == EdgeType::Custody,
        render: |c| {
            Explanation::new(format!(
                "{} and {} are linked through custody ({}).",
                c.source.name, c.target.name, c.relationship
            ))
            .with_detail("Whoever holds the assets can freeze, lose or rehypothecate them.")
        },
    },
    Template {
        applies: |c| {
            c.edge_type == EdgeType::Regulatory && c.source.entity_type == EntityType::Government
        },
        render: |c| {
            Explanation::new(format!(
                "{} has regulatory authority over {} ({}).",
                c.source.name, c.target.name, c.relationship
            ))
            .with_detail(format!(
                "State power can compel changes to how {} operates.",
                c.target.name
            ))
        },
    },
    Template {
        applies: |c| c.edge_type == EdgeType::Regulatory,
        render: |c| {
            Explanation::new(format!(
                "{} is subject to oversight from {} ({}).",
                c.source.name, c.target.name, c.relationship
            ))
            .with_detail(format!(
                "Compliance obligations give {} leverage over its decisions.",
                c.target.name
            ))
        },
    },
    Template {
        applies: |c| c.edge_type == EdgeType::BoardSeat,
        render: |c| {
            Explanation::new(format!(
                "{} shares governance with {} through a board seat ({}).",
                c.source.name, c.target.name, c.relationship
            ))
            .with_detail("Overlapping boards concentrate decision-making.")
        },
    },
    Template {
        applies: |c| c.edge_type == EdgeType::Ownership,
        render: |c| {
            Explanation::new(format!(
                "{} is tied to {} by ownership or control ({}).",
                c.source.name, c.target.name, c.relationship
            ))
            .with_detail("One party can direct the other.")
        },
    },
    Template {
        applies: |c| c.edge_type == EdgeType::Funding,
        render: |c| {
            Explanation::new(format!(
                "{} is financially linked to {} ({}).",
                c.source.name, c.target.name, c.relationship
            ))
            .with_detail("Capital providers gain influence over priorities.")
        },
    },
    Template {
        applies: |c| c.edge_type == EdgeType::Partnership,
        render: |c| {
            Explanation::new(format!(
                "{} partners with {} ({}).",
                c.source.name, c.target.name, c.relationship
            ))
            .with_detail("Partnerships create operational dependencies.")
        },
    },
    Template {
        applies: |_| true,
        render: |c| {
            Explanation::new(format!(
                "{} is connected to {}: {}.",
                c.source.name, c.target.name, c.relationship
            ))
        },
    },
];

/// Template-table explanation generator
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    pub fn new() -> Self {
        TemplateExplainer
    }
}

impl ExplanationGenerator for TemplateExplainer {
    fn explain(
        &self,
        source: &Entity,
        target: &Entity,
        relationship: &str,
        edge_type: EdgeType,
    ) -> Explanation {
        let ctx = ExplainContext {
            source,
            target,
            relationship,
            edge_type,
        };

        TEMPLATES
            .iter()
            .find(|t| (t.applies)(&ctx))
            .map(|t| (t.render)(&ctx))
            .unwrap_or_else(|| {
                Explanation::new(format!("{} is connected to {}.", source.name, target.name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explain(source: &Entity, target: &Entity, rel: &str, edge_type: EdgeType) -> Explanation {
        TemplateExplainer::new().explain(source, target, rel, edge_type)
    }

    #[test]
    fn test_issued_by_template() {
        let usdc = Entity::new("usdc", "USDC", EntityType::Stablecoin);
        let circle = Entity::new("circle", "Circle", EntityType::Organization);

        let text = explain(&usdc, &circle, "issued by", EdgeType::Ownership);
        assert_eq!(text.summary, "USDC is issued by Circle.");
        assert!(text.detail.unwrap().contains("freeze balances"));
    }

    #[test]
    fn test_regulatory_direction() {
        let sec = Entity::new("sec", "SEC", EntityType::Government);
        let exchange = Entity::new("exchange", "Exchange", EntityType::Organization);

        let from_gov = explain(&sec, &exchange, "regulates", EdgeType::Regulatory);
        assert!(from_gov.summary.starts_with("SEC has regulatory authority over Exchange"));

        let to_gov = explain(&exchange, &sec, "regulated by", EdgeType::Regulatory);
        assert!(to_gov.summary.starts_with("Exchange is subject to oversight from SEC"));
    }

    #[test]
    fn test_summary_keeps_abbreviated_names() {
        let sec = Entity::new(
            "sec",
            "U.S. Securities and Exchange Commission",
            EntityType::Government,
        );
        let circle = Entity::new("circle", "Circle", EntityType::Organization);

        let text = explain(&circle, &sec, "registered with", EdgeType::Regulatory);
        assert_eq!(
            text.summary,
            "Circle is subject to oversight from U.S. Securities and Exchange Commission \
             (registered with)."
        );
        assert!(text.to_string().starts_with(&text.summary));
    }

    #[test]
    fn test_fallback_template() {
        let a = Entity::new("a", "Alpha", EntityType::Concept);
        let b = Entity::new("b", "Beta", EntityType::Event);
        let text = explain(&a, &b, "mentioned alongside", EdgeType::Other);
        assert_eq!(text.summary, "Alpha is connected to Beta: mentioned alongside.");
        assert_eq!(text.detail, None);
        assert_eq!(text.to_string(), text.summary);
    }
}
