//! Relationship classification and explanation
//!
//! Both collaborators are ordered strategy tables with a catch-all last entry,
//! exposed behind traits so the analysis layer only depends on their contracts.

pub mod edge;
pub mod explain;

pub use edge::{EdgeClassifier, PatternClassifier};
pub use explain::{ExplainContext, Explanation, ExplanationGenerator, TemplateExplainer};
