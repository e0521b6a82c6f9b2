//! JSON API over an immutable snapshot
//!
//! The snapshot and its traversal view are built once and shared through an
//! `Arc`; handlers only read. The metrics cache locks internally.

pub mod handler;
pub mod server;

use crate::algo::{build_view, GraphView};
use crate::classify::{PatternClassifier, TemplateExplainer};
use crate::config::AnalysisConfig;
use crate::graph::EntityStore;
use crate::metrics::MetricsCache;

pub use server::{router, HttpServer};

/// Shared, read-only state of the API
pub struct AppState {
    pub store: EntityStore,
    pub view: GraphView,
    pub explainer: TemplateExplainer,
    pub metrics: MetricsCache,
    pub analysis: AnalysisConfig,
}

impl AppState {
    /// Project the snapshot once and prepare the metrics cache
    pub fn new(store: EntityStore, analysis: AnalysisConfig) -> Self {
        let classifier = PatternClassifier::new();
        let view = build_view(&store, &classifier);
        AppState {
            store,
            view,
            explainer: TemplateExplainer::new(),
            metrics: MetricsCache::with_classifier(analysis.metrics_cache_capacity, classifier),
            analysis,
        }
    }
}
