//! Trustmap CLI: offline queries over a dataset file
//!
//! Loads the entity snapshot directly; no server required.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use trustmap::algo::{
    build_view, find_all_paths, find_entities_within_degrees, find_path_to_center,
    find_shortest_path, GraphView, PathResult,
};
use trustmap::metrics::{get_all_metrics, NetworkMetrics};
use trustmap::{EntityStore, PatternClassifier, TemplateExplainer};

#[derive(Parser)]
#[command(name = "trustmap", version, about = "Trustmap decentralization graph CLI")]
struct Cli {
    /// Dataset file (JSON array of entities)
    #[arg(long, default_value = "data/entities.json", global = true, env = "TRUSTMAP_DATASET")]
    data: String,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest path between two entities
    Path { from: String, to: String },
    /// All simple paths between two entities
    Paths {
        from: String,
        to: String,
        /// Maximum path length in hops
        #[arg(long, default_value_t = 5)]
        max: usize,
    },
    /// Explained path from an entity to a reference entity
    Center { from: String, center: String },
    /// Entities within N hops
    Neighbors {
        id: String,
        #[arg(long, default_value_t = 2)]
        degrees: usize,
    },
    /// Whole-graph metrics
    Metrics {
        /// Length of the ranked lists
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = EntityStore::load(&cli.data)?;
    let classifier = PatternClassifier::new();
    let view = build_view(&store, &classifier);

    match &cli.command {
        Commands::Path { from, to } => {
            let path = find_shortest_path(&view, from, to);
            emit(&cli.format, &path, || print_paths(&store, std::slice::from_ref(&path)))
        }
        Commands::Paths { from, to, max } => {
            let paths = find_all_paths(&view, from, to, *max);
            emit(&cli.format, &paths, || print_paths(&store, &paths))
        }
        Commands::Center { from, center } => {
            let explainer = TemplateExplainer::new();
            let result = find_path_to_center(&view, &store, from, center, &explainer);
            emit(&cli.format, &result, || {
                let mut table = new_table(&["Step", "From", "To", "Type", "Explanation"]);
                for hop in &result.hop_explanations {
                    table.add_row(vec![
                        hop.step.to_string(),
                        hop.from_name.clone(),
                        hop.to_name.clone(),
                        hop.edge_type.to_string(),
                        hop.explanation.clone(),
                    ]);
                }
                if !result.hop_explanations.is_empty() {
                    println!("{}", table);
                }
                println!("{}", result.narrative);
                println!("Trust distance: {}", result.trust_distance);
            })
        }
        Commands::Neighbors { id, degrees } => {
            let mut reached: Vec<(String, usize)> =
                find_entities_within_degrees(&view, id, *degrees).into_iter().collect();
            reached.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            emit(&cli.format, &reached, || print_neighbors(&store, &view, &reached))
        }
        Commands::Metrics { top } => {
            let metrics = get_all_metrics(&store, &classifier, *top);
            emit(&cli.format, &metrics, || print_metrics(&metrics))
        }
    }
}

fn emit<T: Serialize>(
    format: &OutputFormat,
    value: &T,
    table: impl FnOnce(),
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => table(),
    }
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn name_of(store: &EntityStore, id: &str) -> String {
    store
        .get_entity(id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn print_paths(store: &EntityStore, paths: &[PathResult]) {
    if paths.iter().all(|p| !p.found) {
        println!("(no path found)");
        return;
    }

    let mut table = new_table(&["Hops", "Path"]);
    for path in paths {
        let names: Vec<String> = path.path.iter().map(|id| name_of(store, id)).collect();
        table.add_row(vec![path.distance.to_string(), names.join(" → ")]);
    }
    println!("{}", table);
    println!("{} path(s)", paths.len());
}

fn print_neighbors(store: &EntityStore, view: &GraphView, reached: &[(String, usize)]) {
    if reached.is_empty() {
        println!("(unknown entity)");
        return;
    }

    let mut table = new_table(&["Hops", "Entity", "Score", "Degree"]);
    for (id, hops) in reached {
        let score = store
            .get_entity(id)
            .map(|e| e.score().to_string())
            .unwrap_or_default();
        let degree = view.index_of(id).map(|idx| view.degree(idx)).unwrap_or(0);
        table.add_row(vec![
            hops.to_string(),
            name_of(store, id),
            score,
            degree.to_string(),
        ]);
    }
    println!("{}", table);
}

fn print_metrics(metrics: &NetworkMetrics) {
    println!("Entities:                {}", metrics.total_entities);
    println!("Average score:           {}", metrics.avg_centralization);
    println!("Custody concentration:   {}%", metrics.custody_concentration.percentage);
    println!("Regulatory capture:      {:.1} / 10", metrics.regulatory_capture.index);
    println!(
        "Network centralization:  {:?} (density {:.3}, {} hubs)",
        metrics.network_centralization.level,
        metrics.network_centralization.density,
        metrics.network_centralization.hub_count
    );

    let mut dist = new_table(&["Score range", "Entities"]);
    for bucket in &metrics.distribution {
        dist.add_row(vec![bucket.range.clone(), bucket.count.to_string()]);
    }
    println!("{}", dist);

    let mut ranked = new_table(&["Most centralized", "Score"]);
    for entity in &metrics.most_centralized {
        ranked.add_row(vec![entity.name.clone(), entity.score.to_string()]);
    }
    println!("{}", ranked);

    let mut types = new_table(&["Connection type", "Count", "%"]);
    for row in &metrics.connection_breakdown {
        types.add_row(vec![
            row.edge_type.to_string(),
            row.count.to_string(),
            row.percentage.to_string(),
        ]);
    }
    println!("{}", types);
}
