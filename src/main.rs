use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};
use trustmap::{AppConfig, AppState, EntityStore, HttpServer};

/// Level used until the configured one is known
const STARTUP_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// fmt subscriber whose filter can be swapped once the config is loaded
fn subscriber() -> (
    impl Subscriber + Send + Sync,
    reload::Handle<EnvFilter, Registry>,
) {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(STARTUP_LOG_LEVEL));
    let subscriber = tracing_subscriber::registry().with(filter).with(fmt::layer());
    (subscriber, handle)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing before the config so loading is logged
    let (subscriber, log_filter) = subscriber();
    subscriber.init();

    // Optional config path as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => {
            let mut config = AppConfig::default();
            config.apply_env_overrides()?;
            config
        }
    };
    log_filter.modify(|filter| *filter = EnvFilter::new(&config.log.level))?;

    println!("Trustmap v{}", trustmap::version());
    println!("==========================================");

    let store = EntityStore::load(&config.dataset.path)?;
    println!("Snapshot: {} entities, {} connections", store.len(), store.connection_count());

    let state = Arc::new(AppState::new(store, config.analysis.clone()));
    let server = HttpServer::new(state, config.bind_addr());
    server.start().await
}
