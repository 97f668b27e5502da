#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::path::PathBuf;

    use planner_tool::{Planner, PlannerConfig, http_api};
    use tracing_subscriber::EnvFilter;

    let config_path = std::env::var_os("PLANNER_TOOL_CONFIG").map(PathBuf::from);
    let config = PlannerConfig::load(config_path.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let addr: SocketAddr = config.http_addr.parse()?;
    println!("planner-tool HTTP API listening on http://{addr}");
    let planner = Planner::with_config(&config);
    http_api::serve(addr, planner, config).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
