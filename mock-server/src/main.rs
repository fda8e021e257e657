use mock_server::Fixtures;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // FIXTURES points at a JSON file shaped like `Fixtures`; the built-in
    // sample is served otherwise.
    let fixtures = match std::env::var("FIXTURES") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)?;
            info!(%path, "loaded fixtures");
            serde_json::from_str(&raw)?
        }
        Err(_) => Fixtures::sample(),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}/api.php");
    mock_server::run(listener, fixtures).await?;
    Ok(())
}
