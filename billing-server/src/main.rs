use billing_server::{Server, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, config, logging)
    let config = setup_environment()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Billing server starting...");

    // 2. Serve until shutdown
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
