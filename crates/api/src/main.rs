use raze_api::app::{build_app, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    raze_observability::init();

    let waitlist_webhook_url = std::env::var("WEBHOOK_WAITLIST").unwrap_or_else(|_| {
        tracing::warn!("WEBHOOK_WAITLIST not set; using production default");
        "https://raze11.app.n8n.cloud/webhook/raze-waitlist".to_string()
    });
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = build_app(AppConfig {
        waitlist_webhook_url,
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
