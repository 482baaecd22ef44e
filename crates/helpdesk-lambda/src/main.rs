use std::env;

use tracing_subscriber::EnvFilter;

use helpdesk_lambda::config::Config;
use helpdesk_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let app = helpdesk_lambda::router(AppState::from_config(&config));

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        // Streaming so the Gemini relay reaches the browser as it arrives.
        lambda_http::run_with_streaming_response(app)
            .await
            .map_err(|e| eyre::eyre!(e))
    } else {
        let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
        tracing::info!(addr = %config.bind_addr, "listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
