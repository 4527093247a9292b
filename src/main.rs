use std::sync::Arc;

use ai_task_manager::config::AppConfig;
use ai_task_manager::llm::{create_provider, LlmProvider};
use ai_task_manager::routes::configure_routes;
use ai_task_manager::state::AppState;
use ai_task_manager::store;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let todo_store = store::connect(&config.store).await?;
    let provider: Arc<dyn LlmProvider> = Arc::from(create_provider(
        config.llm.api_base.clone(),
        config.llm.api_key.clone(),
        config.llm.model.clone(),
    )?);
    info!(
        model = config.llm.model.as_str(),
        api_base = %config.llm.api_base,
        "Language model client ready"
    );

    let state = AppState::new(todo_store, provider);
    let routes = configure_routes(state, &config.server.allowed_origin);

    info!("Starting server on http://{}", config.server.bind_addr);
    warp::serve(routes).run(config.server.bind_addr).await;

    Ok(())
}
