use rbac_admin::api::http::role_routes;
use rbac_admin::infrastructure::persistence::migrations;
use rbac_admin::role_service;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    panel_bootstrap::run_server(&config_dir, &migrations(), |infra| async move {
        tracing::info!(
            max_connections = infra.config().database.max_connections,
            "Building role routes"
        );
        Ok(role_routes(role_service(infra.postgres_pool())))
    })
    .await
}
