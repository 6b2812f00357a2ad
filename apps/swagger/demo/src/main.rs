use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use swagger_demo::{app, config::Config, shutdown::shutdown_signal};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let router = app(config.swagger.clone()).wrap_err("Failed to register API documentation")?;

    let listener = tokio::net::TcpListener::bind(config.server.address())
        .await
        .wrap_err_with(|| format!("Failed to bind {}", config.server.address()))?;
    info!(
        "Swagger docs at http://{}{}/{}.json",
        listener.local_addr()?,
        config.swagger.url_prefix,
        config.swagger.document_name
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    Ok(())
}
