use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use fleet_routing::clients::maps_client::HttpMapsClient;
use fleet_routing::config::environment::EnvironmentConfig;
use fleet_routing::routes::create_app;
use fleet_routing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Fleet Routing - Mapa de flota");
    info!("================================");
    info!("🌍 Entorno: {}", config.environment);

    let maps = HttpMapsClient::new(&config.maps_api_url, config.maps_timeout).map_err(|e| {
        error!("❌ Error creando cliente de mapas: {}", e);
        e
    })?;
    info!("🗺️ Servicio de mapas: {}", config.maps_api_url);

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(config, Arc::new(maps)));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Vehículos:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("🛣️ Rutas:");
    info!("   POST /api/routes/compute - Calcular y asignar ruta");
    info!("   GET  /api/routes/requests - Historial de solicitudes");
    info!("📍 Lugares:");
    info!("   GET  /api/places/autocomplete?q=&session= - Autocompletado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
