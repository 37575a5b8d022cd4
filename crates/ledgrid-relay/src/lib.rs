//! ledgrid-relay - HTTP relay in front of the LED device
//!
//! Exposes the device's own URL layout and forwards every call through a
//! [`DeviceGateway`], so clients that cannot reach the device directly can
//! still drive it. Upstream failures become `500` with a short text body.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use ledgrid_core::prelude::{info, warn};
use ledgrid_device::protocol::{encode_status, LED_STATUS_PATH, SET_PIXEL_PATH};
use ledgrid_device::{DeviceGateway, DeviceMode, PixelQuery, WireLed};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Older clients stop the show with an underscore in the path
pub const LEGACY_DEACTIVATE_PATH: &str = "desactivar-modo-show_1";

type RelayError = (StatusCode, &'static str);

/// Build the relay router around `gateway`
pub fn router<G>(gateway: Arc<G>) -> Router
where
    G: DeviceGateway + Send + Sync + 'static,
{
    let mut app = Router::new()
        .route(&format!("/{SET_PIXEL_PATH}"), get(set_pixel::<G>))
        .route(&format!("/{LED_STATUS_PATH}"), get(led_status::<G>));

    for mode in DeviceMode::ALL {
        app = app.route(
            &format!("/{}", mode.path()),
            get(move |state: State<Arc<G>>| set_mode(state, mode)),
        );
    }

    app.route(
        &format!("/{LEGACY_DEACTIVATE_PATH}"),
        get(|state: State<Arc<G>>| set_mode(state, DeviceMode::Off)),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(gateway)
}

async fn set_pixel<G>(
    State(gateway): State<Arc<G>>,
    Query(query): Query<PixelQuery>,
) -> Result<&'static str, RelayError>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    let coord = query.coordinate();
    let color = query.color();
    match gateway.set_pixel(coord, color).await {
        Ok(()) => Ok("LED updated"),
        Err(e) => {
            warn!("Relay set_pixel {} {} failed: {}", coord, color, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to update LED"))
        }
    }
}

async fn led_status<G>(State(gateway): State<Arc<G>>) -> Result<Json<Vec<WireLed>>, RelayError>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    match gateway.fetch_status().await {
        Ok(colors) => Ok(Json(encode_status(&colors))),
        Err(e) => {
            warn!("Relay led_status failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to read LED status"))
        }
    }
}

async fn set_mode<G>(State(gateway): State<Arc<G>>, mode: DeviceMode) -> Result<String, RelayError>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    match gateway.set_mode(mode).await {
        Ok(()) if mode.is_active() => {
            info!("Mode {} activated", mode);
            Ok(format!("Mode {} activated", mode))
        }
        Ok(()) => {
            info!("Show stopped");
            Ok("Show stopped".to_string())
        }
        Err(e) => {
            warn!("Relay mode {} failed: {}", mode, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to switch mode"))
        }
    }
}
