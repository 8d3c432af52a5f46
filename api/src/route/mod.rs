pub mod health;
pub mod reservation;

use axum::Router;
use registry::AppRegistry;

/// Assembles the full route tree: liveness probes at `/health` and the
/// reservation resource under `/api`.
pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(health::build_health_check_routers())
        .nest("/api", reservation::build_reservation_routers())
}
