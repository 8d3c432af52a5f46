use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    delete_reservation, register_reservation, show_reservation, show_reservation_list,
    update_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(register_reservation))
        .route("/", get(show_reservation_list))
        .route("/{reservation_id}", get(show_reservation))
        .route("/{reservation_id}", put(update_reservation))
        .route("/{reservation_id}", delete(delete_reservation));

    Router::new().nest("/reservations", reservation_routers)
}
