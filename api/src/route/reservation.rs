use axum::{
    routing::{delete, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{cancel_reservation, reserve_court, reserve_equipment};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/court", post(reserve_court))
        .route("/equipment", post(reserve_equipment))
        .route("/:class/:reservation_id", delete(cancel_reservation));

    Router::new().nest("/reservations", routers)
}
