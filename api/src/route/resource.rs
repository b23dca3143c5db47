use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::court::{register_court, show_booked_slots, show_court, show_court_list};
use crate::handler::equipment::{
    register_equipment, show_equipment, show_equipment_availability, show_equipment_list,
};

pub fn build_resource_routers() -> Router<AppRegistry> {
    let court_routers = Router::new()
        .route("/", post(register_court))
        .route("/", get(show_court_list))
        .route("/:court_id", get(show_court))
        .route("/:court_id/booked", get(show_booked_slots));

    let equipment_routers = Router::new()
        .route("/", post(register_equipment))
        .route("/", get(show_equipment_list))
        .route("/:equipment_id", get(show_equipment))
        .route("/:equipment_id/availability", get(show_equipment_availability));

    Router::new()
        .nest("/resources/court", court_routers)
        .nest("/resources/equipment", equipment_routers)
}
