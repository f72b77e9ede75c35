use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::admin::{
    all_reservations, calendar, dashboard, delete_reservation, new_reservations, post_calendar,
    process_reservation, show_reservation, update_reservation,
};

pub fn build_admin_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/reservations-all", get(all_reservations))
        .route("/reservations-new", get(new_reservations))
        .route("/reservations/:reservation_id", get(show_reservation))
        .route("/reservations/:reservation_id", post(update_reservation))
        .route(
            "/process-reservation/:reservation_id",
            get(process_reservation),
        )
        .route(
            "/delete-reservation/:reservation_id",
            get(delete_reservation),
        )
        .route("/reservations-calendar", get(calendar))
        .route("/reservations-calendar", post(post_calendar));

    Router::new().nest("/admin", routers)
}
