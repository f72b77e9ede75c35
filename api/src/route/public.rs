use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    availability::{availability_json, book_room, choose_room, post_availability},
    pages::{
        about, contact, generals_quarters, home, majors_suite, make_reservation_page,
        search_availability_page,
    },
    reservation::{post_make_reservation, reservation_summary},
};

pub fn build_public_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/generals-quarters", get(generals_quarters))
        .route("/majors-suite", get(majors_suite))
        .route("/search-availability", get(search_availability_page))
        .route("/search-availability", post(post_availability))
        .route("/search-availability-json", post(availability_json))
        .route("/choose-room/:room_id", get(choose_room))
        .route("/book-room", get(book_room))
        .route("/make-reservation", get(make_reservation_page))
        .route("/make-reservation", post(post_make_reservation))
        .route("/reservation-summary", get(reservation_summary))
}
