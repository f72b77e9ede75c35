use crate::{
    extractor::AuthorizedUser,
    handler::pages::{page, with_flashes},
    model::{
        calendar::{CalendarQuery, CalendarResponse, RoomCalendarResponse},
        reservation::{ReservationResponse, ReservationsResponse, UpdateReservationForm},
    },
    session::Session,
};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use garde::Validate;
use kernel::model::{
    calendar::{CalendarEditForm, Month},
    id::ReservationId,
    reservation::event::UpdateReservation,
};
use registry::AppRegistry;
use shared::error::AppResult;
use std::collections::HashMap;

pub async fn dashboard(_user: AuthorizedUser, session: Session) -> AppResult<Html<String>> {
    let body = with_flashes(
        &session,
        "<h1>Dashboard</h1>\
         <ul><li><a href=\"/admin/reservations-all\">All reservations</a></li>\
         <li><a href=\"/admin/reservations-new\">New reservations</a></li>\
         <li><a href=\"/admin/reservations-calendar\">Calendar</a></li></ul>",
    )
    .await?;
    Ok(page("Admin dashboard", &body))
}

pub async fn all_reservations(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_all()
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn new_reservations(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_new()
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn update_reservation(
    _user: AuthorizedUser,
    session: Session,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Form(form): Form<UpdateReservationForm>,
) -> AppResult<Response> {
    if let Err(report) = form.validate() {
        session.put_flash("error", &report.to_string()).await?;
        return Ok(Redirect::to(&format!("/admin/reservations/{reservation_id}")).into_response());
    }

    registry
        .reservation_repository()
        .update(UpdateReservation::new(
            reservation_id,
            form.first_name,
            form.last_name,
            form.email,
            form.phone,
        ))
        .await?;

    session.put_flash("flash", "Changes saved").await?;
    Ok(Redirect::to("/admin/reservations-all").into_response())
}

/// New -> Processed; there is no way back.
pub async fn process_reservation(
    _user: AuthorizedUser,
    session: Session,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Redirect> {
    registry
        .reservation_repository()
        .mark_processed(reservation_id)
        .await?;
    session.put_flash("flash", "Reservation marked as processed").await?;
    Ok(Redirect::to("/admin/reservations-all"))
}

pub async fn delete_reservation(
    _user: AuthorizedUser,
    session: Session,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Redirect> {
    registry
        .reservation_repository()
        .delete(reservation_id)
        .await?;
    session.put_flash("flash", "Reservation deleted").await?;
    Ok(Redirect::to("/admin/reservations-all"))
}

/// GET /admin/reservations-calendar: renders the month grids and stashes
/// each room's block map in the session. The later POST diffs against
/// that snapshot because the edit form only submits changed checkboxes.
pub async fn calendar(
    _user: AuthorizedUser,
    session: Session,
    Query(query): Query<CalendarQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CalendarResponse>> {
    let (year, month) = query.year_month();
    let month_span = Month::new(year, month)?;

    let (grids, block_maps) = registry
        .calendar_service()
        .build_all_month_grids(month_span)
        .await?;
    session.put_block_maps(&block_maps).await?;

    Ok(Json(CalendarResponse {
        year,
        month,
        rooms: grids
            .into_iter()
            .map(|(room_id, room_name, grid)| RoomCalendarResponse::new(room_id, room_name, grid))
            .collect(),
    }))
}

/// POST /admin/reservations-calendar: reconciles the submitted edits
/// against the block maps shown on the previous GET.
pub async fn post_calendar(
    _user: AuthorizedUser,
    session: Session,
    Query(query): Query<CalendarQuery>,
    State(registry): State<AppRegistry>,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let (year, month) = query.year_month();
    let back = format!("/admin/reservations-calendar?y={year}&m={month}");

    let form = match CalendarEditForm::parse(fields.keys().map(String::as_str)) {
        Ok(form) => form,
        Err(e) => {
            session.put_flash("error", &e.to_string()).await?;
            return Ok(Redirect::to(&back).into_response());
        }
    };

    let previous = session.take_block_maps().await?.unwrap_or_default();
    registry
        .calendar_service()
        .reconcile_edits(&previous, &form)
        .await?;

    session.put_flash("flash", "Changes saved").await?;
    Ok(Redirect::to(&back).into_response())
}
