use crate::{
    handler::pages::{page, with_flashes},
    model::availability::{
        AvailabilityForm, AvailabilityJsonForm, AvailabilityJsonResponse, BookRoomQuery,
    },
    session::Session,
};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use kernel::model::{id::RoomId, reservation::ReservationDraft};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// POST /search-availability: lists the rooms free for the requested span
/// and parks the span in the session as the start of a draft reservation.
pub async fn post_availability(
    session: Session,
    State(registry): State<AppRegistry>,
    Form(form): Form<AvailabilityForm>,
) -> AppResult<Response> {
    let span = match form.parse_span() {
        Ok(span) => span,
        Err(e) => {
            session.put_flash("error", &e.to_string()).await?;
            return Ok(Redirect::to("/search-availability").into_response());
        }
    };

    let rooms = registry
        .availability_engine()
        .search_available_rooms(span)
        .await?;

    if rooms.is_empty() {
        session.put_flash("error", "No availability").await?;
        return Ok(Redirect::to("/search-availability").into_response());
    }

    session
        .put_draft(&ReservationDraft::from_span(span))
        .await?;

    let mut listing = String::from("<h1>Choose a room</h1><ul>");
    for room in &rooms {
        listing.push_str(&format!(
            "<li><a href=\"/choose-room/{}\">{}</a></li>",
            room.id, room.room_name
        ));
    }
    listing.push_str("</ul>");
    let body = with_flashes(&session, &listing).await?;
    Ok(page("Choose room", &body).into_response())
}

/// POST /search-availability-json: the per-room availability widget.
/// Everything, including parse failures, answers 200 with `ok`/`message`.
pub async fn availability_json(
    State(registry): State<AppRegistry>,
    Form(form): Form<AvailabilityJsonForm>,
) -> Json<AvailabilityJsonResponse> {
    let Ok(room_id) = form.room_id.parse::<RoomId>() else {
        return Json(AvailabilityJsonResponse::failure(
            "error during parsing room_id",
        ));
    };

    let span = match (form.start_date.parse(), form.end_date.parse()) {
        (Ok(start), Ok(end)) => match kernel::model::date::DateSpan::new(start, end) {
            Ok(span) => span,
            Err(_) => {
                return Json(AvailabilityJsonResponse::failure("invalid date range"));
            }
        },
        _ => {
            return Json(AvailabilityJsonResponse::failure(
                "error during parsing dates",
            ));
        }
    };

    match registry
        .availability_engine()
        .is_room_available(room_id, span)
        .await
    {
        Ok(available) => Json(AvailabilityJsonResponse {
            ok: available,
            message: String::new(),
            room_id: form.room_id,
            start_date: form.start_date,
            end_date: form.end_date,
        }),
        Err(e) => {
            tracing::error!(error.message = %e, "availability query failed");
            Json(AvailabilityJsonResponse::failure("error querying database"))
        }
    }
}

/// GET /choose-room/{id}: attaches the chosen room to the draft.
pub async fn choose_room(
    session: Session,
    State(registry): State<AppRegistry>,
    Path(room_id): Path<RoomId>,
) -> AppResult<Redirect> {
    let mut draft = session.draft().await?.ok_or(AppError::SessionExpired)?;

    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room {room_id} not found")))?;

    draft.room_id = Some(room.id);
    draft.room_name = Some(room.room_name);
    session.put_draft(&draft).await?;

    Ok(Redirect::to("/make-reservation"))
}

/// GET /book-room?id&s&e: entry point from a room page; builds the draft
/// directly from query parameters.
pub async fn book_room(
    session: Session,
    State(registry): State<AppRegistry>,
    Query(query): Query<BookRoomQuery>,
) -> AppResult<Response> {
    let span = match query.parse_span() {
        Ok(span) => span,
        Err(e) => {
            session.put_flash("error", &e.to_string()).await?;
            return Ok(Redirect::to("/search-availability").into_response());
        }
    };

    let room = registry
        .room_repository()
        .find_by_id(query.id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room {} not found", query.id)))?;

    let mut draft = ReservationDraft::from_span(span);
    draft.room_id = Some(room.id);
    draft.room_name = Some(room.room_name);
    session.put_draft(&draft).await?;

    Ok(Redirect::to("/make-reservation").into_response())
}
