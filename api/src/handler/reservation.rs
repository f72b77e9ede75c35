use crate::{
    handler::pages::{page, with_flashes},
    model::reservation::GuestDetailsForm,
    session::Session,
};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use garde::Validate;
use kernel::model::reservation::event::CreateReservation;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// POST /make-reservation: validates the guest details and turns the
/// session draft into a persisted reservation plus its restriction, then
/// hands off to the summary page.
pub async fn post_make_reservation(
    session: Session,
    State(registry): State<AppRegistry>,
    Form(form): Form<GuestDetailsForm>,
) -> AppResult<Response> {
    let mut draft = session.draft().await?.ok_or(AppError::SessionExpired)?;
    let room_id = draft.room_id.ok_or(AppError::SessionExpired)?;

    if let Err(report) = form.validate() {
        session.put_flash("error", &report.to_string()).await?;
        return Ok(Redirect::to("/make-reservation").into_response());
    }

    let event = CreateReservation::new(
        form.first_name.clone(),
        form.last_name.clone(),
        form.email.clone(),
        form.phone.clone(),
        room_id,
        draft.span,
    );
    registry.reservation_service().place(event).await?;

    // the summary page renders from the completed draft
    draft.first_name = Some(form.first_name);
    draft.last_name = Some(form.last_name);
    draft.email = Some(form.email);
    draft.phone = Some(form.phone);
    session.put_draft(&draft).await?;

    Ok(Redirect::to("/reservation-summary").into_response())
}

/// GET /reservation-summary: shows the completed draft exactly once; the
/// draft leaves the session with this view, so a refresh goes home.
pub async fn reservation_summary(session: Session) -> AppResult<Response> {
    let Some(draft) = session.take_draft().await? else {
        session
            .put_flash("error", "Can't get reservation from session")
            .await?;
        return Ok(Redirect::to("/").into_response());
    };

    let body = with_flashes(
        &session,
        &format!(
            "<h1>Reservation summary</h1>\
             <p>{} {}</p>\
             <p>Room: {}</p>\
             <p>Arrival: {} &mdash; Departure: {}</p>",
            draft.first_name.unwrap_or_default(),
            draft.last_name.unwrap_or_default(),
            draft.room_name.unwrap_or_default(),
            draft.span.start(),
            draft.span.end()
        ),
    )
    .await?;
    Ok(page("Reservation summary", &body).into_response())
}
