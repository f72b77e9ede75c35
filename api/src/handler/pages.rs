//! Server-rendered pages. The markup is deliberately minimal: these pages
//! exist to carry the booking flow, not to be a template engine.

use crate::session::Session;
use axum::response::{Html, IntoResponse, Redirect, Response};
use shared::error::AppResult;

pub(crate) fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><title>{title} | Fort Smythe B&amp;B</title></head>\n\
         <body>{body}</body></html>"
    ))
}

/// Prepends any one-shot flash/error/warning messages to a page body.
pub(crate) async fn with_flashes(session: &Session, body: &str) -> AppResult<String> {
    let mut out = String::new();
    for kind in ["error", "warning", "flash"] {
        if let Some(message) = session.take_flash(kind).await? {
            out.push_str(&format!("<div class=\"{kind}\">{message}</div>\n"));
        }
    }
    out.push_str(body);
    Ok(out)
}

pub async fn home(session: Session) -> AppResult<Html<String>> {
    let body = with_flashes(
        &session,
        "<h1>Fort Smythe Bed &amp; Breakfast</h1>\
         <p><a href=\"/search-availability\">Check availability</a></p>",
    )
    .await?;
    Ok(page("Home", &body))
}

pub async fn about() -> Html<String> {
    page("About", "<h1>About us</h1>")
}

pub async fn contact() -> Html<String> {
    page("Contact", "<h1>Contact</h1>")
}

pub async fn generals_quarters() -> Html<String> {
    page(
        "General's Quarters",
        "<h1>General's Quarters</h1>\
         <p><a href=\"/book-room?id=1&s=&e=\">Book now</a></p>",
    )
}

pub async fn majors_suite() -> Html<String> {
    page(
        "Major's Suite",
        "<h1>Major's Suite</h1>\
         <p><a href=\"/book-room?id=2&s=&e=\">Book now</a></p>",
    )
}

pub async fn search_availability_page(session: Session) -> AppResult<Html<String>> {
    let body = with_flashes(
        &session,
        "<h1>Search for availability</h1>\
         <form method=\"post\" action=\"/search-availability\">\
         <input name=\"start_date\" placeholder=\"YYYY-MM-DD\">\
         <input name=\"end_date\" placeholder=\"YYYY-MM-DD\">\
         <button type=\"submit\">Search</button></form>",
    )
    .await?;
    Ok(page("Search availability", &body))
}

pub async fn login_page(session: Session) -> AppResult<Html<String>> {
    let body = with_flashes(
        &session,
        "<h1>Login</h1>\
         <form method=\"post\" action=\"/user/login\">\
         <input name=\"email\" type=\"email\">\
         <input name=\"password\" type=\"password\">\
         <button type=\"submit\">Login</button></form>",
    )
    .await?;
    Ok(page("Login", &body))
}

/// The guest-details form. A visitor who lands here without a draft in
/// their session (expired, or never searched) is sent home.
pub async fn make_reservation_page(session: Session) -> AppResult<Response> {
    let Some(draft) = session.draft().await? else {
        session
            .put_flash("error", "Can't get reservation from session")
            .await?;
        return Ok(Redirect::to("/").into_response());
    };

    let room_name = draft.room_name.clone().unwrap_or_default();
    let body = with_flashes(
        &session,
        &format!(
            "<h1>Make reservation</h1>\
             <p>Room: {room_name}</p>\
             <p>Arrival: {} &mdash; Departure: {}</p>\
             <form method=\"post\" action=\"/make-reservation\">\
             <input name=\"first_name\"><input name=\"last_name\">\
             <input name=\"email\"><input name=\"phone\">\
             <button type=\"submit\">Reserve</button></form>",
            draft.span.start(),
            draft.span.end()
        ),
    )
    .await?;
    Ok(page("Make reservation", &body).into_response())
}
