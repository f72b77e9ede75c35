use crate::{
    model::auth::LoginForm,
    session::{session_cookie_header, Session, SessionToken},
};
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Form,
};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// POST /user/login. A successful login rotates the session token: the
/// old session is destroyed and the user id lands in a fresh one.
pub async fn post_login(
    session: Session,
    State(registry): State<AppRegistry>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.validate().is_err() {
        session
            .put_flash("error", "Invalid login credentials")
            .await?;
        return Ok(Redirect::to("/user/login").into_response());
    }

    let user_id = match registry
        .user_repository()
        .authenticate(&form.email, &form.password)
        .await
    {
        Ok(user_id) => user_id,
        Err(AppError::UnauthorizedError) => {
            session
                .put_flash("error", "Invalid login credentials")
                .await?;
            return Ok(Redirect::to("/user/login").into_response());
        }
        Err(e) => return Err(e),
    };

    session.destroy().await?;
    let fresh_token = SessionToken::generate();
    let fresh = Session::new(fresh_token.clone(), registry.session_repository());
    fresh.put_user_id(user_id).await?;
    fresh.put_flash("flash", "Logged in successfully").await?;

    let (name, value) = session_cookie_header(&fresh_token);
    Ok((
        AppendHeaders([(name, value)]),
        Redirect::to("/admin/dashboard"),
    )
        .into_response())
}

/// GET /user/logout: drops the whole session and rotates the token.
pub async fn logout(
    session: Session,
    State(registry): State<AppRegistry>,
) -> AppResult<Response> {
    session.destroy().await?;

    let fresh_token = SessionToken::generate();
    let fresh = Session::new(fresh_token.clone(), registry.session_repository());
    fresh.put_flash("flash", "Logged out successfully").await?;

    let (name, value) = session_cookie_header(&fresh_token);
    Ok((AppendHeaders([(name, value)]), Redirect::to("/user/login")).into_response())
}
