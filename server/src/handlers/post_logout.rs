use crate::handlers::prelude::*;

#[post("/auth/logout")]
pub async fn post_logout(
    req: HttpRequest,
    session: Session,
) -> Result<ActionOutcome, AppHttpError> {
    logout(&req, session).await
}

#[get("/logout")]
pub async fn get_logout(
    req: HttpRequest,
    session: Session,
) -> Result<ActionOutcome, AppHttpError> {
    logout(&req, session).await
}

async fn logout(req: &HttpRequest, session: Session) -> Result<ActionOutcome, AppHttpError> {
    session.purge();
    let state = server_state(req)?;
    Ok(log_out(
        state.identity.as_ref(),
        cookie_str(req),
        &state.config.login_path,
    )
    .await)
}
