use actix_web::body::BoxBody;
use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::kratos::IdentityBackend;

/// What a server action ends with.
#[derive(Debug)]
pub enum ActionOutcome {
    /// Send the browser elsewhere with `303 See Other`.
    Redirect(String),
    Rendered(HttpResponse),
}

impl Responder for ActionOutcome {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            ActionOutcome::Redirect(path) => web::Redirect::to(path)
                .see_other()
                .respond_to(req)
                .map_into_boxed_body(),
            ActionOutcome::Rendered(response) => response,
        }
    }
}

/// Ends the current session at the identity backend and sends the browser
/// to `login_path`. The redirect happens whether or not sign-out succeeded.
pub async fn log_out(
    identity: &dyn IdentityBackend,
    cookies: Option<&str>,
    login_path: &str,
) -> ActionOutcome {
    if let Err(e) = identity.sign_out(cookies).await {
        log::error!("Sign-out failed, redirecting anyway: {e}");
    }
    ActionOutcome::Redirect(login_path.to_owned())
}
