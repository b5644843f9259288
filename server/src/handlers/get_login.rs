use crate::handlers::prelude::*;

#[derive(Deserialize)]
pub struct LoginInfo {
    signed_out: Option<bool>,
}

#[derive(Serialize)]
struct LoginPageTmplData<'a> {
    auth_url: &'a str,
    return_to: String,
    signed_out: bool,
}

pub async fn get_login(req: HttpRequest, info: web::Query<LoginInfo>) -> HttpResult {
    let state = server_state(&req)?;
    let config = &state.config;
    let html = state
        .tmpl
        .render(
            "login",
            &LoginPageTmplData {
                auth_url: &config.auth_base_url,
                return_to: format!("{}/", config.site_base_url_path),
                signed_out: info.signed_out.unwrap_or_default(),
            },
        )
        .map_err(|e| {
            log::error!("Failed to render login page template: {e}");
            AppHttpError::DetailedInternal(e.to_string())
        })?;
    Ok(HttpResponse::Ok()
        .append_header(ContentType(mime::TEXT_HTML))
        .body(html))
}
