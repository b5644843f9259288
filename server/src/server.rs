use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::error::JsonPayloadError;
use actix_web::{middleware, web, App, HttpRequest, HttpServer};
use anyhow::Context;

use crate::config::*;
use crate::handlers::{
    get_health_check::*, get_login::*, post_logout::*, post_registration_hook::*,
};
use crate::http_types::*;
use crate::kratos::{IdentityBackend, KratosBackend};
use crate::server_state::*;

pub struct Handle {
    pub server: actix_web::dev::Server,
    pub addrs: Vec<std::net::SocketAddr>,
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let identity = KratosBackend::new(&config.server_config.kratos_api_url)
        .context("Failed to create kratos client")?;
    let handle = create(config, Arc::new(identity))?;
    log::info!("Listening on {:?}", handle.addrs);
    handle.server.await?;
    Ok(())
}

pub fn create(config: Config, identity: Arc<dyn IdentityBackend>) -> anyhow::Result<Handle> {
    let host = config.server_config.host.clone();
    let port = config.server_config.port;
    let app_state = build_state(config, identity)?;

    let secret_key = actix_web::cookie::Key::generate();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .wrap(middleware::Logger::default())
            .configure(|cfg| routes(cfg, &app_state))
            .default_service(web::to(not_found))
    })
    .bind((host.as_str(), port))?;
    let addrs = server.addrs();
    let server = server.run(); // Does not actually run the server but creates a future.
    Ok(Handle { server, addrs })
}

pub fn build_state(
    config: Config,
    identity: Arc<dyn IdentityBackend>,
) -> anyhow::Result<ServerState<'static>> {
    let mut tmpl = handlebars::Handlebars::new();
    tmpl.set_strict_mode(config.app.strict_mode);
    tmpl.register_template_string("login", include_str!("../templates/login.hbs"))
        .context("Failed to register login template")?;
    Ok(ServerState {
        config: config.server_config,
        options: config.app,
        tmpl,
        identity,
    })
}

/// Registers every route together with the state and payload limits.
pub fn routes(cfg: &mut web::ServiceConfig, state: &ServerState<'static>) {
    let limit = state.options.server_actions.body_size_limit.bytes();
    cfg.app_data(state.clone())
        .app_data(
            web::JsonConfig::default()
                .limit(limit)
                .error_handler(json_error),
        )
        .app_data(web::FormConfig::default().limit(limit))
        .app_data(web::PayloadConfig::new(limit))
        .route(&state.config.login_path, web::get().to(get_login))
        .service(get_health_check)
        .service(post_logout)
        .service(get_logout)
        .service(post_after_registration_hook)
        .service(post_after_settings_hook);
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            log::debug!("Refused oversized payload: {err}");
            err.into()
        }
        e => {
            log::debug!("Bad JSON payload: {e}");
            AppHttpError::BadClientData.into()
        }
    }
}

async fn not_found() -> HttpResult {
    Err(AppHttpError::NotFound)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn test_config() -> Config {
        toml::from_str(
            r#"
            [server_config]
            port = 0
            site_base_url_path = "/app"
            auth_base_url = "https://auth.example.com"
            kratos_api_url = "http://127.0.0.1:4433"
            "#,
        )
        .expect("Failed to parse test config")
    }

    /// Same wiring as `create`, without binding a socket.
    macro_rules! test_app {
        ($state:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .wrap(actix_session::SessionMiddleware::new(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::generate(),
                    ))
                    .configure(|cfg| crate::server::routes(cfg, &$state)),
            )
        };
    }
    pub(crate) use test_app;

    #[actix_web::test]
    async fn health_check() {
        let identity = Arc::new(crate::action::tests::FakeIdentity::default());
        let state = build_state(test_config(), identity).unwrap();
        let app = test_app!(state).await;
        let req = actix_web::test::TestRequest::get()
            .uri("/health_check")
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn login_page_links_to_identity_ui() {
        let identity = Arc::new(crate::action::tests::FakeIdentity::default());
        let state = build_state(test_config(), identity).unwrap();
        let app = test_app!(state).await;
        let req = actix_web::test::TestRequest::get()
            .uri("/auth/login?signed_out=true")
            .to_request();
        let body = actix_web::test::call_and_read_body(&app, req).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("https://auth.example.com/login?return_to=/app/"), "{body}");
        assert!(body.contains("You have been signed out."));

        let req = actix_web::test::TestRequest::get()
            .uri("/auth/login")
            .to_request();
        let body = actix_web::test::call_and_read_body(&app, req).await;
        assert!(!std::str::from_utf8(&body).unwrap().contains("signed out"));
    }

    #[test]
    fn strict_mode_follows_config() {
        let mut config = test_config();
        config.app.strict_mode = false;
        let identity = Arc::new(crate::action::tests::FakeIdentity::default());
        let state = build_state(config, identity.clone()).unwrap();
        assert!(!state.tmpl.strict_mode());
        let state = build_state(test_config(), identity).unwrap();
        assert!(state.tmpl.strict_mode());
    }
}
