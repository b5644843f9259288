use actix_web::http::header::{HeaderValue, ACCEPT};
use async_trait::async_trait;
use derive_more::Display;
use ory_kratos_client::apis::configuration::Configuration;
use ory_kratos_client::apis::frontend_api;

#[derive(Debug, Display, PartialEq)]
pub enum IdentityError {
    #[display(fmt = "Failed to build identity client: {_0}")]
    ClientBuild(String),

    #[display(fmt = "Failed to create logout flow: {_0}")]
    CreateFlow(String),

    #[display(fmt = "Failed to invalidate session: {_0}")]
    Invalidate(String),
}

impl std::error::Error for IdentityError {}

/// Hosted identity backend that owns the user sessions.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Ends the session identified by the browser `cookies`.
    async fn sign_out(&self, cookies: Option<&str>) -> Result<(), IdentityError>;
}

/// Ory Kratos frontend API.
pub struct KratosBackend {
    config: Configuration,
}

impl KratosBackend {
    pub fn new(api_url: &str) -> Result<Self, IdentityError> {
        let mut config = Configuration::new();
        config.base_path = api_url.trim_end_matches('/').to_owned();
        let mut headers = reqwest::header::HeaderMap::default();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        config.client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .map_err(|e| IdentityError::ClientBuild(e.to_string()))?;
        Ok(Self { config })
    }
}

#[async_trait]
impl IdentityBackend for KratosBackend {
    async fn sign_out(&self, cookies: Option<&str>) -> Result<(), IdentityError> {
        let flow = frontend_api::create_browser_logout_flow(&self.config, cookies, None)
            .await
            .map_err(|e| IdentityError::CreateFlow(format!("{e:?}")))?;
        log::trace!("Created kratos logout flow");
        frontend_api::update_logout_flow(&self.config, Some(&flow.logout_token), None, cookies)
            .await
            .map_err(|e| IdentityError::Invalidate(format!("{e:?}")))?;
        log::debug!("Kratos session invalidated");
        Ok(())
    }
}
