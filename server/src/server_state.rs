use std::sync::Arc;

use actix_web::HttpRequest;

use crate::config::{AppOptions, ServerConfig};
use crate::http_types::*;
use crate::kratos::IdentityBackend;

#[derive(Clone)]
pub struct ServerState<'a> {
    pub config: ServerConfig,
    pub options: AppOptions,
    pub tmpl: handlebars::Handlebars<'a>,
    pub identity: Arc<dyn IdentityBackend>,
}

pub fn server_state(req: &HttpRequest) -> Result<&ServerState, AppHttpError> {
    req.app_data::<ServerState>().ok_or_else(move || {
        log::error!("Server state is not there");
        AppHttpError::Internal
    })
}
