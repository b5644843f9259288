pub mod action;
pub mod config;
pub mod kratos;
pub mod server;

mod handlers;
mod http_types;
mod server_state;
