pub mod prelude;

pub mod get_health_check;
pub mod get_login;
pub mod post_logout;
pub mod post_registration_hook;
