pub mod auth;
pub mod password;
