//! Session-related HTTP API.

pub mod login;
pub mod logout;
pub mod password;
pub mod refresh;
