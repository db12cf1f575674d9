pub mod auth;

pub use auth::{session_auth_middleware, CurrentOwner, SESSION_USER_KEY};
