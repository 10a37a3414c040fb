//! HTTP middleware.

mod session;

pub use session::{resolve_session, SessionContext};
