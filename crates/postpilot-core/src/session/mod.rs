//! Session domain module.
//!
//! A session is the time-bounded proof that this device has an authenticated user.

mod model;

pub use model::{DEV_SESSION_TTL, STANDARD_SESSION_TTL, Session};
