//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `records`, `ui`) so pages and
//! components can depend on small focused models. `auth` is the single
//! source of truth for identity; the rest is presentation data.

pub mod auth;
pub mod records;
pub mod ui;
