//! Utility helpers shared across the client UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page
//! logic to keep the pages testable.

pub mod theme;
