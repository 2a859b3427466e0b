//! Request middleware.
//!
//! Session authentication lives in the HTTP adapter; this module only carries
//! request-scoped concerns that apply to every route, such as trace ids.

pub mod trace;

pub use trace::Trace;
