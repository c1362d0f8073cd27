//! Host-side services the store hands work to through effects.

pub mod session;

pub use session::SessionError;
