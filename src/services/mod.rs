//! Domain services. Handlers in `routes` stay thin and call into these.

pub mod form;

/// Stable, grepable code for an error variant; sent to clients next to the
/// human-readable message.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
