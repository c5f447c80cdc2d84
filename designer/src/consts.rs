//! Shared constants for the designer crate.

// ── Properties schema ───────────────────────────────────────────

/// Minimum label length, in characters.
pub const LABEL_MIN_LEN: usize = 2;

/// Maximum label length, in characters.
pub const LABEL_MAX_LEN: usize = 50;

/// Maximum helper text length, in characters.
pub const HELPER_TEXT_MAX_LEN: usize = 200;

/// Maximum placeholder length, in characters.
pub const PLACEHOLDER_MAX_LEN: usize = 50;

/// Smallest allowed visible row count for a text area.
pub const ROWS_MIN: i64 = 1;

/// Largest allowed visible row count for a text area.
pub const ROWS_MAX: i64 = 10;

/// Minimum paragraph text length, in characters.
pub const PARAGRAPH_MIN_LEN: usize = 2;

/// Maximum paragraph text length, in characters.
pub const PARAGRAPH_MAX_LEN: usize = 500;

// ── Drag activation ─────────────────────────────────────────────

/// Mouse pointer travel in CSS pixels before a press becomes a drag.
pub const MOUSE_ACTIVATION_DISTANCE_PX: f64 = 10.0;

/// Touch hold time in milliseconds before a press becomes a drag.
pub const TOUCH_ACTIVATION_DELAY_MS: u64 = 300;

/// Touch movement in CSS pixels tolerated during the hold; beyond it the press is abandoned.
pub const TOUCH_ACTIVATION_TOLERANCE_PX: f64 = 5.0;
