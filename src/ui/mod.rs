/// User interface pieces
///
/// - `profile_view`: cars and bookings lists with their fallbacks
/// - `confirm_dialog`: modal confirmation for destructive actions

pub mod confirm_dialog;
pub mod profile_view;

pub use confirm_dialog::{ConfirmDialog, DialogEvent, Prompt, DELETE_CAR};
