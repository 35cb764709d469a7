//! Profile screen for the car rental service.
//!
//! Fetches the signed-in user's listed cars and bookings from the rental
//! backend and renders them with iced, guarding car deletion behind a
//! confirmation dialog.

pub mod api;
pub mod config;
pub mod logging;
pub mod state;
pub mod ui;
