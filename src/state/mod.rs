/// State management module
///
/// - Backend records and their identifiers (data.rs)
/// - Profile view state: fetch bookkeeping and what to render (profile.rs)

pub mod data;
pub mod profile;

pub use data::{Booking, BookingId, Car, CarId, RecordId};
pub use profile::{FetchTicket, Fetched, Presentation, ProfileState, Resource};
