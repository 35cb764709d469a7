use chrono::{DateTime, Utc};
use std::fmt;

use super::data::{Booking, Car, CarId};

/// The two lists the profile screen loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Cars,
    Bookings,
}

impl Resource {
    /// Path segment on the rental backend
    pub fn path(self) -> &'static str {
        match self {
            Resource::Cars => "users-cars",
            Resource::Bookings => "bookings",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Cars => "cars",
            Resource::Bookings => "bookings",
        })
    }
}

/// Tag carried by every request so late answers can be recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub resource: Resource,
    pub identity: String,
    pub generation: u64,
}

/// Payload of a settled fetch
#[derive(Debug, Clone)]
pub enum Fetched {
    Cars(Vec<Car>),
    Bookings(Vec<Booking>),
}

/// What the screen should show right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presentation<'a> {
    Loading,
    Failed(&'a str),
    Ready {
        cars: &'a [Car],
        bookings: &'a [Booking],
    },
}

/// Transient view state for one visit of the profile screen.
///
/// Only `update` on the UI thread writes to this, so there is no locking.
/// Responses are matched against the identity and generation they were
/// issued for; anything else is dropped.
#[derive(Debug, Default)]
pub struct ProfileState {
    identity: Option<String>,
    generation: u64,
    in_flight: usize,
    cars: Vec<Car>,
    bookings: Vec<Booking>,
    loading: bool,
    error: Option<String>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn has_car(&self, id: &CarId) -> bool {
        self.cars.iter().any(|car| &car.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Switch to another identity (or sign out with `None`).
    ///
    /// The same identity again changes nothing. A different one throws away
    /// the lists and returns the requests to issue for it.
    pub fn set_identity(&mut self, identity: Option<String>) -> Vec<FetchTicket> {
        if self.identity == identity {
            return Vec::new();
        }

        tracing::info!(
            from = self.identity.as_deref().unwrap_or("<none>"),
            to = identity.as_deref().unwrap_or("<none>"),
            "identity changed"
        );

        self.identity = identity;
        self.cars.clear();
        self.bookings.clear();
        self.last_refreshed = None;
        self.refresh()
    }

    /// Start a new round of fetches for the current identity.
    ///
    /// Bumps the generation so anything still outstanding becomes stale.
    pub fn refresh(&mut self) -> Vec<FetchTicket> {
        self.generation += 1;
        self.error = None;

        let Some(identity) = self.identity.clone() else {
            self.in_flight = 0;
            self.loading = false;
            return Vec::new();
        };

        let tickets: Vec<FetchTicket> = [Resource::Cars, Resource::Bookings]
            .into_iter()
            .map(|resource| FetchTicket {
                resource,
                identity: identity.clone(),
                generation: self.generation,
            })
            .collect();

        self.in_flight = tickets.len();
        self.loading = true;
        tickets
    }

    /// Whether a response for this ticket still belongs to the current view
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && self.identity.as_deref() == Some(ticket.identity.as_str())
    }

    /// Record the outcome of a fetch. Returns `false` if it was stale and ignored.
    pub fn apply(&mut self, ticket: &FetchTicket, outcome: Result<Fetched, String>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                resource = %ticket.resource,
                identity = %ticket.identity,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }

        match outcome {
            Ok(Fetched::Cars(cars)) => {
                tracing::debug!(count = cars.len(), "cars loaded");
                self.cars = cars;
            }
            Ok(Fetched::Bookings(bookings)) => {
                tracing::debug!(count = bookings.len(), "bookings loaded");
                self.bookings = bookings;
            }
            Err(message) => {
                tracing::error!(resource = %ticket.resource, error = %message, "fetch failed");
                self.error = Some(message);
            }
        }

        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.loading = false;
            if self.error.is_none() {
                self.last_refreshed = Some(Utc::now());
            }
        }

        true
    }

    /// Loading wins over errors, errors win over lists
    pub fn presentation(&self) -> Presentation<'_> {
        if self.loading {
            Presentation::Loading
        } else if let Some(error) = &self.error {
            Presentation::Failed(error)
        } else {
            Presentation::Ready {
                cars: &self.cars,
                bookings: &self.bookings,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::RecordId;

    fn car(id: &str) -> Car {
        serde_json::from_value(serde_json::json!({ "CarID": id, "Make": "Subaru" })).unwrap()
    }

    fn booking(id: u64) -> Booking {
        serde_json::from_value(serde_json::json!({ "BookingID": id, "CarID": "1" })).unwrap()
    }

    fn ticket_for(tickets: &[FetchTicket], resource: Resource) -> FetchTicket {
        tickets.iter().find(|t| t.resource == resource).cloned().unwrap()
    }

    #[test]
    fn test_mount_with_identity_issues_both_fetches() {
        let mut state = ProfileState::new();
        let tickets = state.set_identity(Some("driver@example.com".into()));

        assert_eq!(tickets.len(), 2);
        assert!(tickets.iter().all(|t| t.identity == "driver@example.com"));
        assert!(state.is_loading());
        assert_eq!(state.presentation(), Presentation::Loading);
    }

    #[test]
    fn test_no_identity_issues_nothing() {
        let mut state = ProfileState::new();
        assert!(state.set_identity(None).is_empty());
        assert!(state.refresh().is_empty());

        assert!(!state.is_loading());
        assert_eq!(
            state.presentation(),
            Presentation::Ready { cars: &[], bookings: &[] }
        );
    }

    #[test]
    fn test_lists_render_with_their_ids() {
        let mut state = ProfileState::new();
        let tickets = state.set_identity(Some("driver@example.com".into()));

        let cars = vec![car("a"), car("b"), car("c")];
        let bookings = vec![booking(1), booking(2)];
        assert!(state.apply(&ticket_for(&tickets, Resource::Cars), Ok(Fetched::Cars(cars))));
        assert!(state.is_loading());
        assert!(state.apply(&ticket_for(&tickets, Resource::Bookings), Ok(Fetched::Bookings(bookings))));

        match state.presentation() {
            Presentation::Ready { cars, bookings } => {
                let car_ids: Vec<&str> = cars.iter().map(|c| c.id.as_str()).collect();
                assert_eq!(car_ids, vec!["a", "b", "c"]);
                assert_eq!(bookings.len(), 2);
                assert_eq!(bookings[1].id, RecordId::new("2"));
            }
            other => panic!("expected lists, got {other:?}"),
        }
        assert!(state.last_refreshed().is_some());
    }

    #[test]
    fn test_empty_lists_are_independent() {
        let mut state = ProfileState::new();
        let tickets = state.set_identity(Some("driver@example.com".into()));

        state.apply(&ticket_for(&tickets, Resource::Cars), Ok(Fetched::Cars(Vec::new())));
        state.apply(&ticket_for(&tickets, Resource::Bookings), Ok(Fetched::Bookings(vec![booking(5)])));

        match state.presentation() {
            Presentation::Ready { cars, bookings } => {
                assert!(cars.is_empty());
                assert_eq!(bookings.len(), 1);
            }
            other => panic!("expected lists, got {other:?}"),
        }
    }

    #[test]
    fn test_either_failure_blanks_the_view() {
        let mut state = ProfileState::new();
        let tickets = state.set_identity(Some("driver@example.com".into()));

        state.apply(&ticket_for(&tickets, Resource::Cars), Ok(Fetched::Cars(vec![car("a")])));
        state.apply(
            &ticket_for(&tickets, Resource::Bookings),
            Err("Failed to fetch bookings: Internal Server Error".into()),
        );

        assert_eq!(
            state.presentation(),
            Presentation::Failed("Failed to fetch bookings: Internal Server Error")
        );
    }

    #[test]
    fn test_failed_round_is_not_stamped() {
        let mut state = ProfileState::new();
        let tickets = state.set_identity(Some("driver@example.com".into()));

        state.apply(&ticket_for(&tickets, Resource::Cars), Ok(Fetched::Cars(vec![car("a")])));
        state.apply(&ticket_for(&tickets, Resource::Bookings), Err("Failed to fetch bookings: Bad Gateway".into()));

        assert!(!state.is_loading());
        assert_eq!(state.last_refreshed(), None);
    }

    #[test]
    fn test_has_car() {
        let mut state = ProfileState::new();
        let tickets = state.set_identity(Some("driver@example.com".into()));
        state.apply(&ticket_for(&tickets, Resource::Cars), Ok(Fetched::Cars(vec![car("a")])));

        assert!(state.has_car(&RecordId::new("a")));
        assert!(!state.has_car(&RecordId::new("b")));
    }

    #[test]
    fn test_new_identity_resets_error_and_loading() {
        let mut state = ProfileState::new();
        let tickets = state.set_identity(Some("first@example.com".into()));
        for ticket in &tickets {
            state.apply(ticket, Err("Failed to fetch cars: Not Found".into()));
        }
        assert!(state.error().is_some());
        assert!(!state.is_loading());

        let tickets = state.set_identity(Some("second@example.com".into()));
        assert_eq!(state.error(), None);
        assert!(state.is_loading());
        assert!(state.cars().is_empty());
        assert!(tickets.iter().all(|t| t.identity == "second@example.com"));
    }

    #[test]
    fn test_same_identity_is_a_no_op() {
        let mut state = ProfileState::new();
        state.set_identity(Some("driver@example.com".into()));
        assert!(state.set_identity(Some("driver@example.com".into())).is_empty());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = ProfileState::new();
        let old = state.set_identity(Some("first@example.com".into()));
        let new = state.set_identity(Some("second@example.com".into()));

        assert!(!state.apply(&ticket_for(&old, Resource::Cars), Ok(Fetched::Cars(vec![car("old")]))));
        assert!(state.cars().is_empty());
        assert!(state.is_loading());

        assert!(state.apply(&ticket_for(&new, Resource::Cars), Ok(Fetched::Cars(vec![car("new")]))));
        assert_eq!(state.cars()[0].id.as_str(), "new");
    }

    #[test]
    fn test_refresh_outdates_same_identity_requests() {
        let mut state = ProfileState::new();
        let first = state.set_identity(Some("driver@example.com".into()));
        let second = state.refresh();

        assert!(!state.is_current(&first[0]));
        assert!(state.is_current(&second[0]));
    }
}
