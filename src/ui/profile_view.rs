//! Profile screen rendering
//!
//! Turns a `Presentation` into widgets. Cards are laid out in keyed
//! columns so each item keeps its widget state when the list changes.

use iced::widget::{column, container, keyed_column, text, Column};
use iced::{Element, Length};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::state::{Booking, Car, Presentation, ProfileState, RecordId};

pub const CARS_HEADING: &str = "Your Fleet Of Listed Cars";
pub const BOOKINGS_HEADING: &str = "Your Upcoming Bookings!";
pub const NO_CARS: &str = "No cars listed yet.";
pub const NO_BOOKINGS: &str = "No bookings yet.";
pub const LOADING: &str = "Loading...";

/// Widget key for a record. Keys must be `Copy`, so the id is hashed.
pub fn item_key(id: &RecordId) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

pub fn error_text(message: &str) -> String {
    format!("Error: {message}")
}

/// Render the profile body. `car_actions` supplies the controls shown on each car card.
pub fn view<'a, Message: Clone + 'a>(
    state: &'a ProfileState,
    car_actions: impl Fn(&'a Car) -> Element<'a, Message>,
) -> Element<'a, Message> {
    match state.presentation() {
        Presentation::Loading => text(LOADING).size(18).into(),
        Presentation::Failed(message) => text(error_text(message)).size(18).into(),
        Presentation::Ready { cars, bookings } => column![
            section(CARS_HEADING, car_list(cars, car_actions)),
            section(BOOKINGS_HEADING, booking_list(bookings)),
        ]
        .spacing(32)
        .into(),
    }
}

fn section<'a, Message: 'a>(heading: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    column![text(heading).size(28), body].spacing(12).into()
}

fn car_list<'a, Message: Clone + 'a>(
    cars: &'a [Car],
    car_actions: impl Fn(&'a Car) -> Element<'a, Message>,
) -> Element<'a, Message> {
    if cars.is_empty() {
        return text(NO_CARS).into();
    }

    keyed_column(cars.iter().map(|car| (item_key(&car.id), car_card(car, car_actions(car)))))
        .spacing(12)
        .into()
}

fn booking_list<'a, Message: 'a>(bookings: &'a [Booking]) -> Element<'a, Message> {
    if bookings.is_empty() {
        return text(NO_BOOKINGS).into();
    }

    keyed_column(bookings.iter().map(|booking| (item_key(&booking.id), booking_card(booking))))
        .spacing(12)
        .into()
}

fn car_card<'a, Message: 'a>(car: &'a Car, actions: Element<'a, Message>) -> Element<'a, Message> {
    card(car.title(), car.attributes(), Some(actions))
}

fn booking_card<'a, Message: 'a>(booking: &'a Booking) -> Element<'a, Message> {
    card(booking.title(), booking.attributes(), None)
}

fn card<'a, Message: 'a>(
    title: String,
    attributes: Vec<(&str, String)>,
    actions: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    let details = Column::with_children(
        attributes
            .into_iter()
            .map(|(label, value)| text(format!("{label}: {value}")).size(14).into()),
    )
    .spacing(4);

    let mut body = column![text(title).size(20), details].spacing(8);
    if let Some(actions) = actions {
        body = body.push(actions);
    }

    container(body)
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_keys_follow_ids() {
        let a = RecordId::new("17");
        let b = RecordId::new("18");

        assert_eq!(item_key(&a), item_key(&RecordId::new("17")));
        assert_ne!(item_key(&a), item_key(&b));
    }

    #[test]
    fn test_error_text() {
        assert_eq!(
            error_text("Failed to fetch cars: Not Found"),
            "Error: Failed to fetch cars: Not Found"
        );
    }
}
