use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};
use std::collections::HashMap;

use rental_profile::api::ApiClient;
use rental_profile::config;
use rental_profile::logging;
use rental_profile::state::{CarId, FetchTicket, Fetched, ProfileState, Resource};
use rental_profile::ui::{profile_view, ConfirmDialog, DialogEvent, DELETE_CAR};

/// Main application state
struct RentalProfile {
    /// Lists, loading flag and error for the current identity
    profile: ProfileState,
    /// One delete confirmation per car, closed unless present and open
    dialogs: HashMap<CarId, ConfirmDialog>,
    /// Contents of the email field
    email_input: String,
    /// Outcome of the last delete
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    EmailChanged(String),
    SwitchUser,
    SignOut,
    Refresh,
    /// A list request settled
    Fetched(FetchTicket, Result<Fetched, String>),
    Dialog(CarId, DialogEvent),
    /// Confirmed through the delete dialog
    DeleteCar(CarId),
    /// A delete settled; tagged with the identity it was issued for
    CarDeleted(String, CarId, Result<(), String>),
}

impl RentalProfile {
    fn new() -> (Self, Task<Message>) {
        Self::open(config::initial_identity())
    }

    /// Mount the screen for an identity and issue its first fetches
    fn open(identity: Option<String>) -> (Self, Task<Message>) {
        let mut profile = ProfileState::new();
        let tickets = profile.set_identity(identity.clone());

        match &identity {
            Some(email) => tracing::info!(identity = %email, "profile opened"),
            None => tracing::info!("profile opened without a signed-in user"),
        }

        (
            RentalProfile {
                profile,
                dialogs: HashMap::new(),
                email_input: identity.unwrap_or_default(),
                status: String::new(),
            },
            fetch_all(tickets),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EmailChanged(value) => {
                self.email_input = value;
                Task::none()
            }
            Message::SwitchUser => {
                let identity = config::normalize_identity(&self.email_input);
                self.change_identity(identity)
            }
            Message::SignOut => {
                self.email_input.clear();
                self.change_identity(None)
            }
            Message::Refresh => {
                self.status.clear();
                fetch_all(self.profile.refresh())
            }
            Message::Fetched(ticket, result) => {
                let resource = ticket.resource;
                if self.profile.apply(&ticket, result) && resource == Resource::Cars {
                    let profile = &self.profile;
                    self.dialogs.retain(|id, _| profile.has_car(id));
                }
                Task::none()
            }
            Message::Dialog(id, event) => {
                let dialog = self.dialogs.entry(id.clone()).or_default();
                match dialog.update(event, || Message::DeleteCar(id)) {
                    Some(next) => self.update(next),
                    None => Task::none(),
                }
            }
            Message::DeleteCar(id) => {
                let Some(owner) = self.profile.identity().map(str::to_string) else {
                    return Task::none();
                };
                self.status = format!("Deleting car #{}...", id);
                let target = id.clone();
                Task::perform(delete_car(target), move |result| {
                    Message::CarDeleted(owner.clone(), id.clone(), result)
                })
            }
            Message::CarDeleted(owner, id, _) if self.profile.identity() != Some(owner.as_str()) => {
                tracing::debug!(car = %id, identity = %owner, "discarding delete for a previous identity");
                Task::none()
            }
            Message::CarDeleted(_, id, Ok(())) => {
                self.dialogs.remove(&id);
                self.status = format!("Car #{} deleted.", id);
                fetch_all(self.profile.refresh())
            }
            Message::CarDeleted(_, id, Err(error)) => {
                tracing::error!(car = %id, %error, "delete failed");
                self.status = format!("Could not delete car #{}: {}", id, error);
                Task::none()
            }
        }
    }

    fn change_identity(&mut self, identity: Option<String>) -> Task<Message> {
        let tickets = self.profile.set_identity(identity);
        if !tickets.is_empty() || self.profile.identity().is_none() {
            self.dialogs.clear();
            self.status.clear();
        }
        fetch_all(tickets)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let signed_in = match self.profile.identity() {
            Some(email) => format!("Signed in as {}", email),
            None => "Not signed in".to_string(),
        };

        let session_bar = row![
            text_input("you@example.com", &self.email_input)
                .on_input(Message::EmailChanged)
                .on_submit(Message::SwitchUser)
                .padding(8)
                .width(Length::FillPortion(3)),
            button("Switch user").on_press(Message::SwitchUser).padding(8),
            button("Sign out").on_press(Message::SignOut).padding(8),
            button("Refresh").on_press(Message::Refresh).padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let refreshed = self
            .profile
            .last_refreshed()
            .map(|at| format!("Updated {}", at.format("%H:%M:%S UTC")))
            .unwrap_or_default();

        let body = profile_view::view(&self.profile, |car| {
            let dialog = self.dialogs.get(&car.id).copied().unwrap_or_default();
            dialog.trigger(&DELETE_CAR, move |event| Message::Dialog(car.id.clone(), event))
        });

        let content = column![
            text("Your Profile").size(40),
            text(signed_in).size(16),
            session_bar,
            text(&self.status).size(14),
            text(refreshed).size(12),
            body,
        ]
        .spacing(20)
        .padding(40)
        .max_width(900.0);

        let page: Element<Message> = container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into();

        match self.dialogs.iter().find(|(_, dialog)| dialog.is_open()) {
            Some((id, dialog)) => dialog.overlay(page, &DELETE_CAR, |event| {
                Message::Dialog(id.clone(), event)
            }),
            None => page,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    config::load_dotenv();
    logging::init_logging();

    iced::application("Rental Profile", RentalProfile::update, RentalProfile::view)
        .theme(RentalProfile::theme)
        .centered()
        .run_with(RentalProfile::new)
}

/// Issue every ticket as its own task; they settle independently
fn fetch_all(tickets: Vec<FetchTicket>) -> Task<Message> {
    Task::batch(tickets.into_iter().map(|ticket| {
        tracing::info!(resource = %ticket.resource, identity = %ticket.identity, "fetch issued");
        let request = ticket.clone();
        Task::perform(fetch(request), move |result| {
            Message::Fetched(ticket.clone(), result)
        })
    }))
}

/// The base URL is read from the environment for every request
async fn fetch(ticket: FetchTicket) -> Result<Fetched, String> {
    let client = ApiClient::from_env().map_err(|e| e.to_string())?;
    client.fetch(&ticket).await.map_err(|e| e.to_string())
}

async fn delete_car(id: CarId) -> Result<(), String> {
    let client = ApiClient::from_env().map_err(|e| e.to_string())?;
    client.delete_car(&id).await.map_err(|e| e.to_string())
}
