//! Confirmation dialog for destructive actions
//!
//! A trigger button opens a modal with a static warning, Cancel and Continue.
//! Continue runs the caller's callback once and closes; Cancel (or a click on
//! the backdrop) only closes. The open flag is the dialog's only state.

use iced::widget::{button, center, column, container, mouse_area, opaque, row, stack, text};
use iced::{Color, Element};

/// User interaction with a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    Open,
    Cancel,
    Confirm,
}

/// Static wording of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub trigger: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub cancel: &'static str,
    pub confirm: &'static str,
}

pub const DELETE_CAR: Prompt = Prompt {
    trigger: "Delete Car",
    title: "Are you absolutely sure?",
    description: "This action cannot be undone. This will permanently delete your car \
                  and remove its data from our servers.",
    cancel: "Cancel",
    confirm: "Continue",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmDialog {
    open: bool,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply an interaction. `on_confirm` runs only for a Confirm while open,
    /// and its result is handed back to the caller.
    pub fn update<T>(&mut self, event: DialogEvent, on_confirm: impl FnOnce() -> T) -> Option<T> {
        match event {
            DialogEvent::Open => {
                self.open = true;
                None
            }
            DialogEvent::Cancel => {
                self.open = false;
                None
            }
            DialogEvent::Confirm if self.open => {
                let result = on_confirm();
                self.open = false;
                Some(result)
            }
            DialogEvent::Confirm => None,
        }
    }

    /// The button that opens the dialog
    pub fn trigger<'a, Message: Clone + 'a>(
        &self,
        prompt: &Prompt,
        on_event: impl Fn(DialogEvent) -> Message,
    ) -> Element<'a, Message> {
        button(text(prompt.trigger))
            .on_press(on_event(DialogEvent::Open))
            .style(button::danger)
            .padding(8)
            .into()
    }

    /// Lay the modal over `base` while open; otherwise return `base` untouched
    pub fn overlay<'a, Message: Clone + 'a>(
        &self,
        base: Element<'a, Message>,
        prompt: &Prompt,
        on_event: impl Fn(DialogEvent) -> Message,
    ) -> Element<'a, Message> {
        if !self.open {
            return base;
        }

        let content = container(
            column![
                text(prompt.title).size(22),
                text(prompt.description),
                row![
                    button(text(prompt.cancel))
                        .on_press(on_event(DialogEvent::Cancel))
                        .style(button::secondary),
                    button(text(prompt.confirm))
                        .on_press(on_event(DialogEvent::Confirm))
                        .style(button::danger),
                ]
                .spacing(10),
            ]
            .spacing(16),
        )
        .width(440.0)
        .padding(24)
        .style(container::rounded_box);

        modal(base, content, on_event(DialogEvent::Cancel))
    }
}

fn modal<'a, Message: Clone + 'a>(
    base: Element<'a, Message>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_invokes_callback_once() {
        let mut dialog = ConfirmDialog::new();
        let mut calls = 0;

        dialog.update(DialogEvent::Open, || calls += 1);
        assert!(dialog.is_open());

        assert_eq!(dialog.update(DialogEvent::Confirm, || calls += 1), Some(()));
        assert!(!dialog.is_open());
        assert_eq!(calls, 1);

        // A second Confirm after closing must not fire again
        assert_eq!(dialog.update(DialogEvent::Confirm, || calls += 1), None);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_cancel_never_invokes_callback() {
        let mut dialog = ConfirmDialog::new();
        let mut calls = 0;

        dialog.update(DialogEvent::Open, || calls += 1);
        assert_eq!(dialog.update(DialogEvent::Cancel, || calls += 1), None);

        assert!(!dialog.is_open());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_confirm_hands_back_callback_result() {
        let mut dialog = ConfirmDialog::new();
        dialog.update(DialogEvent::Open, || "unused");
        assert_eq!(dialog.update(DialogEvent::Confirm, || "delete 7"), Some("delete 7"));
    }
}
