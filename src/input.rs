//! Maps raw widget and keyboard input of one frame to events.

use crate::model::QualitySelection;
use crate::state::{CloseReason, Event};

/// Global keys sampled once per frame
#[derive(Debug, Default, Clone, Copy)]
pub struct Keys {
    /// Ctrl+K, or Cmd+K on macOS
    pub command_k: bool,
    pub escape: bool,
}

/// What the URL field reported this frame
#[derive(Debug, Default, Clone)]
pub struct FieldInput {
    /// New contents if the user typed
    pub edited: Option<String>,
    pub lost_focus: bool,
    pub enter_pressed: bool,
}

/// Clicks inside the modal layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalClick {
    Backdrop,
    CloseButton,
    Quality(String),
}

pub fn key_events(keys: Keys, modal_open: bool) -> Vec<Event> {
    let mut events = Vec::new();
    if keys.command_k {
        events.push(Event::FocusShortcut);
    }
    if keys.escape && modal_open {
        events.push(Event::EscapePressed);
    }
    events
}

/// Enter submits only when it also took focus away from the field.
pub fn field_events(field: FieldInput) -> Vec<Event> {
    let mut events = Vec::new();
    if let Some(text) = field.edited {
        events.push(Event::InputEdited(text));
    }
    if field.lost_focus && field.enter_pressed {
        events.push(Event::Submit);
    }
    events
}

pub fn modal_click_event(click: ModalClick) -> Event {
    match click {
        ModalClick::Backdrop => Event::CloseModal(CloseReason::Backdrop),
        ModalClick::CloseButton => Event::CloseModal(CloseReason::Button),
        ModalClick::Quality(label) => Event::QualitySelected(QualitySelection::new(label)),
    }
}
