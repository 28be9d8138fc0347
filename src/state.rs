//! Pure transition table for the view.
//!
//! `transition` never touches the window, the clock or the randomness
//! source. It returns the next [`ViewState`] together with a list of
//! [`Effect`]s for the controller to carry out.

use std::time::Duration;

use tracing::debug;

use crate::config::SimulatorConfig;
use crate::errors::SubmitError;
use crate::model::{FakeMetadata, ModalState, QualitySelection, Submission, Toast, ViewState};
use crate::validator;

/// How the modal was dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Backdrop,
    Escape,
    AutoClose,
}

/// Everything that can happen to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// URL field contents changed
    InputEdited(String),
    ClearInput,
    /// Download button or Enter in the URL field
    Submit,
    ProcessingFinished(FakeMetadata),
    ProcessingFailed,
    CloseModal(CloseReason),
    EscapePressed,
    /// Ctrl/Cmd + K
    FocusShortcut,
    QualitySelected(QualitySelection),
    /// Selection delay elapsed
    DeliveryDue(QualitySelection),
    /// Payload handed to the save target
    Delivered(QualitySelection),
    AutoCloseDue,
    ToastExpired(u64),
}

/// Keys for scheduled tasks; scheduling an existing key replaces it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Processing,
    Delivery,
    AutoClose,
    Toast(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the fake pipeline for this submission
    StartProcessing(Submission),
    FocusInput,
    LockScroll,
    RestoreScroll,
    Schedule {
        key: TimerKey,
        after: Duration,
        event: Event,
    },
    Cancel(TimerKey),
    /// Hand the demo payload to the save target
    Deliver(QualitySelection),
}

/// Fixed delays used by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub selection_delay: Duration,
    pub auto_close_delay: Duration,
    pub toast_lifetime: Duration,
}

impl From<&SimulatorConfig> for Timings {
    fn from(config: &SimulatorConfig) -> Self {
        Self {
            selection_delay: config.selection_delay,
            auto_close_delay: config.auto_close_delay,
            toast_lifetime: config.toast_lifetime,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::from(&SimulatorConfig::default())
    }
}

pub fn toast_message(quality: &QualitySelection) -> String {
    format!("Demo download started ({})!", quality.label())
}

/// Computes the next state and the effects of `event`.
pub fn transition(state: &ViewState, event: Event, timings: &Timings) -> (ViewState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        Event::InputEdited(text) => {
            next.input = text;
            next.error = None;
        }
        Event::ClearInput => {
            next.input.clear();
            next.error = None;
        }
        Event::Submit => {
            // Control is disabled while loading; the modal covers the form.
            if state.loading || state.modal_open() {
                return (next, effects);
            }
            match validator::validate(&state.input) {
                Ok(submission) => {
                    next.loading = true;
                    next.error = None;
                    effects.push(Effect::StartProcessing(submission));
                }
                Err(err) => {
                    next.error = Some(err.to_string());
                    effects.push(Effect::FocusInput);
                }
            }
        }
        Event::ProcessingFinished(metadata) => {
            if !state.loading {
                return (next, effects);
            }
            next.loading = false;
            next.modal = ModalState::Open {
                metadata,
                highlighted: None,
            };
            effects.push(Effect::LockScroll);
        }
        Event::ProcessingFailed => {
            if !state.loading {
                return (next, effects);
            }
            next.loading = false;
            next.error = Some(SubmitError::ProcessingFailed.to_string());
            effects.push(Effect::FocusInput);
        }
        Event::CloseModal(reason) => close_modal(&mut next, &mut effects, reason),
        Event::EscapePressed => close_modal(&mut next, &mut effects, CloseReason::Escape),
        Event::AutoCloseDue => close_modal(&mut next, &mut effects, CloseReason::AutoClose),
        Event::FocusShortcut => effects.push(Effect::FocusInput),
        Event::QualitySelected(quality) => {
            if let ModalState::Open { highlighted, .. } = &mut next.modal {
                *highlighted = Some(quality.clone());
                effects.push(Effect::Schedule {
                    key: TimerKey::Delivery,
                    after: timings.selection_delay,
                    event: Event::DeliveryDue(quality),
                });
            }
        }
        Event::DeliveryDue(quality) => {
            if state.modal_open() {
                effects.push(Effect::Deliver(quality));
            }
        }
        Event::Delivered(quality) => {
            let id = next.next_toast_id;
            next.next_toast_id += 1;
            next.toasts.push(Toast {
                id,
                message: toast_message(&quality),
            });
            effects.push(Effect::Schedule {
                key: TimerKey::Toast(id),
                after: timings.toast_lifetime,
                event: Event::ToastExpired(id),
            });
            if state.modal_open() {
                effects.push(Effect::Schedule {
                    key: TimerKey::AutoClose,
                    after: timings.auto_close_delay,
                    event: Event::AutoCloseDue,
                });
            }
        }
        Event::ToastExpired(id) => next.toasts.retain(|t| t.id != id),
    }

    (next, effects)
}

// Closing drops the modal-scoped timers; toasts keep their own lifetime.
fn close_modal(next: &mut ViewState, effects: &mut Vec<Effect>, reason: CloseReason) {
    if !next.modal_open() {
        return;
    }
    debug!(?reason, "closing modal");
    next.modal = ModalState::Closed;
    effects.push(Effect::Cancel(TimerKey::Delivery));
    effects.push(Effect::Cancel(TimerKey::AutoClose));
    effects.push(Effect::RestoreScroll);
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "https://www.instagram.com/reel/CXampleReel123/";

    fn step(state: &ViewState, event: Event) -> (ViewState, Vec<Effect>) {
        transition(state, event, &Timings::default())
    }

    fn meta() -> FakeMetadata {
        FakeMetadata {
            title: "Funny Pet Moments".into(),
            duration: "12s".into(),
            views: "45K".into(),
        }
    }

    fn open_modal() -> ViewState {
        ViewState {
            modal: ModalState::Open {
                metadata: meta(),
                highlighted: None,
            },
            ..ViewState::default()
        }
    }

    fn with_input(text: &str) -> ViewState {
        ViewState {
            input: text.into(),
            ..ViewState::default()
        }
    }

    #[test]
    fn submit_valid_starts_loading() {
        let (next, effects) = step(&with_input(VALID), Event::Submit);
        assert!(next.loading);
        assert!(next.error.is_none());
        assert_eq!(
            effects,
            vec![Effect::StartProcessing(Submission { url: VALID.into() })]
        );
    }

    #[test]
    fn submit_empty_shows_error_without_loading() {
        let (next, effects) = step(&with_input("   "), Event::Submit);
        assert!(!next.loading);
        assert_eq!(next.error, Some(SubmitError::EmptyInput.to_string()));
        assert_eq!(effects, vec![Effect::FocusInput]);
    }

    #[test]
    fn submit_invalid_replaces_previous_error() {
        let mut state = with_input("not a url");
        state.error = Some(SubmitError::EmptyInput.to_string());
        let (next, effects) = step(&state, Event::Submit);
        assert_eq!(next.error, Some(SubmitError::InvalidFormat.to_string()));
        assert!(!next.loading);
        assert!(!effects.iter().any(|e| matches!(e, Effect::StartProcessing(_))));
    }

    #[test]
    fn submit_ignored_while_loading() {
        let mut state = with_input(VALID);
        state.loading = true;
        let (next, effects) = step(&state, Event::Submit);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn submit_ignored_while_modal_open() {
        let mut state = open_modal();
        state.input = VALID.into();
        let (next, effects) = step(&state, Event::Submit);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn typing_clears_error_only() {
        let mut state = open_modal();
        state.error = Some("boom".into());
        let (next, effects) = step(&state, Event::InputEdited("h".into()));
        assert!(next.error.is_none());
        assert_eq!(next.input, "h");
        assert_eq!(next.modal, state.modal);
        assert!(effects.is_empty());
    }

    #[test]
    fn clear_input_empties_field() {
        let mut state = with_input(VALID);
        state.error = Some("boom".into());
        let (next, _) = step(&state, Event::ClearInput);
        assert!(next.input.is_empty());
        assert!(next.error.is_none());
    }

    #[test]
    fn processing_finished_opens_modal() {
        let mut state = with_input(VALID);
        state.loading = true;
        let (next, effects) = step(&state, Event::ProcessingFinished(meta()));
        assert!(!next.loading);
        assert_eq!(next.metadata(), Some(&meta()));
        assert!(next.modal_open());
        assert_eq!(effects, vec![Effect::LockScroll]);
    }

    #[test]
    fn processing_finished_without_loading_is_ignored() {
        let (next, effects) = step(&ViewState::default(), Event::ProcessingFinished(meta()));
        assert!(!next.modal_open());
        assert!(effects.is_empty());
    }

    #[test]
    fn processing_failed_shows_catch_all() {
        let mut state = with_input(VALID);
        state.loading = true;
        let (next, effects) = step(&state, Event::ProcessingFailed);
        assert!(!next.loading);
        assert!(!next.modal_open());
        assert_eq!(next.error, Some(SubmitError::ProcessingFailed.to_string()));
        assert_eq!(effects, vec![Effect::FocusInput]);
    }

    #[test]
    fn close_cancels_modal_timers() {
        let (next, effects) = step(&open_modal(), Event::CloseModal(CloseReason::Button));
        assert!(!next.modal_open());
        assert_eq!(
            effects,
            vec![
                Effect::Cancel(TimerKey::Delivery),
                Effect::Cancel(TimerKey::AutoClose),
                Effect::RestoreScroll,
            ]
        );
    }

    #[test]
    fn close_when_closed_is_noop() {
        let state = with_input("x");
        for reason in [
            CloseReason::Button,
            CloseReason::Backdrop,
            CloseReason::Escape,
            CloseReason::AutoClose,
        ] {
            let (next, effects) = step(&state, Event::CloseModal(reason));
            assert_eq!(next, state);
            assert!(effects.is_empty());
        }
        let (next, effects) = step(&state, Event::AutoCloseDue);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn escape_closes_only_open_modal() {
        let (next, _) = step(&open_modal(), Event::EscapePressed);
        assert!(!next.modal_open());

        let idle = ViewState::default();
        let (next, effects) = step(&idle, Event::EscapePressed);
        assert_eq!(next, idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn focus_shortcut_focuses_input() {
        let (next, effects) = step(&ViewState::default(), Event::FocusShortcut);
        assert_eq!(next, ViewState::default());
        assert_eq!(effects, vec![Effect::FocusInput]);
    }

    #[test]
    fn quality_click_highlights_and_schedules_delivery() {
        let q = QualitySelection::new("720p");
        let (next, effects) = step(&open_modal(), Event::QualitySelected(q.clone()));
        assert_eq!(next.highlighted(), Some(&q));
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                key: TimerKey::Delivery,
                after: Duration::from_millis(500),
                event: Event::DeliveryDue(q),
            }]
        );
    }

    #[test]
    fn second_quality_click_moves_highlight() {
        let (state, _) = step(&open_modal(), Event::QualitySelected(QualitySelection::new("720p")));
        let (next, _) = step(&state, Event::QualitySelected(QualitySelection::new("1080p")));
        assert_eq!(next.highlighted(), Some(&QualitySelection::new("1080p")));
    }

    #[test]
    fn quality_click_without_modal_is_ignored() {
        let (next, effects) = step(
            &ViewState::default(),
            Event::QualitySelected(QualitySelection::new("720p")),
        );
        assert_eq!(next, ViewState::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn delivery_due_delivers_only_with_open_modal() {
        let q = QualitySelection::new("480p");
        let (_, effects) = step(&open_modal(), Event::DeliveryDue(q.clone()));
        assert_eq!(effects, vec![Effect::Deliver(q.clone())]);

        let (_, effects) = step(&ViewState::default(), Event::DeliveryDue(q));
        assert!(effects.is_empty());
    }

    #[test]
    fn delivered_adds_toast_and_schedules_auto_close() {
        let q = QualitySelection::new("720p");
        let (next, effects) = step(&open_modal(), Event::Delivered(q));
        assert_eq!(
            next.toasts,
            vec![Toast {
                id: 0,
                message: "Demo download started (720p)!".into(),
            }]
        );
        assert_eq!(next.next_toast_id, 1);
        assert_eq!(
            effects,
            vec![
                Effect::Schedule {
                    key: TimerKey::Toast(0),
                    after: Duration::from_millis(3000),
                    event: Event::ToastExpired(0),
                },
                Effect::Schedule {
                    key: TimerKey::AutoClose,
                    after: Duration::from_millis(2000),
                    event: Event::AutoCloseDue,
                },
            ]
        );
    }

    #[test]
    fn toasts_stack_and_expire_individually() {
        let (state, _) = step(&open_modal(), Event::Delivered(QualitySelection::new("720p")));
        let (state, _) = step(&state, Event::Delivered(QualitySelection::new("360p")));
        assert_eq!(state.toasts.len(), 2);

        let (state, effects) = step(&state, Event::ToastExpired(0));
        assert!(effects.is_empty());
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "Demo download started (360p)!");

        let (again, _) = step(&state, Event::ToastExpired(0));
        assert_eq!(again, state);
    }

    #[test]
    fn auto_close_due_closes_modal() {
        let (next, effects) = step(&open_modal(), Event::AutoCloseDue);
        assert!(!next.modal_open());
        assert!(effects.contains(&Effect::RestoreScroll));
    }
}
