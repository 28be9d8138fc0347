//! Presentation controller: owns the view state and runs effects.
//!
//! Every change goes through [`Controller::dispatch`]. Timers post their
//! events back on the same channel; the window drains it once per frame
//! with [`Controller::pump`].

use std::collections::VecDeque;

use tokio::{
    runtime::Handle,
    sync::mpsc::{unbounded_channel, UnboundedReceiver},
};
use tracing::{debug, info};

use crate::config::SimulatorConfig;
use crate::delivery::{DeliveryEmitter, SaveTarget};
use crate::metadata::MetadataSource;
use crate::model::ViewState;
use crate::scheduler::{Scheduler, WakeHook};
use crate::state::{transition, Effect, Event, TimerKey, Timings};

pub struct Controller<S> {
    state: ViewState,
    timings: Timings,
    quality_options: Vec<String>,
    source: MetadataSource,
    scheduler: Scheduler,
    emitter: DeliveryEmitter<S>,
    rx: UnboundedReceiver<Event>,
    scroll_locked: bool,
    focus_requested: bool,
}

impl<S: SaveTarget> Controller<S> {
    pub fn new(config: &SimulatorConfig, handle: Handle, target: S) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            state: ViewState::default(),
            timings: Timings::from(config),
            quality_options: config.quality_options.clone(),
            source: MetadataSource::new(config),
            scheduler: Scheduler::new(handle, tx),
            emitter: DeliveryEmitter::new(target),
            rx,
            scroll_locked: false,
            focus_requested: false,
        }
    }

    /// Runs `wake` whenever a timer event is queued for [`Controller::pump`].
    pub fn on_wake(mut self, wake: WakeHook) -> Self {
        self.scheduler.set_wake(wake);
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn quality_options(&self) -> &[String] {
        &self.quality_options
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    #[cfg(test)]
    pub fn emitter(&self) -> &DeliveryEmitter<S> {
        &self.emitter
    }

    /// True once per focus request; the window moves focus to the URL field.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Fills the URL field with one of the example links.
    pub fn use_example(&mut self) {
        let url = self.source.example_url();
        self.dispatch(Event::InputEdited(url));
    }

    /// Applies queued events from timers. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    pub fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            debug!(?event, "dispatch");
            let (next, effects) = transition(&self.state, event, &self.timings);
            self.state = next;
            for effect in effects {
                self.apply(effect, &mut queue);
            }
        }
    }

    fn apply(&mut self, effect: Effect, queue: &mut VecDeque<Event>) {
        match effect {
            Effect::StartProcessing(submission) => {
                let delay = self.source.processing_delay();
                let metadata = self.source.metadata();
                info!(url = %submission.url, delay_ms = delay.as_millis() as u64, "processing reel");
                self.scheduler.schedule(
                    TimerKey::Processing,
                    delay,
                    Event::ProcessingFinished(metadata),
                );
            }
            Effect::FocusInput => self.focus_requested = true,
            Effect::LockScroll => self.scroll_locked = true,
            Effect::RestoreScroll => self.scroll_locked = false,
            Effect::Schedule { key, after, event } => self.scheduler.schedule(key, after, event),
            Effect::Cancel(key) => self.scheduler.cancel(key),
            Effect::Deliver(quality) => {
                let receipt = self.emitter.emit(&quality);
                info!(
                    quality = receipt.quality.label(),
                    file = %receipt.file_name,
                    saved = receipt.saved_to.is_some(),
                    "demo download triggered"
                );
                queue.push_back(Event::Delivered(quality));
            }
        }
    }
}
