//! Main application for the Instagram reel download simulator

// Simulator settings
mod config;
// Pure view transitions
mod state;
// Runs transitions and their effects
mod controller;
// Fake save-to-disk of the demo payload
mod delivery;
// User-visible error kinds
mod errors;
// Widget and key input to events
mod input;
// Seedable made-up metadata
mod metadata;
// Data models for the view
mod model;
// Cancellable timers
mod scheduler;
// URL shape checks
mod validator;

use config::SimulatorConfig;
use controller::Controller;
use delivery::DialogSaveTarget;
use input::{FieldInput, Keys, ModalClick};
use state::Event;

// eframe/egui for GUI application framework
use eframe::{egui, App, Frame};
use egui::{Align2, Color32, Key, Modifiers, Order, RichText, Sense, Vec2, Visuals};
// OnceCell for single-time runtime initialization
use once_cell::sync::OnceCell;
use std::{sync::Arc, time::Duration};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Global Tokio runtime stored in a OnceCell for lazy init
static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

/// Program entry point: initializes logging and runtime, then launches GUI
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let handle = RUNTIME
        .get_or_try_init(|| Runtime::new().map(Arc::new))?
        .handle()
        .clone();

    info!("🎬 Instagram Reel Downloader Demo Loaded");
    info!("⚠️  This is a demonstration application only");
    info!("📝 No actual downloads are performed");

    let config = SimulatorConfig::default();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Instagram Reel Downloader (Demo)",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(Visuals::dark());
            // Repaint as soon as a timer fires so its event lands on time
            let ctx = cc.egui_ctx.clone();
            let controller = Controller::new(&config, handle, DialogSaveTarget)
                .on_wake(Arc::new(move || ctx.request_repaint()));
            Box::new(SimulatorApp { controller })
        }),
    )?;
    Ok(())
}

/// `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Application state for the GUI
struct SimulatorApp {
    controller: Controller<DialogSaveTarget>,
}

/// What the user did during one frame
#[derive(Default)]
struct FrameInput {
    events: Vec<Event>,
    example_requested: bool,
}

impl App for SimulatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 1️⃣ Apply timer events that arrived since the last frame
        self.controller.pump();

        let view = self.controller.state().clone();
        let scroll_locked = self.controller.scroll_locked();
        let input_id = egui::Id::new("reel_url_input");
        let mut frame = FrameInput::default();

        // 2️⃣ Global keys
        let keys = Keys {
            command_k: ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::K)),
            escape: ctx.input(|i| i.key_pressed(Key::Escape)),
        };
        frame.events.extend(input::key_events(keys, view.modal_open()));

        // 3️⃣ Main panel: URL field, download button, inline error
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .enable_scrolling(!scroll_locked)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.heading("Instagram Reel Downloader");
                    ui.label("Demo only: no video is fetched and nothing leaves this machine.");
                    ui.add_space(12.0);

                    ui.label("Paste Instagram reel URL:");
                    ui.horizontal(|ui| {
                        let mut text = view.input.clone();
                        let field = ui.add(
                            egui::TextEdit::singleline(&mut text)
                                .id(input_id)
                                .hint_text("https://www.instagram.com/reel/...")
                                .desired_width(360.0),
                        );
                        frame.events.extend(input::field_events(FieldInput {
                            edited: field.changed().then_some(text),
                            lost_focus: field.lost_focus(),
                            enter_pressed: ui.input(|i| i.key_pressed(Key::Enter)),
                        }));

                        if ui.add_enabled(!view.loading, egui::Button::new("Download")).clicked() {
                            frame.events.push(Event::Submit);
                        }
                        if view.loading {
                            ui.spinner();
                            ui.label("Processing…");
                        }
                    });

                    ui.horizontal(|ui| {
                        if ui.small_button("Try an example URL").clicked() {
                            frame.example_requested = true;
                        }
                        if ui.small_button("Clear").clicked() {
                            frame.events.push(Event::ClearInput);
                        }
                    });

                    if let Some(message) = &view.error {
                        ui.colored_label(Color32::from_rgb(192, 21, 47), message);
                    }
                });
        });

        // 4️⃣ Modal with fake metadata and quality tiers
        if let Some(metadata) = view.metadata() {
            let screen = ctx.screen_rect();
            egui::Area::new(egui::Id::new("modal_backdrop"))
                .order(Order::Middle)
                .fixed_pos(screen.min)
                .show(ctx, |ui| {
                    let backdrop = ui.allocate_rect(screen, Sense::click());
                    ui.painter()
                        .rect_filled(screen, 0.0, Color32::from_black_alpha(160));
                    if backdrop.clicked() {
                        frame.events.push(input::modal_click_event(ModalClick::Backdrop));
                    }
                });

            egui::Area::new(egui::Id::new("download_modal"))
                .order(Order::Foreground)
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_min_width(320.0);
                        ui.horizontal(|ui| {
                            ui.heading("Download options");
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.button("✖").clicked() {
                                    frame.events.push(input::modal_click_event(ModalClick::CloseButton));
                                }
                            });
                        });
                        ui.separator();
                        ui.label(RichText::new(&metadata.title).strong());
                        ui.label(metadata.meta_line());
                        ui.add_space(8.0);

                        ui.label("Select quality:");
                        for option in self.controller.quality_options() {
                            let selected = view
                                .highlighted()
                                .is_some_and(|q| q.label() == option.as_str());
                            if ui.add(egui::Button::new(option).selected(selected)).clicked() {
                                frame
                                    .events
                                    .push(input::modal_click_event(ModalClick::Quality(option.clone())));
                            }
                        }
                    });
                });
        }

        // 5️⃣ Stacked toasts, top-right corner
        for (slot, toast) in view.toasts.iter().enumerate() {
            egui::Area::new(egui::Id::new(("toast", toast.id)))
                .order(Order::Tooltip)
                .anchor(Align2::RIGHT_TOP, Vec2::new(-20.0, 20.0 + slot as f32 * 56.0))
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .fill(Color32::from_rgb(33, 128, 141))
                        .show(ui, |ui| {
                            ui.label(RichText::new(format!("✅ {}", toast.message)).color(Color32::WHITE));
                        });
                });
        }

        // 6️⃣ Hand this frame's input to the controller
        if frame.example_requested {
            self.controller.use_example();
        }
        for event in frame.events {
            self.controller.dispatch(event);
        }
        if self.controller.take_focus_request() {
            ctx.memory_mut(|m| m.request_focus(input_id));
        }

        // Fallback poll; timers normally wake the window themselves
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
