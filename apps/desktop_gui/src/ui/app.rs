use std::time::Duration;

use client_core::{
    frame::{ChromeLayer, Frame},
    BookingApp, Location, Screen, Settings, WallClock,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::Theme;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::UiEvent,
    ui::{
        motion,
        screens::{self, DateInputs, ScreenCx},
        theme,
    },
};

pub const SETTINGS_STORAGE_KEY: &str = "flightpath.gui.settings";

const HEADER_HEIGHT: f32 = 48.0;
const MENU_WIDTH: f32 = 240.0;
const GLOBE_RADIUS: f32 = 150.0;

/// GUI preferences kept in eframe storage between runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedGuiSettings {
    pub theme: Theme,
}

pub struct FlightpathApp {
    app: BookingApp<WallClock>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    dates: DateInputs,
    applied_theme: Option<Theme>,
}

impl FlightpathApp {
    pub fn new(
        settings: Settings,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedGuiSettings>,
    ) -> Self {
        let theme_override = persisted.map(|p| p.theme);
        let mut settings = settings;
        if let Some(theme) = theme_override {
            settings.theme = theme;
        }
        Self {
            app: BookingApp::new(settings, WallClock),
            cmd_tx,
            ui_rx,
            status: String::new(),
            dates: DateInputs::default(),
            applied_theme: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::PaymentCompleted(receipt) => {
                    tracing::info!(amount = receipt.amount, "payment completed");
                    self.app.finish_payment(&receipt);
                    self.status.clear();
                }
                UiEvent::PaymentFailed(reason) => {
                    self.app.cancel_payment();
                    self.status = format!("Payment failed: {reason}");
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context, theme: Theme) {
        if self.applied_theme == Some(theme) {
            return;
        }
        theme::apply(ctx, theme);
        self.applied_theme = Some(theme);
    }

    fn show_header(&mut self, ctx: &egui::Context, frame: &Frame) {
        let header = &frame.header;
        let title = match self.app.current_step() {
            Some(step) => step.title(),
            None if frame.location.path() == client_core::routes::BOARDING_PASS_PATH => "Boarding pass",
            None => "",
        };
        egui::TopBottomPanel::top("header")
            .exact_height(HEADER_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if header.mounted {
                        ui.set_opacity(header.context.visibility);
                        if ui.add_enabled(self.app.orchestrator().can_go_back(), egui::Button::new("‹")).clicked() {
                            self.app.back();
                            if self.app.state().menu_open {
                                self.app.toggle_menu();
                            }
                        }
                        ui.label(egui::RichText::new(title).strong());
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.set_opacity(1.0);
                        if ui.button("☰").clicked() {
                            self.app.toggle_menu();
                        }
                    });
                });
            });
    }

    fn show_menu(&mut self, ctx: &egui::Context, menu: &ChromeLayer, theme: Theme) {
        if !menu.mounted {
            return;
        }
        let screen = ctx.screen_rect();
        let palette = theme::palette(theme);
        let scrim = palette.scrim.gamma_multiply(menu.context.visibility);
        ctx.layer_painter(egui::LayerId::new(egui::Order::Middle, egui::Id::new("menu-scrim")))
            .rect_filled(screen, 0.0, scrim);

        let x = screen.max.x - MENU_WIDTH * menu.context.visibility;
        egui::Area::new(egui::Id::new("menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(x, screen.min.y))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(palette.surface)
                    .inner_margin(egui::Margin::same(16))
                    .show(ui, |ui| {
                        ui.set_width(MENU_WIDTH - 32.0);
                        ui.set_min_height(screen.height() - 32.0);
                        if !menu.context.is_interactive() {
                            ui.disable();
                        }
                        let user = self.app.state().user.clone();
                        ui.label(egui::RichText::new(user.full_name()).strong());
                        ui.label(egui::RichText::new(&user.email).small().color(palette.text_muted));
                        ui.separator();
                        if ui.button("Home").clicked() {
                            self.navigate(Location::root().path());
                        }
                        if ui.button("Book a flight").clicked() {
                            self.navigate(client_core::BookingStep::Details.path());
                        }
                        let label = match theme {
                            Theme::Light => "Dark mode",
                            Theme::Dark => "Light mode",
                        };
                        if ui.button(label).clicked() {
                            self.app.toggle_theme();
                        }
                        if ui.button("Close").clicked() {
                            self.app.toggle_menu();
                        }
                    });
            });
    }

    fn navigate(&mut self, path: &str) {
        match self.app.navigate(path) {
            Ok(_) => {
                if self.app.state().menu_open {
                    self.app.toggle_menu();
                }
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn paint_globe(ui: &egui::Ui, frame: &Frame, container: egui::Rect, theme: Theme) {
        let Some(globe) = &frame.globe else {
            return;
        };
        let palette = theme::palette(theme);
        let (radius, center_y) = if frame.globe_collapsed {
            (GLOBE_RADIUS * 0.4, container.min.y + GLOBE_RADIUS * 0.5)
        } else {
            (GLOBE_RADIUS, container.min.y + container.height() * 0.3)
        };
        let center = egui::pos2(container.center().x, center_y);
        let fill = palette.accent.gamma_multiply(0.25 * globe.context.visibility);
        ui.painter().circle_filled(center, radius, fill);
        ui.painter().circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.5, palette.accent.gamma_multiply(globe.context.visibility)),
        );
        if frame.scrim_visible {
            ui.painter().rect_filled(container, 0.0, palette.scrim);
        }
    }

    fn show_screens(&mut self, ctx: &egui::Context, frame: &Frame, theme: Theme) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let container = ui.max_rect();
            Self::paint_globe(ui, frame, container, theme);

            let mut cx = ScreenCx {
                app: &mut self.app,
                cmd_tx: &self.cmd_tx,
                status: &mut self.status,
                dates: &mut self.dates,
                palette: theme::palette(theme),
            };
            for layer in &frame.screens {
                let rect = motion::layer_rect(&layer.context, container);
                let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect));
                child.set_clip_rect(container);
                child.set_opacity(layer.context.visibility);
                if !layer.context.is_interactive() {
                    child.disable();
                }
                match layer.screen {
                    Screen::Landing => screens::landing(&mut child, &mut cx),
                    Screen::Booking => {
                        if let Some(wizard) = &frame.wizard {
                            screens::booking(&mut child, &mut cx, wizard);
                        }
                    }
                    Screen::BoardingPass => screens::boarding_pass(&mut child, &mut cx),
                }
            }
        });
    }

    fn show_status(&mut self, ctx: &egui::Context) {
        if self.status.is_empty() {
            return;
        }
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status).small());
                if ui.small_button("✕").clicked() {
                    self.status.clear();
                }
            });
        });
    }
}

impl eframe::App for FlightpathApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        for change in self.app.tick() {
            tracing::debug!(key = %change.key, from = ?change.from, to = ?change.to, "phase");
        }
        for outcome in self.app.take_redirects() {
            tracing::info!(from = %outcome.requested(), to = %outcome.location(), "redirected");
        }

        let frame = self.app.frame();
        self.apply_theme_if_needed(ctx, frame.theme);
        self.show_header(ctx, &frame);
        self.show_status(ctx);
        self.show_screens(ctx, &frame, frame.theme);
        self.show_menu(ctx, &frame.menu, frame.theme);

        if self.app.is_settled() && !self.app.payment().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedGuiSettings {
            theme: self.app.state().theme,
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
