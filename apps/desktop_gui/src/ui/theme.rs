//! Light and dark palettes for the booking screens.

use eframe::egui;
use shared::domain::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub raised_surface: egui::Color32,
    pub text: egui::Color32,
    pub text_muted: egui::Color32,
    pub accent: egui::Color32,
    pub error: egui::Color32,
    pub scrim: egui::Color32,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: egui::Color32::from_rgb(244, 246, 250),
            surface: egui::Color32::WHITE,
            raised_surface: egui::Color32::from_rgb(236, 240, 248),
            text: egui::Color32::from_rgb(24, 28, 38),
            text_muted: egui::Color32::from_rgb(110, 118, 134),
            accent: egui::Color32::from_rgb(46, 108, 246),
            error: egui::Color32::from_rgb(214, 52, 64),
            scrim: egui::Color32::from_black_alpha(96),
        },
        Theme::Dark => Palette {
            background: egui::Color32::from_rgb(16, 18, 24),
            surface: egui::Color32::from_rgb(28, 31, 40),
            raised_surface: egui::Color32::from_rgb(38, 42, 54),
            text: egui::Color32::from_rgb(232, 236, 244),
            text_muted: egui::Color32::from_rgb(150, 158, 176),
            accent: egui::Color32::from_rgb(98, 148, 255),
            error: egui::Color32::from_rgb(255, 104, 112),
            scrim: egui::Color32::from_black_alpha(160),
        },
    }
}

pub fn visuals_for_theme(theme: Theme) -> egui::Visuals {
    let colors = palette(theme);
    let mut visuals = match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    };
    visuals.override_text_color = Some(colors.text);
    visuals.window_fill = colors.surface;
    visuals.panel_fill = colors.background;
    visuals.extreme_bg_color = colors.surface;
    visuals.faint_bg_color = colors.raised_surface;
    visuals.hyperlink_color = colors.accent;
    visuals.selection.bg_fill = colors.accent;
    visuals.widgets.active.bg_fill = colors.accent;
    visuals.widgets.hovered.bg_fill = colors.accent.gamma_multiply(0.85);
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);
    visuals
}

/// Installs the theme's visuals and spacing on `ctx`.
pub fn apply(ctx: &egui::Context, theme: Theme) {
    let mut style = (*ctx.style()).clone();
    style.visuals = visuals_for_theme(theme);
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.interact_size = egui::vec2(40.0, 32.0);
    ctx.set_style(style);
}
