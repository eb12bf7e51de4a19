//! Maps transition contexts onto screen geometry.

use client_core::transition::TransitionContext;
use eframe::egui;

/// Horizontal offset of a sliding layer inside a container `width` wide.
pub fn slide_offset(context: &TransitionContext, width: f32) -> f32 {
    context.slide_fraction() * width
}

/// The rect a layer occupies this frame: `container` shifted by its slide offset.
pub fn layer_rect(context: &TransitionContext, container: egui::Rect) -> egui::Rect {
    container.translate(egui::vec2(slide_offset(context, container.width()), 0.0))
}

/// Lift of a fading element, in points, that reaches zero once fully in.
pub fn rise_offset(context: &TransitionContext, distance: f32) -> f32 {
    (1.0 - context.visibility) * distance
}

/// The scroll offset to report for a layer, if any. Only interactive
/// layers report, and only when the offset moved since the last report.
pub fn scroll_report(previous: Option<f32>, offset: f32, interactive: bool) -> Option<f32> {
    if !interactive || (offset - previous.unwrap_or(0.0)).abs() < f32::EPSILON {
        return None;
    }
    Some(offset)
}

#[cfg(test)]
#[path = "../tests/motion_tests.rs"]
mod tests;
