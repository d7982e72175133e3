//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for a successful sign-in.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for inline errors and the table error banner.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber while a request is in flight.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);
