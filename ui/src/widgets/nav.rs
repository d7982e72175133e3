//! Top navigation bar shown while signed in.

use console_business::{EntityKind, LogoutCommand, Route};
use egui::{Response, Ui};

use crate::state::State;

/// Route buttons plus Logout. The active route is drawn selected.
pub fn nav_bar(state: &mut State, ui: &mut Ui) -> Response {
    let current = state.route();
    let mut target = None;
    let mut logout = false;

    let response = ui
        .horizontal(|ui| {
            if ui.selectable_label(current == Route::Home, "Home").clicked() {
                target = Some(Route::Home);
            }
            for kind in EntityKind::ALL {
                let route = Route::from(kind);
                if ui.selectable_label(current == route, kind.title()).clicked() {
                    target = Some(route);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Logout").clicked() {
                    logout = true;
                }
            });
        })
        .response;

    if let Some(route) = target {
        state.navigate(route);
    }
    if logout {
        state.ctx.dispatch::<LogoutCommand>();
    }

    response
}
