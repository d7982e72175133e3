//! Paginated view of one entity kind.
//!
//! The first visit triggers the initial fetch. Errors show as a banner with a
//! Retry button above the last successfully loaded rows.

use chrono::Local;
use console_business::{
    EntityKind, EntityTablesState, TableStatus, ensure_loaded, handle_pagination, request_fetch,
};
use egui::{Response, RichText, Ui};

use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets;

/// Renders the table of `kind` with its pagination control.
pub fn entities_page(state: &mut State, ui: &mut Ui, kind: EntityKind) -> Response {
    ensure_loaded(&mut state.ctx, kind);

    let mut retry = false;
    let mut sort_key = None;
    let mut event = None;

    let response = ui
        .vertical(|ui| {
            let table = state.ctx.state::<EntityTablesState>().table(kind);

            ui.horizontal(|ui| {
                ui.heading(kind.title());
                if table.is_loading() {
                    ui.spinner();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!table.is_loading(), egui::Button::new("Refresh"))
                        .clicked()
                    {
                        retry = true;
                    }
                    if let Some(updated) = table.last_updated() {
                        ui.label(format!(
                            "Last updated {}",
                            updated.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                        ));
                    }
                });
            });
            ui.separator();

            if let TableStatus::Error(message) = table.status() {
                egui::Frame::NONE
                    .stroke(egui::Stroke::new(1.0, COLOR_RED))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(message).color(COLOR_RED));
                            if ui.button("Retry").clicked() {
                                retry = true;
                            }
                        });
                    });
                ui.add_space(8.0);
            }

            if table.is_loading() && table.records().is_empty() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            } else {
                let rows = table.rows();
                sort_key =
                    widgets::data_table(ui, kind.service(), table.headers(), &rows, table.sort());
            }

            ui.add_space(8.0);
            event = widgets::pagination_control(&table.pagination_view(), ui);
        })
        .response;

    if let Some(key) = sort_key {
        state
            .ctx
            .state_mut::<EntityTablesState>()
            .table_mut(kind)
            .toggle_sort(&key);
    }
    if let Some(event) = event {
        handle_pagination(&mut state.ctx, kind, event);
    } else if retry {
        request_fetch(&mut state.ctx, kind);
    }

    response
}
