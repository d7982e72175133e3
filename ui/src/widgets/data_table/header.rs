//! Sortable header row.

use console_business::{ColumnSort, HeaderMap, SortOrder};
use egui::{Sense, Ui};
use egui_extras::TableRow;

/// Header text including the sort indicator for the active column.
pub fn header_text(label: &str, key: &str, sort: Option<ColumnSort>) -> String {
    match sort {
        Some(ColumnSort { key: active, order }) if active.as_str() == key => match order {
            SortOrder::Ascending => format!("{label} ⬆"),
            SortOrder::Descending => format!("{label} ⬇"),
        },
        _ => label.to_owned(),
    }
}

/// Renders one clickable cell per header entry. Returns the key whose
/// header was clicked.
pub fn render_table_header(
    header: &mut TableRow<'_, '_>,
    headers: &HeaderMap,
    sort: Option<ColumnSort>,
) -> Option<String> {
    let mut clicked = None;
    for (key, label) in headers.columns() {
        header.col(|ui| {
            if render_header_cell(ui, &header_text(label, key, sort)) {
                clicked = Some(key.to_owned());
            }
        });
    }
    clicked
}

fn render_header_cell(ui: &mut Ui, text: &str) -> bool {
    ui.add(
        egui::Label::new(egui::RichText::new(text).strong())
            .sense(Sense::click())
            .selectable(false),
    )
    .on_hover_text("Click to sort")
    .clicked()
}
