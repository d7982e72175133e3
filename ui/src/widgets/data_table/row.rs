//! Data rows of the table.

use console_business::{EntityRecord, HeaderMap};
use egui::Stroke;
use egui_extras::TableRow;

/// One cell per header key, in header order. Missing and null fields render
/// blank.
pub fn render_record_row(row: &mut TableRow<'_, '_>, headers: &HeaderMap, record: &EntityRecord) {
    for key in headers.keys() {
        row.col(|ui| {
            ui.label(record.cell_text(key));
            draw_cell_bottom_border(ui);
        });
    }
}

fn draw_cell_bottom_border(ui: &mut egui::Ui) {
    let rect = ui.max_rect();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
