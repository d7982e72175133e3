//! Pagination control below a data table.
//!
//! Purely presentational: it reads a [`PaginationView`] and returns the
//! event the user asked for. The owning page applies it.

use console_business::{PAGE_SIZE_OPTIONS, PaginationEvent, PaginationView};
use egui::{ComboBox, Ui};

/// Renders the range text, the "Rows per page" selector, First / Previous /
/// Next / Last and the "Page Number" selector.
pub fn pagination_control(view: &PaginationView, ui: &mut Ui) -> Option<PaginationEvent> {
    let mut event = None;

    ui.horizontal(|ui| {
        ui.label(view.range_text());
        ui.separator();

        ui.label("Rows per page");
        let mut page_size = view.page_size;
        ComboBox::from_id_salt("rows_per_page")
            .selected_text(page_size.to_string())
            .show_ui(ui, |ui| {
                for size in PAGE_SIZE_OPTIONS {
                    ui.selectable_value(&mut page_size, size, size.to_string());
                }
            });
        if page_size != view.page_size {
            event = Some(view.select_page_size(page_size));
        }

        ui.separator();

        if ui
            .add_enabled(view.can_go_back(), egui::Button::new("First"))
            .clicked()
        {
            event = view.first();
        }
        if ui
            .add_enabled(view.can_go_back(), egui::Button::new("Previous"))
            .clicked()
        {
            event = view.previous();
        }
        if ui
            .add_enabled(view.can_go_forward(), egui::Button::new("Next"))
            .clicked()
        {
            event = view.next();
        }
        if ui
            .add_enabled(view.can_go_forward(), egui::Button::new("Last"))
            .clicked()
        {
            event = view.last();
        }

        ui.separator();

        ui.label("Page Number");
        let mut page = view.current_page;
        ComboBox::from_id_salt("page_number")
            .selected_text(page.to_string())
            .show_ui(ui, |ui| {
                for option in view.page_options() {
                    ui.selectable_value(&mut page, option, option.to_string());
                }
            });
        if page != view.current_page {
            event = view.select_page(page);
        }
    });

    event
}
