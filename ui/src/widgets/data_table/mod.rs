//! Schema-agnostic data table.
//!
//! Columns come from a [`HeaderMap`] in insertion order and every row is an
//! [`EntityRecord`] looked up by header key, so the same widget renders any
//! entity the backend returns.
//! - `columns`: column sizing
//! - `header`: sortable header row
//! - `row`: record rows

pub mod columns;
pub mod header;
pub mod row;

use console_business::{ColumnSort, EntityRecord, HeaderMap};
use egui::{Align, Layout, Ui};
use egui_extras::TableBuilder;

use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;
use row::render_record_row;

/// Shown in place of rows when a page has no records.
pub const EMPTY_STATE: &str = "No results.";

/// Renders `rows` under `headers`. Returns the key of a clicked header so the
/// caller can toggle sorting.
pub fn data_table(
    ui: &mut Ui,
    id_salt: &str,
    headers: &HeaderMap,
    rows: &[&EntityRecord],
    sort: Option<ColumnSort>,
) -> Option<String> {
    let mut clicked = None;

    if !headers.is_empty() {
        let mut builder = TableBuilder::new(ui)
            .id_salt(id_salt)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center));
        for column in table_columns(headers.len()) {
            builder = builder.column(column);
        }

        builder
            .header(HEADER_HEIGHT, |mut header| {
                clicked = render_table_header(&mut header, headers, sort);
            })
            .body(|mut body| {
                if rows.is_empty() {
                    // egui_extras has no colspan: the message sits in the
                    // first cell and the rest stay blank.
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(EMPTY_STATE);
                        });
                        for _ in 1..headers.len() {
                            row.col(|_| {});
                        }
                    });
                }
                for record in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        render_record_row(&mut row, headers, record);
                    });
                }
            });
    } else if rows.is_empty() {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.label(EMPTY_STATE);
        });
    }

    clicked
}

#[cfg(test)]
mod data_table_tests {
    use chrono::Utc;
    use console_business::{EntityKind, EntityTableState, PageData};
    use egui_kittest::Harness;
    use kittest::Queryable;
    use serde_json::json;

    fn page(content: serde_json::Value) -> PageData {
        let count = content.as_array().map_or(0, Vec::len);
        serde_json::from_value(json!({
            "content": content,
            "pageable": {"pageNumber": 0, "pageSize": 10, "offset": 0},
            "totalElements": count,
            "totalPages": 1,
            "first": true,
            "last": true,
            "numberOfElements": count,
            "empty": count == 0
        }))
        .unwrap()
    }

    fn harness(table: EntityTableState) -> Harness<'static, EntityTableState> {
        Harness::new_ui_state(
            |ui, table: &mut EntityTableState| {
                let clicked = super::data_table(
                    ui,
                    table.kind().service(),
                    table.headers(),
                    &table.rows(),
                    table.sort(),
                );
                if let Some(key) = clicked {
                    table.toggle_sort(&key);
                }
            },
            table,
        )
    }

    fn departments() -> EntityTableState {
        let mut table = EntityTableState::new(EntityKind::Departments, 10);
        table.apply_page(
            page(json!([
                {"departmentId": 2, "departmentName": "Sales", "managerEmployeeId": null},
                {"departmentId": 1, "departmentName": "Research", "managerEmployeeId": 7}
            ])),
            Utc::now(),
        );
        table
    }

    #[test]
    fn test_inferred_headers_and_cells_rendered() {
        let mut harness = harness(departments());
        harness.step();
        harness.step();

        for label in ["Department Id", "Department Name", "Manager Employee Id"] {
            assert!(
                harness.query_by_label(label).is_some(),
                "Header '{label}' should be displayed"
            );
        }
        assert!(harness.query_by_label("Sales").is_some(), "Cell should render");
        assert!(
            harness.query_by_label("Research").is_some(),
            "Cell should render"
        );
        assert!(
            harness.query_by_label(super::EMPTY_STATE).is_none(),
            "Empty state should be hidden when rows exist"
        );
    }

    #[test]
    fn test_empty_page_shows_empty_state() {
        let mut table = EntityTableState::new(EntityKind::Projects, 10);
        table.apply_page(page(json!([])), Utc::now());

        let mut harness = harness(table);
        harness.step();
        harness.step();

        assert!(
            harness.query_by_label(super::EMPTY_STATE).is_some(),
            "No results. should be displayed"
        );
    }

    #[test]
    fn test_static_headers_survive_empty_page() {
        let mut table = EntityTableState::new(EntityKind::Employees, 10);
        table.apply_page(page(json!([])), Utc::now());

        let mut harness = harness(table);
        harness.step();
        harness.step();

        assert!(
            harness.query_by_label("Employee Id").is_some(),
            "Static headers should render without rows"
        );
        assert_eq!(
            harness.query_all_by_label(super::EMPTY_STATE).count(),
            1,
            "No results. should be displayed once, as a table row"
        );
    }

    #[test]
    fn test_clicking_header_cycles_sort() {
        let mut harness = harness(departments());
        harness.step();
        harness.step();

        harness.get_by_label("Department Id").click();
        harness.step();
        let rows: Vec<String> = harness
            .state()
            .rows()
            .iter()
            .map(|r| r.cell_text("departmentName"))
            .collect();
        assert_eq!(rows, vec!["Research", "Sales"]);
        assert!(
            harness.query_by_label("Department Id ⬆").is_some(),
            "Ascending indicator should be displayed"
        );

        harness.get_by_label("Department Id ⬆").click();
        harness.step();
        assert!(
            harness.query_by_label("Department Id ⬇").is_some(),
            "Descending indicator should be displayed"
        );

        harness.get_by_label("Department Id ⬇").click();
        harness.step();
        assert_eq!(harness.state().sort(), None);
    }
}
