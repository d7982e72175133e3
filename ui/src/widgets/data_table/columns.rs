//! Column sizing for the data table.

use egui_extras::Column;

pub const ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = 28.0;
pub const MIN_COLUMN_WIDTH: f32 = 80.0;

/// One resizable column per header, the last one filling the remaining width.
#[inline]
pub fn table_columns(count: usize) -> Vec<Column> {
    (0..count)
        .map(|index| {
            if index + 1 == count {
                Column::remainder().at_least(MIN_COLUMN_WIDTH)
            } else {
                Column::auto().at_least(MIN_COLUMN_WIDTH).clip(true)
            }
        })
        .collect()
}
