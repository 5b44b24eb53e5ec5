//! Attribute table panel: one row per marker, same order as the map.

use egui::{Align, Color32, Layout, RichText, Sense, Ui};

use geotrack_core::table::{AttributeTable, CellAlign};

use crate::state::{AppState, Command};

const SELECTED_ROW: Color32 = Color32::from_rgb(0x30, 0x8c, 0xc6);
const MIN_COLUMN_WIDTH: f32 = 60.0;

/// Render the table. Returns a command when a row is clicked or the
/// selected row has been scrolled into view.
pub fn show_attribute_table(ui: &mut Ui, state: &AppState) -> Option<Command> {
    let Some(table) = state.scene.as_ref().and_then(|s| s.table.as_ref()) else {
        ui.centered_and_justified(|ui| {
            ui.label("No attributes to show.");
        });
        return None;
    };

    let mut command = None;
    let interactive = state.is_interactive();
    let selected = state.view.selected;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("attribute_table")
                .striped(true)
                .min_col_width(MIN_COLUMN_WIDTH)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for name in table.columns() {
                        ui.label(RichText::new(name).strong());
                    }
                    ui.end_row();

                    for row in 0..table.row_count() {
                        let is_selected = selected == Some(row);
                        let clicked = show_row(ui, table, row, is_selected, state.view.reveal_selected);
                        if clicked && interactive {
                            command = Some(Command::SelectRow(row));
                        }
                        ui.end_row();
                    }
                });
        });

    if state.view.reveal_selected && command.is_none() {
        command = Some(Command::RowRevealed);
    }
    command
}

/// Draw one row's cells; returns whether any cell was clicked.
fn show_row(ui: &mut Ui, table: &AttributeTable, row: usize, selected: bool, reveal: bool) -> bool {
    let Some(cells) = table.row(row) else {
        return false;
    };
    let mut clicked = false;
    for (column, cell) in cells.iter().enumerate() {
        let mut text = RichText::new(&cell.text);
        if selected {
            text = text.color(Color32::WHITE).background_color(SELECTED_ROW);
        }
        let layout = match cell.align {
            CellAlign::Left => Layout::left_to_right(Align::Center),
            CellAlign::Right => Layout::right_to_left(Align::Center),
        };
        let response = ui
            .with_layout(layout, |ui| ui.add(egui::Label::new(text).sense(Sense::click())))
            .inner;
        if selected && reveal && column == 0 {
            response.scroll_to_me(Some(Align::Center));
        }
        clicked |= response.clicked();
    }
    clicked
}
