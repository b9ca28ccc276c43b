use comfy_table::presets::ASCII_MARKDOWN;

use super::table::RowSet;

impl RowSet {
    pub fn to_ascii(&self) -> String {
        self.to_ascii_window(self.number_of_rows())
    }

    /// renders up to `window` rows as an ASCII table, header included
    pub fn to_ascii_window(&self, window: usize) -> String {
        let mut text_table = comfy_table::Table::new();

        let mut header_row: Vec<comfy_table::Cell> = Vec::new();
        for col in self.columns() {
            let cell = comfy_table::Cell::new(format!("{}\n<{}>", col.get_name(), col.get_data_type()))
                .set_alignment(comfy_table::CellAlignment::Center);
            header_row.push(cell);
        }

        text_table.set_header(header_row);

        for row in self.rows().iter().take(window) {
            let mut formatted_row: Vec<String> = Vec::new();
            for col in self.columns() {
                let cell = row
                    .get(col.get_name())
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                formatted_row.push(cell);
            }
            text_table.add_row(formatted_row);
        }

        text_table
            .load_preset(ASCII_MARKDOWN)
            .remove_style(comfy_table::TableComponent::HorizontalLines);

        format!("\n{}", text_table)
    }
}
