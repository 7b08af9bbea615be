use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use crate::projection::TableProjection;

pub fn build_table(projection: &TableProjection) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers: Vec<Cell> = projection
        .headers()
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(headers);

    for row in projection.rows() {
        table.add_row(row.iter().map(Cell::new));
    }

    table
}

pub fn display_projection(projection: &TableProjection) {
    println!("{}", build_table(projection));

    if projection.is_single_cell() {
        return;
    }
    println!(
        "\n{}",
        format!("{} rows returned", projection.row_count()).green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_contains_headers_and_cells() {
        let projection = TableProjection::from_value(&json!({
            "result": [
                {"symbol": "BTC/USDT", "last": "67000.1"},
                {"symbol": "ETH/USDT", "last": "3100.5"}
            ]
        }));
        let rendered = build_table(&projection).to_string();

        assert!(rendered.contains("symbol"));
        assert!(rendered.contains("last"));
        assert!(rendered.contains("BTC/USDT"));
        assert!(rendered.contains("3100.5"));
    }

    #[test]
    fn test_error_renders_as_single_cell() {
        let rendered = build_table(&TableProjection::single("connection timeout")).to_string();
        assert!(rendered.contains("connection timeout"));
    }
}
