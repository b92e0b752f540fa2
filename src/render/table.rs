use super::{Frame, escape_xml, placeholder};
use crate::config::Config;
use crate::model::TableAttrs;

const CELL_FONT_SIZE: f32 = 12.0;

pub(super) fn render(svg: &mut String, attrs: &TableAttrs, frame: Frame, config: &Config) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    let rows = attrs.table_data.len();
    let columns = attrs.table_data.first().map_or(0, Vec::len);
    if rows == 0 || columns == 0 {
        placeholder(svg, frame, &config.theme, &config.chart.no_data_message);
        return;
    }

    let row_h = frame.height / rows as f32;
    let col_w = frame.width / columns as f32;
    let grid = &config.theme.table_grid_color;

    for (row, cells) in attrs.table_data.iter().enumerate() {
        let y = row as f32 * row_h;
        let bg = if row == 0 {
            &attrs.header_bg_color
        } else {
            &attrs.cell_bg_color
        };
        for (col, cell) in cells.iter().enumerate() {
            let x = col as f32 * col_w;
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{col_w:.2}\" height=\"{row_h:.2}\" fill=\"{bg}\" stroke=\"{grid}\" stroke-width=\"1\"/>"
            ));
            let weight = if row == 0 { "bold" } else { "normal" };
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{CELL_FONT_SIZE}\" font-weight=\"{weight}\" fill=\"{}\">{}</text>",
                x + col_w / 2.0,
                y + row_h / 2.0,
                config.theme.font_family,
                attrs.color,
                escape_xml(cell)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            id: 1,
            width: 300.0,
            height: 120.0,
        }
    }

    #[test]
    fn header_row_uses_header_background() {
        let mut svg = String::new();
        render(&mut svg, &TableAttrs::default(), frame(), &Config::default());
        let attrs = TableAttrs::default();
        assert!(svg.contains(&format!("y=\"0.00\" width=\"100.00\" height=\"40.00\" fill=\"{}\"", attrs.header_bg_color)));
        assert!(svg.contains(&format!("fill=\"{}\"", attrs.cell_bg_color)));
        assert!(svg.contains("Header 1"));
        assert!(svg.contains("Data 6"));
    }

    #[test]
    fn cell_count_matches_grid() {
        let mut svg = String::new();
        render(&mut svg, &TableAttrs::default(), frame(), &Config::default());
        assert_eq!(svg.matches("<rect").count(), 9);
        assert_eq!(svg.matches("<text").count(), 9);
    }

    #[test]
    fn empty_grid_shows_placeholder() {
        let mut svg = String::new();
        let attrs = TableAttrs {
            table_data: Vec::new(),
            ..Default::default()
        };
        render(&mut svg, &attrs, frame(), &Config::default());
        assert!(svg.contains("No data"));
    }
}
