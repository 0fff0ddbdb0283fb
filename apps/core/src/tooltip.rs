use crate::dataset::month_name;
use crate::surface::CellElement;

/// Horizontal distance from the cell's left edge to the tooltip's left edge.
pub const TOOLTIP_OFFSET_X: f64 = 60.0;
/// The tooltip floats this many cell heights above the month tick.
pub const TOOLTIP_ROWS_ABOVE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub cell: usize,
    pub heading: String,
    pub temperature: String,
    pub variance: String,
    pub left: f64,
    pub top: f64,
    pub visible: bool,
}

impl Tooltip {
    pub fn for_cell(cell: &CellElement) -> Self {
        Self {
            cell: cell.index,
            heading: format!(
                "{} - {}",
                cell.year,
                month_name(cell.month).unwrap_or_default()
            ),
            temperature: format_celsius(cell.temp),
            variance: format_celsius(cell.variance),
            left: cell.x - TOOLTIP_OFFSET_X,
            top: TOOLTIP_ROWS_ABOVE.mul_add(-cell.height, cell.y),
            visible: true,
        }
    }

    pub fn lines(&self) -> [&str; 3] {
        [&self.heading, &self.temperature, &self.variance]
    }
}

pub fn format_celsius(value: f64) -> String {
    format!("{value:.1}°C")
}
