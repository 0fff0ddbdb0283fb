use crate::dataset::{Dataset, TemperatureRecord};
use crate::scale::LinearScale;

pub const CANVAS_WIDTH: f64 = 1000.0;
pub const CANVAS_HEIGHT: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

pub const MARGINS: Margins = Margins {
    left: 100.0,
    right: 60.0,
    top: 50.0,
    bottom: 200.0,
};

pub const X_TICK_COUNT: usize = 20;
pub const Y_TICK_COUNT: usize = 12;
pub const MONTHS_PER_YEAR: f64 = 12.0;

pub const PLOT_WIDTH: f64 = CANVAS_WIDTH - MARGINS.left - MARGINS.right;
pub const PLOT_HEIGHT: f64 = CANVAS_HEIGHT - MARGINS.bottom - MARGINS.top;

/// Scales and uniform cell size for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl ChartLayout {
    /// `None` for an empty dataset: there is no min/max to scale against.
    pub fn compute(dataset: &Dataset) -> Option<Self> {
        let (first_year, last_year) = dataset.year_range()?;
        let (first_month, last_month) = dataset.month_range()?;

        let x_scale = LinearScale::new(
            (f64::from(first_year), f64::from(last_year)),
            (MARGINS.left, CANVAS_WIDTH - MARGINS.right),
        );
        let y_scale = LinearScale::new(
            (f64::from(first_month) - 0.5, f64::from(last_month) + 0.5),
            (MARGINS.top, CANVAS_HEIGHT - MARGINS.bottom),
        );

        // The last year starts at the right edge of the plot and runs one
        // cell past it.
        let year_span = (last_year - first_year).max(1);

        Some(Self {
            x_scale,
            y_scale,
            cell_width: PLOT_WIDTH / f64::from(year_span),
            cell_height: PLOT_HEIGHT / MONTHS_PER_YEAR,
        })
    }

    /// Untranslated top-left corner of a record's cell.
    pub fn cell_origin(&self, record: &TemperatureRecord) -> (f64, f64) {
        (
            self.x_scale.apply(f64::from(record.year)),
            self.y_scale.apply(f64::from(record.month)),
        )
    }

    /// Vertical translate that centers a cell on its month tick.
    pub fn cell_shift(&self) -> f64 {
        -self.cell_height / 2.0
    }
}
