use crate::color::{bucket_label, color_of, COLOR_BUCKETS};
use crate::dataset::{month_name, Dataset};
use crate::layout::{
    ChartLayout, CANVAS_HEIGHT, CANVAS_WIDTH, MARGINS, X_TICK_COUNT, Y_TICK_COUNT,
};
use crate::scale::LinearScale;
use crate::surface::{
    AxisElement, CellElement, Element, LegendElement, LegendSwatch, Orientation, Surface, Tick,
    TextElement,
};

pub const X_AXIS_ID: &str = "x-axis";
pub const Y_AXIS_ID: &str = "y-axis";
pub const LEGEND_ID: &str = "legend";
pub const AXIS_LABEL_CLASS: &str = "axis-label";

const LEGEND_TOP: f64 = CANVAS_HEIGHT - MARGINS.bottom + 90.0;
const LEGEND_SWATCH_WIDTH: f64 = 40.0;
const LEGEND_SWATCH_HEIGHT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing to draw; the surface was left as it was.
    Skipped,
    Drawn { cells: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeatmapRenderer;

impl HeatmapRenderer {
    pub const fn new() -> Self {
        Self
    }

    /// Clears `surface` and draws the whole chart for `dataset`.
    ///
    /// An absent or empty dataset is a no-op: no scales are computed and
    /// the surface is not touched.
    pub fn render(&self, surface: &mut Surface, dataset: Option<&Dataset>) -> RenderOutcome {
        let Some(dataset) = dataset.filter(|dataset| !dataset.is_empty()) else {
            tracing::debug!("no dataset to render");
            return RenderOutcome::Skipped;
        };
        let Some(layout) = ChartLayout::compute(dataset) else {
            return RenderOutcome::Skipped;
        };

        surface.clear();

        surface.push(Element::Axis(x_axis(&layout.x_scale)));
        surface.push(Element::Text(TextElement {
            x: CANVAS_WIDTH / 2.0 + 10.0,
            y: CANVAS_HEIGHT - MARGINS.bottom + MARGINS.top,
            rotation: 0.0,
            class: AXIS_LABEL_CLASS,
            text: "Year".to_string(),
        }));

        surface.push(Element::Axis(y_axis(&layout.y_scale)));
        surface.push(Element::Text(TextElement {
            x: -(CANVAS_HEIGHT - MARGINS.bottom + MARGINS.top) / 2.0,
            y: MARGINS.left / 3.0,
            rotation: -90.0,
            class: AXIS_LABEL_CLASS,
            text: "Months".to_string(),
        }));

        let shift = layout.cell_shift();
        for (index, record) in dataset.records.iter().enumerate() {
            let (x, y) = layout.cell_origin(record);
            let temp = record.temperature(dataset.base_temperature);
            surface.push(Element::Cell(CellElement {
                index,
                x,
                y,
                width: layout.cell_width,
                height: layout.cell_height,
                translate_y: shift,
                fill: color_of(temp),
                year: record.year,
                month: record.month,
                temp,
                variance: record.variance,
            }));
        }

        surface.push(Element::Legend(legend()));

        let cells = dataset.len();
        tracing::debug!(cells, "heat map rendered");
        RenderOutcome::Drawn { cells }
    }
}

fn x_axis(scale: &LinearScale) -> AxisElement {
    let ticks = scale
        .ticks(X_TICK_COUNT)
        .into_iter()
        .map(|value| Tick {
            value,
            offset: scale.apply(value),
            label: format!("{value:.0}"),
        })
        .collect();

    AxisElement {
        id: X_AXIS_ID,
        orientation: Orientation::Bottom,
        translate: (0.0, CANVAS_HEIGHT - MARGINS.bottom),
        extent: scale.range(),
        ticks,
    }
}

fn y_axis(scale: &LinearScale) -> AxisElement {
    let ticks = scale
        .ticks(Y_TICK_COUNT)
        .into_iter()
        .map(|value| Tick {
            value,
            offset: scale.apply(value),
            label: month_label(value).to_string(),
        })
        .collect();

    AxisElement {
        id: Y_AXIS_ID,
        orientation: Orientation::Left,
        translate: (MARGINS.left, 0.0),
        extent: scale.range(),
        ticks,
    }
}

// Only whole-month ticks have a name; in-between ticks stay blank.
fn month_label(value: f64) -> &'static str {
    let month = value.round();
    if (value - month).abs() > 1e-9 || month < 1.0 {
        return "";
    }
    month_name(month as u32).unwrap_or_default()
}

fn legend() -> LegendElement {
    let swatches = COLOR_BUCKETS
        .iter()
        .enumerate()
        .map(|(index, bucket)| LegendSwatch {
            x: index as f64 * LEGEND_SWATCH_WIDTH,
            fill: bucket.color,
            label: bucket_label(index),
        })
        .collect();

    LegendElement {
        id: LEGEND_ID,
        x: MARGINS.left,
        y: LEGEND_TOP,
        swatch_width: LEGEND_SWATCH_WIDTH,
        swatch_height: LEGEND_SWATCH_HEIGHT,
        swatches,
    }
}
