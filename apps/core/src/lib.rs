// Heat map core: dataset model, scales, color buckets, layout and the
// retained drawing surface shared by the terminal and web front ends.

pub mod color;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod render;
pub mod scale;
pub mod surface;
pub mod svg;
pub mod tooltip;

pub use color::{bucket_index, color_of, ColorBucket, Rgb, COLOR_BUCKETS};
pub use dataset::{
    month_name, Dataset, DatasetSummary, TemperatureRecord, CHART_TITLE, DATASET_URL, MONTH_NAMES,
};
pub use error::{Error, Result};
pub use layout::ChartLayout;
pub use render::{HeatmapRenderer, RenderOutcome};
pub use scale::LinearScale;
pub use surface::{Element, Surface};
pub use tooltip::Tooltip;
