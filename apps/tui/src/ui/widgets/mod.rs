pub mod heatmap;
pub mod popup;
pub mod tooltip;
