use std::fmt::Write;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::render::{HeatmapRenderer, RenderOutcome};
use crate::surface::{AxisElement, CellElement, Element, LegendElement, Orientation, Surface, TextElement};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Serializes the drawn surface as a standalone SVG document. Cells keep
/// their `data-*` attributes and the axis groups keep their ids.
pub fn render_svg(surface: &Surface) -> Result<String> {
    let mut svg = String::with_capacity(256 + surface.elements().len() * 192);

    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}">"#
    )?;
    for element in surface.elements() {
        match element {
            Element::Axis(axis) => write_axis(&mut svg, axis)?,
            Element::Text(text) => write_text(&mut svg, text)?,
            Element::Cell(cell) => write_cell(&mut svg, cell)?,
            Element::Legend(legend) => write_legend(&mut svg, legend)?,
        }
    }
    svg.push_str("</svg>\n");

    Ok(svg)
}

/// Renders `dataset` onto a fresh surface and serializes it.
pub fn render_dataset_svg(dataset: &Dataset) -> Result<String> {
    let mut surface = Surface::new();
    match HeatmapRenderer::new().render(&mut surface, Some(dataset)) {
        RenderOutcome::Skipped => Err(Error::EmptyDataset),
        RenderOutcome::Drawn { .. } => render_svg(&surface),
    }
}

fn write_axis(svg: &mut String, axis: &AxisElement) -> std::fmt::Result {
    let (tx, ty) = axis.translate;
    let (r0, r1) = axis.extent;
    let anchor = match axis.orientation {
        Orientation::Bottom => "middle",
        Orientation::Left => "end",
    };

    writeln!(
        svg,
        r#"<g id="{}" transform="translate({tx},{ty})" fill="none" font-size="10" font-family="sans-serif" text-anchor="{anchor}">"#,
        axis.id
    )?;

    match axis.orientation {
        Orientation::Bottom => writeln!(
            svg,
            r#"<path class="domain" stroke="currentColor" d="M{r0},{TICK_SIZE}V0H{r1}V{TICK_SIZE}"/>"#
        )?,
        Orientation::Left => writeln!(
            svg,
            r#"<path class="domain" stroke="currentColor" d="M-{TICK_SIZE},{r0}H0V{r1}H-{TICK_SIZE}"/>"#
        )?,
    }

    for tick in &axis.ticks {
        let label = escape(&tick.label);
        match axis.orientation {
            Orientation::Bottom => writeln!(
                svg,
                r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="{TICK_SIZE}"/><text fill="currentColor" y="{}" dy="0.71em">{label}</text></g>"#,
                tick.offset,
                TICK_SIZE + TICK_PADDING
            )?,
            Orientation::Left => writeln!(
                svg,
                r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="-{TICK_SIZE}"/><text fill="currentColor" x="-{}" dy="0.32em">{label}</text></g>"#,
                tick.offset,
                TICK_SIZE + TICK_PADDING
            )?,
        }
    }

    svg.push_str("</g>\n");
    Ok(())
}

fn write_text(svg: &mut String, text: &TextElement) -> std::fmt::Result {
    write!(
        svg,
        r#"<text x="{}" y="{}" class="{}""#,
        text.x, text.y, text.class
    )?;
    if text.rotation != 0.0 {
        write!(svg, r#" transform="rotate({})""#, text.rotation)?;
    }
    writeln!(svg, ">{}</text>", escape(&text.text))
}

fn write_cell(svg: &mut String, cell: &CellElement) -> std::fmt::Result {
    writeln!(
        svg,
        r#"<rect class="cell" x="{}" y="{}" width="{}" height="{}" transform="translate(0, {})" data-month="{}" data-year="{}" data-temp="{}" data-index="{}" style="fill: {}"/>"#,
        cell.x,
        cell.y,
        cell.width,
        cell.height,
        cell.translate_y,
        cell.month,
        cell.year,
        cell.temp,
        cell.index,
        cell.fill
    )
}

fn write_legend(svg: &mut String, legend: &LegendElement) -> std::fmt::Result {
    writeln!(
        svg,
        r#"<g id="{}" transform="translate({},{})" font-size="10" font-family="sans-serif" text-anchor="middle">"#,
        legend.id, legend.x, legend.y
    )?;
    for swatch in &legend.swatches {
        writeln!(
            svg,
            r#"<rect x="{}" y="0" width="{}" height="{}" fill="{}" stroke="currentColor"/><text x="{}" y="{}">{}</text>"#,
            swatch.x,
            legend.swatch_width,
            legend.swatch_height,
            swatch.fill,
            swatch.x + legend.swatch_width / 2.0,
            legend.swatch_height + 14.0,
            escape(&swatch.label)
        )?;
    }
    svg.push_str("</g>\n");
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TemperatureRecord;

    fn dataset() -> Dataset {
        Dataset::new(
            8.66,
            vec![
                TemperatureRecord::new(1753, 1, -1.8),
                TemperatureRecord::new(1753, 2, 0.2),
                TemperatureRecord::new(1754, 1, 3.5),
            ],
        )
    }

    #[test]
    fn markup_exposes_test_hooks() {
        let svg = render_dataset_svg(&dataset()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"id="x-axis""#));
        assert!(svg.contains(r#"id="y-axis""#));
        assert!(svg.contains(r#"id="legend""#));
        assert_eq!(svg.matches(r#"class="cell""#).count(), 3);
        assert!(svg.contains(r#"data-year="1753""#));
        assert!(svg.contains(r#"data-month="2""#));
        assert!(svg.contains(r#"style="fill: #c6dbef""#));
        assert!(svg.contains(r#"transform="rotate(-90)">Months</text>"#));
    }

    #[test]
    fn data_temp_is_absolute_temperature() {
        let svg = render_dataset_svg(&dataset()).unwrap();
        let temp = 8.66_f64 + 3.5;
        assert!(svg.contains(&format!(r#"data-temp="{temp}""#)));
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let empty = Dataset::new(8.66, Vec::new());
        assert!(matches!(render_dataset_svg(&empty), Err(Error::EmptyDataset)));
    }

    #[test]
    fn blank_surface_is_an_empty_document() {
        let svg = render_svg(&Surface::new()).unwrap();
        assert_eq!(svg.lines().count(), 2);
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }
}
