use crate::color::Rgb;
use crate::tooltip::Tooltip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Position along the axis in surface coordinates.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisElement {
    pub id: &'static str,
    pub orientation: Orientation,
    pub translate: (f64, f64),
    /// Scale range covered by the domain line.
    pub extent: (f64, f64),
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub x: f64,
    pub y: f64,
    /// Degrees, applied about the surface origin like an SVG `rotate()`.
    pub rotation: f64,
    pub class: &'static str,
    pub text: String,
}

/// One rectangle per record. `x`/`y` are the scale outputs; the cell is
/// drawn shifted by `translate_y`.
#[derive(Debug, Clone, PartialEq)]
pub struct CellElement {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub translate_y: f64,
    pub fill: Rgb,
    pub year: i32,
    pub month: u32,
    pub temp: f64,
    pub variance: f64,
}

impl CellElement {
    pub fn top(&self) -> f64 {
        self.y + self.translate_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let top = self.top();
        x >= self.x && x < self.x + self.width && y >= top && y < top + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSwatch {
    pub x: f64,
    pub fill: Rgb,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendElement {
    pub id: &'static str,
    pub x: f64,
    pub y: f64,
    pub swatch_width: f64,
    pub swatch_height: f64,
    pub swatches: Vec<LegendSwatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Axis(AxisElement),
    Text(TextElement),
    Cell(CellElement),
    Legend(LegendElement),
}

/// Retained draw output of one render pass plus the hover tooltip.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    elements: Vec<Element>,
    tooltip: Option<Tooltip>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every element and the tooltip.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.tooltip = None;
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellElement> {
        self.elements.iter().filter_map(|element| match element {
            Element::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    pub fn cell(&self, index: usize) -> Option<&CellElement> {
        self.cells().find(|cell| cell.index == index)
    }

    pub fn axes(&self) -> impl Iterator<Item = &AxisElement> {
        self.elements.iter().filter_map(|element| match element {
            Element::Axis(axis) => Some(axis),
            _ => None,
        })
    }

    pub fn axis(&self, id: &str) -> Option<&AxisElement> {
        self.axes().find(|axis| axis.id == id)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn legend(&self) -> Option<&LegendElement> {
        self.elements.iter().find_map(|element| match element {
            Element::Legend(legend) => Some(legend),
            _ => None,
        })
    }

    /// Topmost cell under a surface point. Later cells paint over earlier
    /// ones, so the search runs back to front.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<usize> {
        self.elements.iter().rev().find_map(|element| match element {
            Element::Cell(cell) if cell.contains(x, y) => Some(cell.index),
            _ => None,
        })
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Replaces whatever tooltip exists with one for `index`. Returns false
    /// when no such cell was drawn.
    pub fn pointer_enter(&mut self, index: usize) -> bool {
        self.tooltip = None;
        let Some(cell) = self.cell(index) else {
            return false;
        };
        let tooltip = Tooltip::for_cell(cell);
        tracing::trace!(cell = index, heading = %tooltip.heading, "tooltip shown");
        self.tooltip = Some(tooltip);
        true
    }

    /// Hides the tooltip but keeps it around.
    pub fn pointer_leave(&mut self) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(index: usize, x: f64, year: i32) -> Element {
        Element::Cell(CellElement {
            index,
            x,
            y: 100.0,
            width: 10.0,
            height: 20.0,
            translate_y: -10.0,
            fill: Rgb::new(1, 2, 3),
            year,
            month: 3,
            temp: 9.0,
            variance: 0.34,
        })
    }

    fn surface() -> Surface {
        let mut surface = Surface::new();
        surface.push(cell(0, 0.0, 1900));
        surface.push(cell(1, 10.0, 1901));
        surface.push(cell(2, 5.0, 1902));
        surface
    }

    #[test]
    fn hit_test_honors_translate() {
        let surface = surface();
        assert_eq!(surface.cell_at(2.0, 91.0), Some(0));
        assert_eq!(surface.cell_at(2.0, 111.0), None);
        assert_eq!(surface.cell_at(2.0, 89.0), None);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let surface = surface();
        assert_eq!(surface.cell_at(7.0, 100.0), Some(2));
        assert_eq!(surface.cell_at(16.0, 100.0), Some(1));
    }

    #[test]
    fn second_hover_replaces_first_tooltip() {
        let mut surface = surface();
        assert!(surface.pointer_enter(0));
        assert!(surface.pointer_enter(1));
        let tooltip = surface.tooltip().unwrap();
        assert_eq!(tooltip.cell, 1);
        assert_eq!(tooltip.heading, "1901 - March");
        assert!(tooltip.visible);
    }

    #[test]
    fn leave_hides_without_removing() {
        let mut surface = surface();
        surface.pointer_enter(2);
        surface.pointer_leave();
        let tooltip = surface.tooltip().unwrap();
        assert!(!tooltip.visible);
        assert_eq!(tooltip.cell, 2);
    }

    #[test]
    fn enter_on_unknown_cell_drops_tooltip() {
        let mut surface = surface();
        surface.pointer_enter(0);
        assert!(!surface.pointer_enter(99));
        assert!(surface.tooltip().is_none());
    }

    #[test]
    fn clear_discards_elements_and_tooltip() {
        let mut surface = surface();
        surface.pointer_enter(0);
        surface.clear();
        assert!(surface.is_empty());
        assert!(surface.tooltip().is_none());
    }
}
