use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form used in markup.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// A temperature range mapped to one fill color. `upper` is exclusive;
/// `None` marks the catch-all bucket at the hot end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBucket {
    pub upper: Option<f64>,
    pub color: Rgb,
}

impl ColorBucket {
    const fn below(upper: f64, color: Rgb) -> Self {
        Self {
            upper: Some(upper),
            color,
        }
    }

    const fn rest(color: Rgb) -> Self {
        Self { upper: None, color }
    }

    pub fn admits(&self, temperature: f64) -> bool {
        self.upper.map_or(true, |upper| temperature < upper)
    }
}

/// Cold-to-hot diverging palette, checked in ascending order.
pub const COLOR_BUCKETS: [ColorBucket; 9] = [
    ColorBucket::below(3.9, Rgb::new(0x08, 0x30, 0x6b)),
    ColorBucket::below(5.0, Rgb::new(0x21, 0x71, 0xb5)),
    ColorBucket::below(6.1, Rgb::new(0x6b, 0xae, 0xd6)),
    ColorBucket::below(7.2, Rgb::new(0xc6, 0xdb, 0xef)),
    ColorBucket::below(8.3, Rgb::new(0xff, 0xff, 0xf0)),
    ColorBucket::below(9.5, Rgb::new(0xfc, 0xbb, 0xa1)),
    ColorBucket::below(10.6, Rgb::new(0xfb, 0x6a, 0x4a)),
    ColorBucket::below(11.7, Rgb::new(0xcb, 0x18, 0x1d)),
    ColorBucket::rest(Rgb::new(0x67, 0x00, 0x0d)),
];

/// Index of the first bucket whose exclusive upper bound exceeds `temperature`.
/// NaN falls through to the catch-all.
pub fn bucket_index(temperature: f64) -> usize {
    COLOR_BUCKETS
        .iter()
        .position(|bucket| bucket.admits(temperature))
        .unwrap_or(COLOR_BUCKETS.len() - 1)
}

pub fn color_of(temperature: f64) -> Rgb {
    COLOR_BUCKETS[bucket_index(temperature)].color
}

/// Inclusive lower bound of a bucket, i.e. the previous bucket's upper bound.
pub fn bucket_lower(index: usize) -> Option<f64> {
    index
        .checked_sub(1)
        .and_then(|previous| COLOR_BUCKETS.get(previous))
        .and_then(|bucket| bucket.upper)
}

pub fn bucket_label(index: usize) -> String {
    let upper = COLOR_BUCKETS.get(index).and_then(|bucket| bucket.upper);
    match (bucket_lower(index), upper) {
        (None, Some(upper)) => format!("< {upper:.1}"),
        (Some(lower), Some(upper)) => format!("{lower:.1}-{upper:.1}"),
        (Some(lower), None) => format!(">= {lower:.1}"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exclusive() {
        let bounds = [3.9, 5.0, 6.1, 7.2, 8.3, 9.5, 10.6, 11.7];
        for (index, bound) in bounds.iter().enumerate() {
            assert_eq!(bucket_index(*bound), index + 1, "bound {bound}");
            assert_eq!(bucket_index(bound - 1e-9), index, "just below {bound}");
        }
    }

    #[test]
    fn exact_boundary_colors() {
        assert_eq!(color_of(3.9).hex(), "#2171b5");
        assert_eq!(color_of(5.0).hex(), "#6baed6");
        assert_eq!(color_of(11.7).hex(), "#67000d");
        assert_eq!(color_of(-20.0).hex(), "#08306b");
    }

    #[test]
    fn colors_never_decrease_with_temperature() {
        let mut previous = 0;
        let mut temperature = -5.0;
        while temperature < 20.0 {
            let index = bucket_index(temperature);
            assert!(index >= previous, "{temperature} went back to bucket {index}");
            previous = index;
            temperature += 0.05;
        }
        assert_eq!(previous, COLOR_BUCKETS.len() - 1);
    }

    #[test]
    fn every_bucket_has_distinct_color() {
        for (i, a) in COLOR_BUCKETS.iter().enumerate() {
            for b in &COLOR_BUCKETS[i + 1..] {
                assert_ne!(a.color, b.color);
            }
        }
    }

    #[test]
    fn nan_lands_in_catch_all() {
        assert_eq!(bucket_index(f64::NAN), COLOR_BUCKETS.len() - 1);
    }

    #[test]
    fn labels_describe_ranges() {
        assert_eq!(bucket_label(0), "< 3.9");
        assert_eq!(bucket_label(3), "6.1-7.2");
        assert_eq!(bucket_label(8), ">= 11.7");
        assert_eq!(bucket_label(42), "");
    }
}
