use serde::{Deserialize, Serialize};

use crate::color::{bucket_index, bucket_label, COLOR_BUCKETS};
use crate::error::Result;

pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

pub const CHART_TITLE: &str = "Monthly Global Land-Surface Temperature";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub year: i32,
    pub month: u32,
    pub variance: f64,
}

impl TemperatureRecord {
    pub const fn new(year: i32, month: u32, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }

    /// Absolute temperature against the dataset's base temperature.
    pub fn temperature(&self, base_temperature: f64) -> f64 {
        base_temperature + self.variance
    }
}

/// The decoded JSON document:
/// `{ "baseTemperature": n, "monthlyVariance": [{ year, month, variance }] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "baseTemperature")]
    pub base_temperature: f64,
    #[serde(rename = "monthlyVariance")]
    pub records: Vec<TemperatureRecord>,
}

impl Dataset {
    pub const fn new(base_temperature: f64, records: Vec<TemperatureRecord>) -> Self {
        Self {
            base_temperature,
            records,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?.year;
        Some(self.records.iter().fold((first, first), |(lo, hi), record| {
            (lo.min(record.year), hi.max(record.year))
        }))
    }

    pub fn month_range(&self) -> Option<(u32, u32)> {
        let first = self.records.first()?.month;
        Some(self.records.iter().fold((first, first), |(lo, hi), record| {
            (lo.min(record.month), hi.max(record.month))
        }))
    }

    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        let first = self.records.first()?.temperature(self.base_temperature);
        Some(self.records.iter().fold((first, first), |(lo, hi), record| {
            let temperature = record.temperature(self.base_temperature);
            (lo.min(temperature), hi.max(temperature))
        }))
    }

    /// Subtitle shown under the chart title, e.g.
    /// `1753 - 2015: base temperature 8.66°C`.
    pub fn description(&self) -> Option<String> {
        let (first, last) = self.year_range()?;
        Some(format!(
            "{first} - {last}: base temperature {}°C",
            self.base_temperature
        ))
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut counts = [0_usize; COLOR_BUCKETS.len()];
        for record in &self.records {
            counts[bucket_index(record.temperature(self.base_temperature))] += 1;
        }

        let buckets = COLOR_BUCKETS
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(index, (bucket, count))| BucketCount {
                label: bucket_label(index),
                color: bucket.color.hex(),
                count,
            })
            .collect();

        let years = self.year_range();
        let temperatures = self.temperature_range();

        DatasetSummary {
            records: self.records.len(),
            first_year: years.map(|(first, _)| first),
            last_year: years.map(|(_, last)| last),
            base_temperature: self.base_temperature,
            coolest: temperatures.map(|(lo, _)| lo),
            warmest: temperatures.map(|(_, hi)| hi),
            buckets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub base_temperature: f64,
    pub coolest: Option<f64>,
    pub warmest: Option<f64>,
    pub buckets: Vec<BucketCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub label: String,
    pub color: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "baseTemperature": 8.66,
        "monthlyVariance": [
            { "year": 1753, "month": 1, "variance": -1.366 },
            { "year": 1753, "month": 2, "variance": -2.223 },
            { "year": 1754, "month": 12, "variance": 0.5 },
            { "year": 2015, "month": 9, "variance": 1.3 }
        ]
    }"#;

    #[test]
    fn decodes_the_remote_document_shape() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert!((dataset.base_temperature - 8.66).abs() < 1e-12);
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.records[2], TemperatureRecord::new(1754, 12, 0.5));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Dataset::from_json("{\"baseTemperature\": 8.66}").is_err());
        assert!(Dataset::from_slice(b"not json").is_err());
    }

    #[test]
    fn ranges_cover_exact_extremes() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.year_range(), Some((1753, 2015)));
        assert_eq!(dataset.month_range(), Some((1, 12)));
        let (lo, hi) = dataset.temperature_range().unwrap();
        assert!((lo - (8.66 - 2.223)).abs() < 1e-9);
        assert!((hi - (8.66 + 1.3)).abs() < 1e-9);
    }

    #[test]
    fn empty_dataset_has_no_ranges() {
        let dataset = Dataset::new(8.66, Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.year_range(), None);
        assert_eq!(dataset.description(), None);
        let summary = dataset.summary();
        assert_eq!(summary.records, 0);
        assert_eq!(summary.coolest, None);
        assert!(summary.buckets.iter().all(|bucket| bucket.count == 0));
    }

    #[test]
    fn description_uses_year_span() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(
            dataset.description().as_deref(),
            Some("1753 - 2015: base temperature 8.66°C")
        );
    }

    #[test]
    fn summary_counts_every_record_once() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let summary = dataset.summary();
        let total: usize = summary.buckets.iter().map(|bucket| bucket.count).sum();
        assert_eq!(total, dataset.len());
        assert_eq!(summary.first_year, Some(1753));
        assert_eq!(summary.last_year, Some(2015));
        // 8.66 - 2.223 = 6.437 -> 6.1..7.2
        assert_eq!(summary.buckets[3].count, 1);
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
