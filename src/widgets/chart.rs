//! Chart payloads
//!
//! Static configuration handed to the page's charting library. The shape
//! follows the Chart.js constructor argument.

use serde::Serialize;

/// Series colours, cycled when a dataset does not set one
pub const SERIES_COLORS: [&str; 6] = [
    "#4e73df", // Blue (primary)
    "#1cc88a", // Green
    "#36b9cc", // Cyan
    "#f6c23e", // Yellow
    "#e74a3b", // Red
    "#858796", // Gray
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
}

impl ChartKind {
    fn is_radial(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

/// One data series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

/// A single colour or one colour per data point (pie slices)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            background_color: None,
            border_color: None,
            fill: None,
            tension: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.background_color = Some(ColorSpec::Single(color.clone()));
        self.border_color = Some(color);
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn tension(mut self, tension: f64) -> Self {
        self.tension = Some(tension);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: serde_json::Value,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: serde_json::json!({ "legend": { "position": "bottom" } }),
        }
    }
}

/// Full constructor argument for one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, labels: Vec<String>) -> Self {
        Self {
            kind,
            data: ChartData {
                labels,
                datasets: Vec::new(),
            },
            options: ChartOptions::default(),
        }
    }

    pub fn line(labels: Vec<String>) -> Self {
        Self::new(ChartKind::Line, labels)
    }

    pub fn bar(labels: Vec<String>) -> Self {
        Self::new(ChartKind::Bar, labels)
    }

    pub fn doughnut(labels: Vec<String>) -> Self {
        Self::new(ChartKind::Doughnut, labels)
    }

    /// Add a dataset, assigning palette colours when it has none
    pub fn dataset(mut self, mut dataset: Dataset) -> Self {
        if dataset.background_color.is_none() {
            if self.kind.is_radial() {
                let colors = (0..dataset.data.len())
                    .map(|i| SERIES_COLORS[i % SERIES_COLORS.len()].to_string())
                    .collect();
                dataset.background_color = Some(ColorSpec::PerPoint(colors));
            } else {
                let idx = self.data.datasets.len();
                dataset = dataset.color(SERIES_COLORS[idx % SERIES_COLORS.len()]);
            }
        }
        self.data.datasets.push(dataset);
        self
    }

    /// Datasets whose length differs from the label count
    pub fn mismatched_datasets(&self) -> Vec<&str> {
        let expected = self.data.labels.len();
        self.data
            .datasets
            .iter()
            .filter(|d| d.data.len() != expected)
            .map(|d| d.label.as_str())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
