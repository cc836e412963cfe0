use serde::{Deserialize, Serialize};

const DATASET_LABEL: &str = "# Atendimentos";

const DATASET_COLORS: [&str; 4] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
];

/// Raw series returned by the dashboard chart endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
    pub fill: bool,
}

/// Bar chart configuration handed to the charting widget.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub begin_at_zero: bool,
    pub show_legend: bool,
    pub point_radius: u32,
}

impl From<ChartData> for ChartConfig {
    fn from(series: ChartData) -> Self {
        let colors: Vec<String> = DATASET_COLORS.iter().map(|c| c.to_string()).collect();
        Self {
            chart_type: "bar".to_string(),
            labels: series.labels,
            datasets: vec![ChartDataset {
                label: DATASET_LABEL.to_string(),
                data: series.data,
                background_color: colors.clone(),
                border_color: colors,
                border_width: 1,
                fill: false,
            }],
            begin_at_zero: true,
            show_legend: true,
            point_radius: 0,
        }
    }
}
