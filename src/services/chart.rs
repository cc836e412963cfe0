use crate::backend::ChartSource;
use crate::domain::chart::ChartConfig;

/// Loads the dashboard series; fetch failures are logged and yield no chart.
pub fn load_chart<B>(backend: &B) -> Option<ChartConfig>
where
    B: ChartSource + ?Sized,
{
    match backend.chart_data() {
        Ok(data) => Some(ChartConfig::from(data)),
        Err(err) => {
            log::error!("Failed to fetch chart data: {err}");
            None
        }
    }
}
