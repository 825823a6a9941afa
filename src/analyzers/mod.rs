pub mod distribution;
pub mod hottest_cities;
pub mod monthly_trend;
pub mod summary;
pub mod yearly_trend;

pub use distribution::{
    temperature_distribution, DensityPoint, HistogramBucket, TemperatureDistribution,
};
pub use hottest_cities::{top_hottest_cities, CityMean};
pub use monthly_trend::{monthly_trend, MonthlyMean};
pub use summary::{summarize, DashboardSummary};
pub use yearly_trend::{yearly_trend, YearlyMean};

/// Running sum/count pair for grouped means.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub(crate) fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub(crate) fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}
