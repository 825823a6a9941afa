use crate::models::ObservationTable;
use crate::utils::constants::{
    DEFAULT_HISTOGRAM_BINS, DEFAULT_KDE_GRID_POINTS, DEFAULT_KDE_MAX_SAMPLES,
};
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy)]
pub struct DistributionOptions {
    pub bins: usize,
    pub kde_grid_points: usize,
    /// Larger inputs are thinned by striding before the density estimate
    pub kde_max_samples: usize,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            bins: DEFAULT_HISTOGRAM_BINS,
            kde_grid_points: DEFAULT_KDE_GRID_POINTS,
            kde_max_samples: DEFAULT_KDE_MAX_SAMPLES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub temperature: f64,
    pub density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemperatureDistribution {
    pub buckets: Vec<HistogramBucket>,
    pub density: Vec<DensityPoint>,
    pub total: usize,
    pub bandwidth: Option<f64>,
}

impl TemperatureDistribution {
    pub fn bin_width(&self) -> f64 {
        self.buckets
            .first()
            .map(|b| b.upper - b.lower)
            .unwrap_or(0.0)
    }

    /// Factor turning the density curve into expected counts per bucket
    pub fn count_scale(&self) -> f64 {
        self.total as f64 * self.bin_width()
    }

    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Equal-width histogram over [min, max] plus a Gaussian kernel density estimate.
///
/// An empty table yields no buckets. When every temperature is identical the
/// histogram collapses to a single bucket holding all rows and no density is
/// estimated.
pub fn temperature_distribution(
    table: &ObservationTable,
    options: &DistributionOptions,
) -> TemperatureDistribution {
    let values: Vec<f64> = table.temperatures().collect();
    let Some((min, max)) = value_range(&values) else {
        return TemperatureDistribution::default();
    };

    let bins = options.bins.max(1);
    let total = values.len();

    if min == max {
        return TemperatureDistribution {
            buckets: vec![HistogramBucket {
                lower: min,
                upper: max,
                count: total,
            }],
            density: Vec::new(),
            total,
            bandwidth: None,
        };
    }

    let edges = bucket_edges(min, max, bins);
    let mut counts = vec![0usize; bins];
    for &value in &values {
        counts[bucket_index(&edges, value)] += 1;
    }

    let buckets = counts
        .into_iter()
        .zip(edges.windows(2))
        .map(|(count, edge)| HistogramBucket {
            lower: edge[0],
            upper: edge[1],
            count,
        })
        .collect();

    let (density, bandwidth) = match kernel_density(&values, min, max, options) {
        Some((points, bw)) => (points, Some(bw)),
        None => (Vec::new(), None),
    };

    TemperatureDistribution {
        buckets,
        density,
        total,
        bandwidth,
    }
}

/// `bins + 1` ascending edges; the last one is exactly `max`
fn bucket_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let width = (max - min) / bins as f64;
    (0..bins)
        .map(|i| min + width * i as f64)
        .chain(std::iter::once(max))
        .collect()
}

/// Bucket holding `value`: `edges[i] <= value < edges[i + 1]`, except the
/// last bucket which is closed on the right so `max` lands inside it
fn bucket_index(edges: &[f64], value: f64) -> usize {
    let bins = edges.len() - 1;
    let width = edges[1] - edges[0];
    let mut idx = (((value - edges[0]) / width) as usize).min(bins - 1);

    // The division can round across an edge; settle on the reported edges
    while idx > 0 && value < edges[idx] {
        idx -= 1;
    }
    while idx + 1 < bins && value >= edges[idx + 1] {
        idx += 1;
    }
    idx
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Gaussian KDE with Scott's rule bandwidth, evaluated on an even grid
fn kernel_density(
    values: &[f64],
    min: f64,
    max: f64,
    options: &DistributionOptions,
) -> Option<(Vec<DensityPoint>, f64)> {
    let max_samples = options.kde_max_samples.max(2);
    let step = ((values.len() + max_samples - 1) / max_samples).max(1);
    let sample: Vec<f64> = values.iter().step_by(step).copied().collect();
    let n = sample.len();
    if n < 2 {
        return None;
    }

    let mean = sample.iter().sum::<f64>() / n as f64;
    let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev <= 0.0 || !std_dev.is_finite() {
        return None;
    }

    let bandwidth = std_dev * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * PI).sqrt());
    let grid_points = options.kde_grid_points.max(2);
    let spacing = (max - min) / (grid_points - 1) as f64;

    let points = (0..grid_points)
        .map(|i| {
            let x = min + spacing * i as f64;
            let sum: f64 = sample
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            DensityPoint {
                temperature: x,
                density: sum * norm,
            }
        })
        .collect();

    Some((points, bandwidth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use chrono::NaiveDate;

    fn table_of(temps: &[f64]) -> ObservationTable {
        let date = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        temps
            .iter()
            .map(|&t| Observation::new(date, t, 0.0, 0.0, "City".into(), "Country".into()))
            .collect()
    }

    #[test]
    fn test_fifty_equal_buckets() {
        let temps: Vec<f64> = (0..=100).map(|i| i as f64 * 0.5).collect();
        let dist = temperature_distribution(&table_of(&temps), &DistributionOptions::default());

        assert_eq!(dist.buckets.len(), 50);
        assert_eq!(dist.total, 101);
        assert_eq!(dist.buckets.iter().map(|b| b.count).sum::<usize>(), 101);
        assert!((dist.bin_width() - 1.0).abs() < 1e-9);
        assert_eq!(dist.buckets[0].lower, 0.0);
        assert_eq!(dist.buckets[49].upper, 50.0);
        // max value falls in the last bucket
        assert_eq!(dist.buckets[49].count, 3);
    }

    #[test]
    fn test_edge_values_land_in_their_own_bucket() {
        let ranges = (0..200).map(|i| (-0.026 * i as f64, 0.57 + 0.013 * i as f64));

        for (min, max) in ranges.chain([(-0.026, 0.57), (-12.7, 38.2)]) {
            let edges = bucket_edges(min, max, 50);
            let dist = temperature_distribution(&table_of(&edges), &DistributionOptions::default());

            for value in &edges {
                let idx = bucket_index(&edges, *value);
                let bucket = dist.buckets[idx];
                assert!(bucket.lower <= *value, "{} below bucket {}", value, idx);
                assert!(
                    *value < bucket.upper || idx == 49,
                    "{} above bucket {}",
                    value,
                    idx
                );
            }

            let counts: Vec<usize> = dist.buckets.iter().map(|b| b.count).collect();
            let mut expected = vec![1; 50];
            expected[49] = 2;
            assert_eq!(counts, expected, "range [{}, {}]", min, max);
        }
    }

    #[test]
    fn test_density_integrates_to_about_one() {
        let temps: Vec<f64> = (0..500).map(|i| ((i * 37) % 100) as f64 / 4.0).collect();
        let dist = temperature_distribution(&table_of(&temps), &DistributionOptions::default());

        assert_eq!(dist.density.len(), 200);
        assert!(dist.bandwidth.unwrap() > 0.0);

        let spacing = dist.density[1].temperature - dist.density[0].temperature;
        let area: f64 = dist.density.iter().map(|p| p.density * spacing).sum();
        // grid only spans [min, max], so tails are cut off
        assert!(area > 0.8 && area < 1.05, "area = {}", area);
    }

    #[test]
    fn test_single_value_collapses_to_one_bucket() {
        let options = DistributionOptions::default();
        let dist = temperature_distribution(&table_of(&[7.5, 7.5, 7.5]), &options);

        assert_eq!(
            dist.buckets,
            vec![HistogramBucket {
                lower: 7.5,
                upper: 7.5,
                count: 3
            }]
        );
        assert!(dist.density.is_empty());
        assert_eq!(dist.count_scale(), 0.0);
    }

    #[test]
    fn test_empty_table() {
        let options = DistributionOptions::default();
        let dist = temperature_distribution(&ObservationTable::default(), &options);
        assert!(dist.buckets.is_empty());
        assert!(dist.density.is_empty());
        assert_eq!(dist.total, 0);
        assert_eq!(dist.max_count(), 0);
    }

    #[test]
    fn test_large_input_is_thinned() {
        let temps: Vec<f64> = (0..1000).map(|i| (i % 40) as f64).collect();
        let options = DistributionOptions {
            kde_max_samples: 100,
            ..DistributionOptions::default()
        };

        let dist = temperature_distribution(&table_of(&temps), &options);
        assert_eq!(dist.total, 1000);
        assert!(!dist.density.is_empty());
    }
}
