//! Plain-text rendering of dashboard views for the terminal.

use crate::analyzers::{CityMean, MonthlyMean, TemperatureDistribution, YearlyMean};
use crate::models::Observation;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;
const NO_DATA: &str = "  (no observations match the current filter)\n";

fn bar(value: f64, min: f64, max: f64) -> String {
    let span = max - min;
    let filled = if span > 0.0 {
        (((value - min) / span) * (BAR_WIDTH - 1) as f64).round() as usize + 1
    } else {
        BAR_WIDTH
    };
    "#".repeat(filled.min(BAR_WIDTH))
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

pub fn render_yearly(trend: &[YearlyMean]) -> String {
    let mut out = String::from("Yearly Temperature Trend\n");
    if trend.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let (min, max) = bounds(trend.iter().map(|y| y.mean_temperature));
    for point in trend {
        let _ = writeln!(
            out,
            "  {:>5}  {:>7.2}°C  {}",
            point.year,
            point.mean_temperature,
            bar(point.mean_temperature, min, max)
        );
    }
    out
}

pub fn render_distribution(distribution: &TemperatureDistribution) -> String {
    let mut out = String::from("Temperature Distribution\n");
    if distribution.buckets.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let max_count = distribution.max_count() as f64;
    for bucket in &distribution.buckets {
        let _ = writeln!(
            out,
            "  [{:>7.2}, {:>7.2}]  {:>8}  {}",
            bucket.lower,
            bucket.upper,
            bucket.count,
            if bucket.count == 0 {
                String::new()
            } else {
                bar(bucket.count as f64, 0.0, max_count)
            }
        );
    }

    if let Some(peak) = distribution
        .density
        .iter()
        .max_by(|a, b| a.density.total_cmp(&b.density))
    {
        let _ = writeln!(
            out,
            "  Density peak at {:.2}°C (bandwidth {:.2})",
            peak.temperature,
            distribution.bandwidth.unwrap_or_default()
        );
    }
    out
}

pub fn render_cities(cities: &[CityMean]) -> String {
    let mut out = format!("Top {} Hottest Cities\n", cities.len());
    if cities.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let name_width = cities.iter().map(|c| c.city.chars().count()).max().unwrap_or(0);
    let (min, max) = bounds(cities.iter().map(|c| c.mean_temperature));
    for (rank, city) in cities.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<width$}  {:>7.2}°C  {}",
            rank + 1,
            city.city,
            city.mean_temperature,
            bar(city.mean_temperature, min, max),
            width = name_width
        );
    }
    out
}

pub fn render_monthly(trend: &[MonthlyMean]) -> String {
    let mut out = String::from("Average Monthly Temperature\n");
    if trend.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let (min, max) = bounds(trend.iter().map(|m| m.mean_temperature));
    for point in trend {
        let _ = writeln!(
            out,
            "  {}  {:>7.2}°C  {}",
            point.month_name(),
            point.mean_temperature,
            bar(point.mean_temperature, min, max)
        );
    }
    out
}

pub fn render_sample(rows: &[Observation]) -> String {
    let mut out = format!("Raw Data Sample ({} rows)\n", rows.len());
    if rows.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<10}  {:>8}  {:>8}  {:>8}  {:<20}  {:<20}",
        "dt", "AvgTemp", "Lat", "Lon", "City", "Country"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<10}  {:>8.3}  {:>8.2}  {:>8.2}  {:<20}  {:<20}",
            row.timestamp.to_string(),
            row.average_temperature,
            row.latitude,
            row.longitude,
            row.city,
            row.country
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::HistogramBucket;

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0.0, 0.0, 10.0).len(), 1);
        assert_eq!(bar(10.0, 0.0, 10.0).len(), BAR_WIDTH);
        assert_eq!(bar(5.0, 5.0, 5.0).len(), BAR_WIDTH);
    }

    #[test]
    fn test_empty_views_say_so() {
        assert!(render_yearly(&[]).contains("no observations"));
        assert!(render_monthly(&[]).contains("no observations"));
        assert!(render_cities(&[]).contains("no observations"));
        assert!(render_sample(&[]).contains("no observations"));
        let empty = TemperatureDistribution::default();
        assert!(render_distribution(&empty).contains("no observations"));
    }

    #[test]
    fn test_render_cities() {
        let cities = vec![
            CityMean {
                city: "Djibouti".into(),
                mean_temperature: 29.15,
            },
            CityMean {
                city: "Niamey".into(),
                mean_temperature: 29.03,
            },
        ];

        let text = render_cities(&cities);
        assert!(text.starts_with("Top 2 Hottest Cities"));
        assert!(text.contains(" 1. Djibouti"));
        assert!(text.contains("29.03°C"));
    }

    #[test]
    fn test_render_monthly_uses_month_names() {
        let trend = vec![MonthlyMean {
            month: 2,
            mean_temperature: -1.5,
        }];
        assert!(render_monthly(&trend).contains("Feb"));
    }

    #[test]
    fn test_render_distribution_buckets() {
        let distribution = TemperatureDistribution {
            buckets: vec![
                HistogramBucket {
                    lower: 0.0,
                    upper: 1.0,
                    count: 4,
                },
                HistogramBucket {
                    lower: 1.0,
                    upper: 2.0,
                    count: 0,
                },
            ],
            density: Vec::new(),
            total: 4,
            bandwidth: None,
        };

        let text = render_distribution(&distribution);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains(&"#".repeat(BAR_WIDTH)));
    }
}
