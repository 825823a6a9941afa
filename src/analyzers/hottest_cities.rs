use crate::analyzers::MeanAccumulator;
use crate::models::ObservationTable;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMean {
    pub city: Arc<str>,
    pub mean_temperature: f64,
}

/// The `limit` cities with the highest mean temperature.
///
/// Sorted by mean descending; equal means are ordered by city name so the
/// result does not depend on row order.
pub fn top_hottest_cities(table: &ObservationTable, limit: usize) -> Vec<CityMean> {
    let mut by_city: HashMap<&Arc<str>, MeanAccumulator> = HashMap::new();
    for row in table {
        by_city.entry(&row.city).or_default().push(row.average_temperature);
    }

    let mut cities: Vec<CityMean> = by_city
        .into_iter()
        .filter_map(|(city, acc)| {
            acc.mean().map(|mean_temperature| CityMean {
                city: Arc::clone(city),
                mean_temperature,
            })
        })
        .collect();

    cities.sort_by(|a, b| {
        b.mean_temperature
            .total_cmp(&a.mean_temperature)
            .then_with(|| a.city.cmp(&b.city))
    });
    cities.truncate(limit);
    cities
}
