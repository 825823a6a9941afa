use crate::analyzers::MeanAccumulator;
use crate::models::ObservationTable;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyMean {
    pub year: i32,
    pub mean_temperature: f64,
}

/// Mean temperature per year, ascending by year
pub fn yearly_trend(table: &ObservationTable) -> Vec<YearlyMean> {
    let mut by_year: BTreeMap<i32, MeanAccumulator> = BTreeMap::new();
    for row in table {
        by_year.entry(row.year).or_default().push(row.average_temperature);
    }

    by_year
        .into_iter()
        .filter_map(|(year, acc)| {
            acc.mean().map(|mean_temperature| YearlyMean {
                year,
                mean_temperature,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn obs(year: i32, month: u32, temp: f64) -> Observation {
        let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        Observation::new(date, temp, 0.0, 0.0, "City".into(), "Country".into())
    }

    #[test]
    fn test_yearly_mean() {
        let table = ObservationTable::new(vec![obs(2000, 1, 10.0), obs(2000, 7, 20.0)]);
        assert_eq!(
            yearly_trend(&table),
            vec![YearlyMean {
                year: 2000,
                mean_temperature: 15.0
            }]
        );
    }

    #[test]
    fn test_years_sorted_and_gaps_omitted() {
        let table = ObservationTable::new(vec![
            obs(1990, 1, 4.0),
            obs(1850, 1, 2.0),
            obs(1990, 2, 6.0),
        ]);

        let years: Vec<i32> = yearly_trend(&table).iter().map(|y| y.year).collect();
        assert_eq!(years, vec![1850, 1990]);
    }

    #[test]
    fn test_empty_table() {
        assert!(yearly_trend(&ObservationTable::default()).is_empty());
    }
}
