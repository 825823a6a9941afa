use crate::analyzers::MeanAccumulator;
use crate::models::ObservationTable;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub month: u32,
    pub mean_temperature: f64,
}

impl MonthlyMean {
    pub fn month_name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        NAMES
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("???")
    }
}

/// Mean temperature per calendar month (1-12); months without rows are omitted
pub fn monthly_trend(table: &ObservationTable) -> Vec<MonthlyMean> {
    let mut by_month = [MeanAccumulator::default(); 12];
    for row in table {
        if let Some(acc) = by_month.get_mut(row.month.wrapping_sub(1) as usize) {
            acc.push(row.average_temperature);
        }
    }

    by_month
        .iter()
        .zip(1u32..)
        .filter_map(|(acc, month)| {
            acc.mean().map(|mean_temperature| MonthlyMean {
                month,
                mean_temperature,
            })
        })
        .collect()
}
