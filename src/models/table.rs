use crate::models::Observation;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// The cleaned observation table.
///
/// Rows are only reachable through shared references; deriving a subset
/// always produces a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.rows.iter()
    }

    /// First `n` rows in source order
    pub fn head(&self, n: usize) -> &[Observation] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// New table holding the rows accepted by `predicate`, order preserved
    pub fn select<F>(&self, mut predicate: F) -> ObservationTable
    where
        F: FnMut(&Observation) -> bool,
    {
        self.rows
            .iter()
            .filter(|row| predicate(*row))
            .cloned()
            .collect()
    }

    /// Smallest and largest observed year
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let mut years = self.rows.iter().map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Distinct country names, sorted
    pub fn countries(&self) -> Vec<Arc<str>> {
        self.rows
            .iter()
            .map(|r| Arc::clone(&r.country))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn distinct_cities(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.city.as_ref())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.average_temperature)
    }
}

impl FromIterator<Observation> for ObservationTable {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObservationTable {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
