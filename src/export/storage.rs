//! Temporal reduction of a property's samples per [`StoreValuesType`].

use std::collections::VecDeque;

use super::property::{ExportListProperty, StoreValuesType};

/// Accumulates samples for one element/property and reduces them according
/// to a storage policy.
#[derive(Debug, Clone)]
pub struct ValueStorage {
    store_values_type: StoreValuesType,
    window_size: usize,
    window: VecDeque<f64>,
    values: Vec<f64>,
    last: Option<f64>,
    change_count: u64,
    count: u64,
}

impl ValueStorage {
    /// `window_size` is only used by the moving-average policies and is
    /// clamped to at least 1.
    pub fn new(store_values_type: StoreValuesType, window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            store_values_type,
            window_size,
            window: VecDeque::with_capacity(window_size),
            values: Vec::new(),
            last: None,
            change_count: 0,
            count: 0,
        }
    }

    pub fn for_property(property: &ExportListProperty) -> Self {
        Self::new(property.store_values_type(), property.window_size())
    }

    pub fn store_values_type(&self) -> StoreValuesType {
        self.store_values_type
    }

    /// Number of samples pushed so far.
    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn push(&mut self, value: f64) {
        // Bitwise so a run of NaN samples is not a run of changes.
        let changed = self.last.is_some_and(|prev| prev.to_bits() != value.to_bits());
        if changed {
            self.change_count += 1;
        }

        match self.store_values_type {
            StoreValuesType::All => self.values.push(value),
            StoreValuesType::ChangesOnly => {
                if self.last.is_none() || changed {
                    self.values.push(value);
                }
            }
            StoreValuesType::First => {
                if self.values.is_empty() {
                    self.values.push(value);
                }
            }
            StoreValuesType::Last => self.replace(value),
            StoreValuesType::Max => self.reduce(value, f64::max),
            StoreValuesType::Min => self.reduce(value, f64::min),
            StoreValuesType::Sum => self.reduce(value, |acc, v| acc + v),
            StoreValuesType::MovingAverage => {
                let mean = self.slide(value);
                self.values.push(mean);
            }
            StoreValuesType::MovingAverageMax => {
                let mean = self.slide(value);
                self.reduce(mean, f64::max);
            }
            StoreValuesType::ChangeCount => {}
        }

        self.last = Some(value);
        self.count += 1;
    }

    /// Values to persist for the samples seen so far.
    ///
    /// Single-value policies return one element once a sample has been
    /// pushed; `ChangeCount` always returns the count.
    pub fn values(&self) -> Vec<f64> {
        match self.store_values_type {
            // Counts stay far below 2^53.
            StoreValuesType::ChangeCount => vec![self.change_count as f64],
            _ => self.values.clone(),
        }
    }

    fn replace(&mut self, value: f64) {
        self.values.clear();
        self.values.push(value);
    }

    fn reduce(&mut self, value: f64, op: impl Fn(f64, f64) -> f64) {
        match self.values.first_mut() {
            Some(acc) => *acc = op(*acc, value),
            None => self.values.push(value),
        }
    }

    /// Pushes `value` into the trailing window and returns the window mean.
    fn slide(&mut self, value: f64) -> f64 {
        if self.window.len() == self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(value);
        // Re-summed each step; a running sum keeps the rounding error of
        // samples that have already left the window.
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }
}
