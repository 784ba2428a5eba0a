//! # Audit Trail
//!
//! Ordered, append-only record of the notable steps of a calculation. The
//! recorder is threaded through the derivation by the pipeline; formulas
//! never touch it.
//!
//! ## Usage
//!
//! ```rust
//! use screen_core::trace::TraceRecorder;
//!
//! let mut trace = TraceRecorder::new();
//! trace.count("Rake count", 7);
//! trace.distance("Chain length", 5.6, 3);
//! trace.mass("Screen mass", 727.8313, 1);
//!
//! let entries = trace.into_entries();
//! assert_eq!(entries[1].text, "Chain length: 5.600 m");
//! assert_eq!(entries[2].index, 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::{Kilograms, Meters};

/// One formatted calculation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Position in computation order, starting at 1
    pub index: usize,
    /// Human-readable line naming the quantity and its value
    pub text: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.index, self.text)
    }
}

/// Collects trace entries for a single calculation run.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    entries: Vec<TraceEntry>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a free-form line
    pub fn record(&mut self, text: impl Into<String>) {
        let index = self.entries.len() + 1;
        self.entries.push(TraceEntry {
            index,
            text: text.into(),
        });
    }

    /// Record a size code, difference or item count (no decimals)
    pub fn count(&mut self, label: &str, value: impl Into<i64>) {
        self.record(format!("{}: {}", label, value.into()));
    }

    /// Record a distance in meters with the given number of decimals
    pub fn distance(&mut self, label: &str, meters: f64, decimals: usize) {
        self.record(format!("{}: {:.*}", label, decimals, Meters(meters)));
    }

    /// Record a mass in kilograms with the given number of decimals
    pub fn mass(&mut self, label: &str, kilograms: f64, decimals: usize) {
        self.record(format!("{}: {:.*}", label, decimals, Kilograms(kilograms)));
    }

    /// Get all recorded entries
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finish recording and hand the entries over
    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_insertion_order() {
        let mut trace = TraceRecorder::new();
        assert!(trace.is_empty());
        trace.count("Channel width size code", 10);
        trace.count("Width code difference", -1);
        trace.record("free text");
        let indices: Vec<usize> = trace.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn test_precision_formats() {
        let mut trace = TraceRecorder::new();
        trace.distance("Filter bar width", 0.0078, 4);
        trace.mass("Scraper bushing", 0.01, 2);
        trace.mass("Tray", 14.9175, 1);
        trace.count("Rake count", 7u32);
        let texts: Vec<&str> = trace.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Filter bar width: 0.0078 m",
                "Scraper bushing: 0.01 kg",
                "Tray: 14.9 kg",
                "Rake count: 7",
            ]
        );
    }

    #[test]
    fn test_entry_display_is_numbered() {
        let entry = TraceEntry {
            index: 4,
            text: "Rake count: 7".to_string(),
        };
        assert_eq!(entry.to_string(), "4. Rake count: 7");
    }
}
