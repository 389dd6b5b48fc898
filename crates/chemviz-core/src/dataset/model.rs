//! Dataset domain model.
//!
//! This module contains the core entities the client works with: the
//! reference to an uploaded dataset, its aggregate summary, and the
//! analytics detail returned by the server. Parsing and aggregation happen
//! server-side; everything here is an immutable snapshot of server state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference to a dataset held on the server.
///
/// Identity is `id`: server-assigned, opaque, unique. Filenames are not
/// unique (two uploads of the same file may coexist in history), so nothing
/// in the client keys on `filename`. A `DatasetRef` is never mutated after
/// creation; replacing the active dataset means adopting a new reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Server-assigned opaque identifier
    pub id: String,
    /// Original filename of the uploaded CSV
    pub filename: String,
    /// Number of equipment records the server parsed out of the file
    pub record_count: u64,
    /// Aggregate statistics computed server-side
    pub summary: Summary,
}

/// Population means of the three numeric equipment parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAverages {
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Aggregate statistics for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub averages: ParameterAverages,
    /// Count per equipment-type label. Keys unique, order irrelevant.
    pub type_distribution: HashMap<String, u64>,
    pub total_count: u64,
}

impl Summary {
    /// Checks the summary invariant: `total_count` equals the sum of the
    /// type distribution counts.
    pub fn is_consistent(&self) -> bool {
        self.total_count == self.type_distribution.values().sum::<u64>()
    }
}

/// One row of the uploaded CSV, as parsed by the server.
///
/// Belongs to exactly one dataset, immutable, never created or edited
/// client-side. All numeric fields are finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub equipment_name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Per-dataset metadata returned with the analytics detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsMetadata {
    pub filename: String,
    pub record_count: u64,
    /// Upload timestamp (RFC 3339 string, rendered as-is)
    pub upload_time: String,
}

/// Full analytics detail for one dataset, as served by `GET /analytics/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub summary: Summary,
    pub equipment_records: Vec<EquipmentRecord>,
    pub metadata: AnalyticsMetadata,
}

/// The flattened summary shape the history endpoint uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    pub type_distribution: HashMap<String, u64>,
}

/// One entry of the bounded history list (`GET /history/`).
///
/// Each entry already carries its own summary, so selecting one needs no
/// extra fetch before it can become the active dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub filename: String,
    pub record_count: u64,
    /// Upload timestamp (RFC 3339 string)
    pub upload_time: String,
    pub summary: HistorySummary,
}

impl HistoryEntry {
    /// Converts a history entry into a dataset reference.
    ///
    /// The history endpoint flattens the averages; this restores the nested
    /// shape the rest of the client works with. `total_count` is derived
    /// from the type distribution, which the summary invariant guarantees
    /// matches the server-side record count of aggregated rows.
    pub fn to_dataset_ref(&self) -> DatasetRef {
        let total_count = self.summary.type_distribution.values().sum();
        DatasetRef {
            id: self.id.clone(),
            filename: self.filename.clone(),
            record_count: self.record_count,
            summary: Summary {
                averages: ParameterAverages {
                    flowrate: self.summary.avg_flowrate,
                    pressure: self.summary.avg_pressure,
                    temperature: self.summary.avg_temperature,
                },
                type_distribution: self.summary.type_distribution.clone(),
                total_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_distribution() -> HashMap<String, u64> {
        HashMap::from([("Pump".to_string(), 3), ("Valve".to_string(), 2)])
    }

    #[test]
    fn test_summary_consistency() {
        let summary = Summary {
            averages: ParameterAverages {
                flowrate: 45.2,
                pressure: 12.5,
                temperature: 298.15,
            },
            type_distribution: sample_distribution(),
            total_count: 5,
        };
        assert!(summary.is_consistent());

        let broken = Summary {
            total_count: 7,
            ..summary
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_history_entry_to_dataset_ref() {
        let entry = HistoryEntry {
            id: "ds2".to_string(),
            filename: "equipment.csv".to_string(),
            record_count: 5,
            upload_time: "2026-08-30T10:00:00Z".to_string(),
            summary: HistorySummary {
                avg_flowrate: 45.2,
                avg_pressure: 12.5,
                avg_temperature: 298.15,
                type_distribution: sample_distribution(),
            },
        };

        let dataset = entry.to_dataset_ref();
        assert_eq!(dataset.id, "ds2");
        assert_eq!(dataset.record_count, 5);
        assert_eq!(dataset.summary.averages.pressure, 12.5);
        assert_eq!(dataset.summary.total_count, 5);
        assert!(dataset.summary.is_consistent());
    }

    #[test]
    fn test_analytics_deserializes_wire_shape() {
        let json = r#"{
            "summary": {
                "averages": {"flowrate": 22.6, "pressure": 13.85, "temperature": 296.57},
                "type_distribution": {"Pump": 1, "Valve": 1},
                "total_count": 2
            },
            "equipment_records": [
                {"equipment_name": "Pump-001", "equipment_type": "Pump",
                 "flowrate": 45.2, "pressure": 12.5, "temperature": 298.15},
                {"equipment_name": "Valve-001", "equipment_type": "Valve",
                 "flowrate": 0.0, "pressure": 15.2, "temperature": 295.0}
            ],
            "metadata": {"filename": "equipment.csv", "record_count": 2,
                         "upload_time": "2026-08-30T10:00:00Z"}
        }"#;

        let analytics: Analytics = serde_json::from_str(json).unwrap();
        assert_eq!(analytics.equipment_records.len(), 2);
        assert_eq!(analytics.metadata.filename, "equipment.csv");
        assert!(analytics.summary.is_consistent());
    }
}
