//! Dataset domain models.

pub mod model;

pub use model::{
    Analytics, AnalyticsMetadata, DatasetRef, EquipmentRecord, HistoryEntry, HistorySummary,
    ParameterAverages, Summary,
};
