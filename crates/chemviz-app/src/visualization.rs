//! Visualization controller.
//!
//! Fetches analytics for the dataset it is pointed at and keeps the last
//! committed result. Overlapping fetches are resolved with an
//! identity-stamped discard check: a completed fetch is committed only if
//! its target id still equals the controller's current id, so a superseded
//! fetch that arrives late can never overwrite the current view state.

use chemviz_client::EquipmentApi;
use chemviz_core::dataset::{Analytics, Summary};
use chemviz_core::{ChemvizError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The two mutually exclusive chart views, both driven by the same fetched
/// summary. Rendering itself is outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    /// Bar chart of the three parameter averages.
    #[default]
    Averages,
    /// Pie chart of the equipment-type distribution.
    Distribution,
}

pub struct VisualizationController {
    api: Arc<dyn EquipmentApi>,
    /// Id of the dataset the view is currently pointed at.
    current: RwLock<Option<String>>,
    /// Last committed analytics. Cleared on re-pointing and on fetch
    /// failure so no stale chart stays rendered.
    rendered: RwLock<Option<Analytics>>,
    chart: RwLock<ChartKind>,
}

impl VisualizationController {
    pub fn new(api: Arc<dyn EquipmentApi>) -> Self {
        Self {
            api,
            current: RwLock::new(None),
            rendered: RwLock::new(None),
            chart: RwLock::new(ChartKind::default()),
        }
    }

    /// Points the view at a dataset. Clears whatever was rendered, since
    /// the new fetch has not completed yet. Re-pointing at the same id is
    /// deliberate: it still triggers a fresh fetch to tolerate server-side
    /// data changes.
    pub async fn set_dataset(&self, dataset_id: &str) {
        *self.current.write().await = Some(dataset_id.to_string());
        *self.rendered.write().await = None;
    }

    /// Clears the view entirely (active dataset gone).
    pub async fn clear(&self) {
        *self.current.write().await = None;
        *self.rendered.write().await = None;
    }

    /// Fetches analytics for `dataset_id` and commits the result if the
    /// view is still pointed at that id on completion.
    ///
    /// A fetch that completes for a no-longer-current id returns
    /// [`ChemvizError::StaleResult`] and leaves the rendered state of the
    /// fetch that superseded it untouched. A failed fetch for the current
    /// id surfaces the error with nothing rendered.
    pub async fn load(&self, dataset_id: &str) -> Result<Analytics> {
        let result = self.api.analytics(dataset_id).await;

        // Discard-on-mismatch: the target may have changed while the fetch
        // was in flight.
        let current = self.current.read().await.clone();
        if current.as_deref() != Some(dataset_id) {
            tracing::debug!(
                "Discarding analytics for superseded dataset {} (current: {:?})",
                dataset_id,
                current
            );
            return Err(ChemvizError::stale(dataset_id));
        }

        match result {
            Ok(analytics) => {
                *self.rendered.write().await = Some(analytics.clone());
                Ok(analytics)
            }
            Err(e) => {
                *self.rendered.write().await = None;
                Err(e)
            }
        }
    }

    /// The last committed analytics, if any.
    pub async fn rendered(&self) -> Option<Analytics> {
        self.rendered.read().await.clone()
    }

    /// The chart currently toggled on.
    pub async fn chart(&self) -> ChartKind {
        *self.chart.read().await
    }

    /// Toggles between the two chart views.
    pub async fn set_chart(&self, kind: ChartKind) {
        *self.chart.write().await = kind;
    }
}

/// Series for the averages bar chart: one (label, value) pair per parameter.
pub fn averages_series(summary: &Summary) -> Vec<(String, f64)> {
    vec![
        ("Flowrate".to_string(), summary.averages.flowrate),
        ("Pressure".to_string(), summary.averages.pressure),
        ("Temperature".to_string(), summary.averages.temperature),
    ]
}

/// Series for the type-distribution pie chart, sorted by label for stable
/// output (the mapping itself is unordered).
pub fn distribution_series(summary: &Summary) -> Vec<(String, u64)> {
    let mut series: Vec<(String, u64)> = summary
        .type_distribution
        .iter()
        .map(|(label, count)| (label.clone(), *count))
        .collect();
    series.sort_by(|a, b| a.0.cmp(&b.0));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemviz_core::dataset::ParameterAverages;
    use std::collections::HashMap;

    fn summary() -> Summary {
        Summary {
            averages: ParameterAverages {
                flowrate: 22.6,
                pressure: 13.85,
                temperature: 296.57,
            },
            type_distribution: HashMap::from([
                ("Valve".to_string(), 2),
                ("Pump".to_string(), 3),
            ]),
            total_count: 5,
        }
    }

    #[test]
    fn test_averages_series_order() {
        let series = averages_series(&summary());
        let labels: Vec<&str> = series.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Flowrate", "Pressure", "Temperature"]);
        assert_eq!(series[1].1, 13.85);
    }

    #[test]
    fn test_distribution_series_sorted_by_label() {
        let series = distribution_series(&summary());
        assert_eq!(
            series,
            vec![("Pump".to_string(), 3), ("Valve".to_string(), 2)]
        );
    }
}
