#[cfg(test)]
mod tests {
    use crate::dashboard::DashboardService;
    use crate::visualization::VisualizationController;
    use async_trait::async_trait;
    use chemviz_client::EquipmentApi;
    use chemviz_core::auth::{AuthState, User};
    use chemviz_core::dashboard::ActiveView;
    use chemviz_core::dataset::{
        Analytics, AnalyticsMetadata, DatasetRef, HistoryEntry, HistorySummary,
        ParameterAverages, Summary,
    };
    use chemviz_core::{ChemvizError, Result};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    fn summary(count: u64) -> Summary {
        Summary {
            averages: ParameterAverages {
                flowrate: 45.2,
                pressure: 12.5,
                temperature: 298.15,
            },
            type_distribution: HashMap::from([("Pump".to_string(), count)]),
            total_count: count,
        }
    }

    fn dataset(id: &str, count: u64) -> DatasetRef {
        DatasetRef {
            id: id.to_string(),
            filename: "equipment.csv".to_string(),
            record_count: count,
            summary: summary(count),
        }
    }

    fn analytics(filename: &str, count: u64) -> Analytics {
        Analytics {
            summary: summary(count),
            equipment_records: Vec::new(),
            metadata: AnalyticsMetadata {
                filename: filename.to_string(),
                record_count: count,
                upload_time: "2026-08-30T10:00:00Z".to_string(),
            },
        }
    }

    fn history_entry(id: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            filename: format!("{id}.csv"),
            record_count: 5,
            upload_time: "2026-08-30T10:00:00Z".to_string(),
            summary: HistorySummary {
                avg_flowrate: 45.2,
                avg_pressure: 12.5,
                avg_temperature: 298.15,
                type_distribution: HashMap::from([("Pump".to_string(), 5)]),
            },
        }
    }

    /// Mock API exercising the controllers without a network.
    #[derive(Default)]
    struct MockApi {
        /// Session probe result; `None` means no session (probe "fails").
        session_user: Mutex<Option<User>>,
        fail_logout: bool,
        /// Next upload outcome; `None` falls back to a ds1 default.
        upload_result: Mutex<Option<Result<DatasetRef>>>,
        analytics: Mutex<HashMap<String, Analytics>>,
        /// Ids whose analytics fetch reports an expired session.
        expired_ids: Mutex<HashSet<String>>,
        /// Ids whose analytics fetch blocks until notified, for ordering
        /// overlapping fetches deterministically.
        gates: Mutex<HashMap<String, Arc<Notify>>>,
        analytics_calls: Mutex<Vec<String>>,
        history_entries: Mutex<Vec<HistoryEntry>>,
        fail_delete: Mutex<HashSet<String>>,
        delete_calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn with_history(entries: Vec<HistoryEntry>) -> Arc<Self> {
            let api = Self::default();
            *api.history_entries.lock().unwrap() = entries;
            Arc::new(api)
        }

        fn put_analytics(&self, id: &str, value: Analytics) {
            self.analytics.lock().unwrap().insert(id.to_string(), value);
        }

        fn gate(&self, id: &str) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            self.gates
                .lock()
                .unwrap()
                .insert(id.to_string(), notify.clone());
            notify
        }
    }

    #[async_trait]
    impl EquipmentApi for MockApi {
        async fn login(&self, username: &str, password: &str) -> Result<User> {
            if password == "secret" {
                Ok(User {
                    id: 1,
                    username: username.to_string(),
                    email: None,
                })
            } else {
                // The server answers a bad login with 401 plus an error
                // body; the transport layer surfaces it as-is rather than
                // as an expired session.
                Err(ChemvizError::transport_status(401, "Invalid credentials"))
            }
        }

        async fn logout(&self) -> Result<()> {
            if self.fail_logout {
                Err(ChemvizError::transport("connection refused"))
            } else {
                Ok(())
            }
        }

        async fn current_user(&self) -> Result<User> {
            self.session_user
                .lock()
                .unwrap()
                .clone()
                .ok_or(ChemvizError::AuthExpired)
        }

        async fn upload_csv(&self, _filename: &str, _bytes: Vec<u8>) -> Result<DatasetRef> {
            match self.upload_result.lock().unwrap().take() {
                Some(result) => result,
                None => Ok(dataset("ds1", 12)),
            }
        }

        async fn analytics(&self, dataset_id: &str) -> Result<Analytics> {
            self.analytics_calls
                .lock()
                .unwrap()
                .push(dataset_id.to_string());

            let gate = self.gates.lock().unwrap().get(dataset_id).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if self.expired_ids.lock().unwrap().contains(dataset_id) {
                return Err(ChemvizError::AuthExpired);
            }
            self.analytics
                .lock()
                .unwrap()
                .get(dataset_id)
                .cloned()
                .ok_or_else(|| ChemvizError::transport_status(404, "Dataset not found"))
        }

        async fn history(&self) -> Result<Vec<HistoryEntry>> {
            Ok(self.history_entries.lock().unwrap().clone())
        }

        async fn delete_dataset(&self, dataset_id: &str) -> Result<()> {
            self.delete_calls
                .lock()
                .unwrap()
                .push(dataset_id.to_string());
            if self.fail_delete.lock().unwrap().contains(dataset_id) {
                Err(ChemvizError::transport_status(500, "Delete failed"))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_upload_switches_to_visualization_with_new_dataset() {
        let api = MockApi::new();
        let service = DashboardService::new(api);

        service
            .upload
            .select_file("equipment.csv", vec![b'x'; 4 * 1024])
            .await
            .unwrap();
        let dataset = service.perform_upload().await.unwrap();
        assert_eq!(dataset.id, "ds1");

        let state = service.state().await;
        assert_eq!(state.view, ActiveView::Visualization);
        assert_eq!(state.active_dataset_id(), Some("ds1"));

        // Pending-file state is cleared and the record count is surfaced
        assert!(service.upload.selected().await.is_none());
        let success = service.upload.success().await.unwrap();
        assert!(success.contains("12 records"), "{success}");
    }

    #[tokio::test]
    async fn test_rejected_file_never_reaches_the_network() {
        let api = MockApi::new();
        let service = DashboardService::new(api);

        let err = service
            .upload
            .select_file("notes.txt", vec![0u8; 128])
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.upload.error().await.unwrap(), "not a csv file");
        assert!(service.upload.selected().await.is_none());

        // Upload with nothing selected is refused locally too
        assert!(service.perform_upload().await.is_err());
        assert_eq!(service.state().await.view, ActiveView::Upload);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_candidate_for_retry() {
        let api = MockApi::new();
        *api.upload_result.lock().unwrap() = Some(Err(ChemvizError::transport_status(
            400,
            "CSV is missing the Flowrate column",
        )));
        let service = DashboardService::new(api);

        service
            .upload
            .select_file("equipment.csv", vec![b'x'; 64])
            .await
            .unwrap();
        assert!(service.perform_upload().await.is_err());

        // Still selected, server message surfaced, still on the upload view
        assert!(service.upload.selected().await.is_some());
        assert_eq!(
            service.upload.error().await.unwrap(),
            "CSV is missing the Flowrate column"
        );
        let state = service.state().await;
        assert_eq!(state.view, ActiveView::Upload);
        assert!(state.active_dataset.is_none());

        // Retry without reselecting succeeds
        assert!(service.perform_upload().await.is_ok());
        assert_eq!(service.state().await.view, ActiveView::Visualization);
    }

    #[tokio::test]
    async fn test_history_select_then_delete_inactive_entry() {
        let api = MockApi::with_history(vec![history_entry("ds1"), history_entry("ds2")]);
        let service = DashboardService::new(api.clone());

        service.refresh_history().await.unwrap();
        let selected = service.select_from_history("ds2").await.unwrap();
        assert_eq!(selected.id, "ds2");
        assert_eq!(service.state().await.view, ActiveView::Visualization);

        // Deleting a non-active dataset only trims the local list
        assert!(service.delete_dataset("ds1", true).await.unwrap());
        let ids: Vec<String> = service
            .history
            .entries()
            .await
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["ds2".to_string()]);

        let state = service.state().await;
        assert_eq!(state.active_dataset_id(), Some("ds2"));
        assert_eq!(state.view, ActiveView::Visualization);
    }

    #[tokio::test]
    async fn test_deleting_active_dataset_forces_history_view() {
        let api = MockApi::with_history(vec![history_entry("ds2")]);
        let service = DashboardService::new(api);

        service.refresh_history().await.unwrap();
        service.select_from_history("ds2").await.unwrap();

        assert!(service.delete_dataset("ds2", true).await.unwrap());
        let state = service.state().await;
        assert_eq!(state.view, ActiveView::History);
        assert!(state.active_dataset.is_none());
        assert!(service.visualization.rendered().await.is_none());
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_is_a_no_op() {
        let api = MockApi::with_history(vec![history_entry("ds1")]);
        let service = DashboardService::new(api.clone());
        service.refresh_history().await.unwrap();

        assert!(!service.delete_dataset("ds1", false).await.unwrap());
        assert!(api.delete_calls.lock().unwrap().is_empty());
        assert_eq!(service.history.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_unchanged() {
        let api = MockApi::with_history(vec![history_entry("ds1")]);
        api.fail_delete.lock().unwrap().insert("ds1".to_string());
        let service = DashboardService::new(api);
        service.refresh_history().await.unwrap();

        assert!(service.delete_dataset("ds1", true).await.is_err());
        assert_eq!(service.history.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_analytics_fetch_is_discarded() {
        let api = MockApi::new();
        api.put_analytics("dsY", analytics("y.csv", 3));
        api.put_analytics("dsX", analytics("x.csv", 7));
        let gate_x = api.gate("dsX");

        let viz = Arc::new(VisualizationController::new(
            api.clone() as Arc<dyn EquipmentApi>
        ));

        // Fetch A targets dsX and blocks inside the transport
        viz.set_dataset("dsX").await;
        let viz_a = viz.clone();
        let fetch_a = tokio::spawn(async move { viz_a.load("dsX").await });

        // Fetch B supersedes it and completes first
        viz.set_dataset("dsY").await;
        let rendered = viz.load("dsY").await.unwrap();
        assert_eq!(rendered.metadata.filename, "y.csv");

        // A resolves late: its result must be discarded, not rendered
        gate_x.notify_one();
        let result_a = fetch_a.await.unwrap();
        assert!(result_a.unwrap_err().is_stale());
        assert_eq!(
            viz.rendered().await.unwrap().metadata.filename,
            "y.csv"
        );
    }

    #[tokio::test]
    async fn test_reselection_of_same_dataset_refetches() {
        let api = MockApi::with_history(vec![history_entry("ds2")]);
        api.put_analytics("ds2", analytics("ds2.csv", 5));
        let service = DashboardService::new(api.clone());

        service.select_from_history("ds2").await.unwrap();
        service.load_analytics().await.unwrap();
        service.select_from_history("ds2").await.unwrap();
        service.load_analytics().await.unwrap();

        let calls = api.analytics_calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["ds2".to_string(), "ds2".to_string()]);
    }

    #[tokio::test]
    async fn test_analytics_failure_leaves_no_stale_chart() {
        let api = MockApi::new();
        api.put_analytics("ds1", analytics("equipment.csv", 12));
        let service = DashboardService::new(api.clone());

        service
            .upload
            .select_file("equipment.csv", vec![b'x'; 64])
            .await
            .unwrap();
        service.perform_upload().await.unwrap();
        service.load_analytics().await.unwrap();
        assert!(service.visualization.rendered().await.is_some());

        // Server loses the dataset; the re-fetch must clear the rendering
        api.analytics.lock().unwrap().remove("ds1");
        service.visualization.set_dataset("ds1").await;
        assert!(service.load_analytics().await.is_err());
        assert!(service.visualization.rendered().await.is_none());
    }

    #[tokio::test]
    async fn test_startup_probe_failure_resolves_anonymous() {
        let api = MockApi::new();
        let service = DashboardService::new(api);

        let resolved = service.start().await;
        assert_eq!(resolved, AuthState::Anonymous);
        assert_eq!(service.state().await.auth, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_startup_probe_restores_session() {
        let api = MockApi::new();
        *api.session_user.lock().unwrap() = Some(User {
            id: 1,
            username: "operator".to_string(),
            email: None,
        });
        let service = DashboardService::new(api);

        let resolved = service.start().await;
        assert!(resolved.is_authenticated());
        assert_eq!(
            service.state().await.user().map(|u| u.username.clone()),
            Some("operator".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_and_bad_credentials() {
        let api = MockApi::new();
        let service = DashboardService::new(api);

        let err = service.login("operator", "wrong").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!err.is_auth_expired());
        assert_eq!(service.state().await.auth, AuthState::Loading);

        service.login("operator", "secret").await.unwrap();
        assert!(service.state().await.auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_resets_even_when_server_call_fails() {
        let api = Arc::new(MockApi {
            fail_logout: true,
            ..MockApi::default()
        });
        let service = DashboardService::new(api);

        service.login("operator", "secret").await.unwrap();
        service
            .upload
            .select_file("equipment.csv", vec![b'x'; 64])
            .await
            .unwrap();
        service.perform_upload().await.unwrap();

        service.logout().await;
        let state = service.state().await;
        assert_eq!(state.auth, AuthState::Anonymous);
        assert_eq!(state.view, ActiveView::Upload);
        assert!(state.active_dataset.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_treated_as_logout() {
        let api = MockApi::new();
        api.expired_ids.lock().unwrap().insert("ds1".to_string());
        let service = DashboardService::new(api);

        service.login("operator", "secret").await.unwrap();
        service
            .upload
            .select_file("equipment.csv", vec![b'x'; 64])
            .await
            .unwrap();
        service.perform_upload().await.unwrap();

        let err = service.load_analytics().await.unwrap_err();
        assert!(err.is_auth_expired());

        let state = service.state().await;
        assert_eq!(state.auth, AuthState::Anonymous);
        assert_eq!(state.view, ActiveView::Upload);
        assert!(state.active_dataset.is_none());
    }
}
