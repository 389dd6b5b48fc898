//! HTTP implementation of [`EquipmentApi`] over `reqwest`.

use async_trait::async_trait;
use chemviz_core::auth::User;
use chemviz_core::config::ClientConfig;
use chemviz_core::dataset::{Analytics, DatasetRef, HistoryEntry, Summary};
use chemviz_core::{ChemvizError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::api::EquipmentApi;

/// REST client for the Chemviz server.
///
/// Holds a cookie store so the Django session cookie established by login is
/// sent with every subsequent call.
#[derive(Debug, Clone)]
pub struct HttpEquipmentApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, serde::Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    dataset_id: String,
    filename: String,
    record_count: u64,
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    datasets: Vec<HistoryEntry>,
}

/// Conventional error body on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpEquipmentApi {
    /// Creates a client from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChemvizError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the response status of an authenticated call, extracting the
    /// server's `{error}` body on failure. Unauthorized and forbidden map to
    /// `AuthExpired`.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ChemvizError::AuthExpired);
        }
        Err(Self::error_from_body(response).await)
    }

    /// Checks the login response. The server answers a bad login with 401
    /// and an `{error}` body; that is not an expired session, so the body is
    /// surfaced as-is instead of mapping to `AuthExpired`.
    async fn check_login(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(Self::error_from_body(response).await)
    }

    async fn error_from_body(response: Response) -> ChemvizError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("server returned {status}"),
        };
        ChemvizError::transport_status(status.as_u16(), message)
    }
}

fn transport_err(err: reqwest::Error) -> ChemvizError {
    ChemvizError::transport(err.to_string())
}

fn decode_err(err: reqwest::Error) -> ChemvizError {
    ChemvizError::Serialization {
        format: "JSON".to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl EquipmentApi for HttpEquipmentApi {
    async fn login(&self, username: &str, password: &str) -> Result<User> {
        let response = self
            .client
            .post(self.url("/auth/login/"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(transport_err)?;

        let body: UserResponse = Self::check_login(response)
            .await?
            .json()
            .await
            .map_err(decode_err)?;
        Ok(body.user)
    }

    async fn logout(&self) -> Result<()> {
        let response = self
            .client
            .post(self.url("/auth/logout/"))
            .send()
            .await
            .map_err(transport_err)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<User> {
        let response = self
            .client
            .get(self.url("/auth/user/"))
            .send()
            .await
            .map_err(transport_err)?;

        let body: UserResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(decode_err)?;
        Ok(body.user)
    }

    async fn upload_csv(&self, filename: &str, bytes: Vec<u8>) -> Result<DatasetRef> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| ChemvizError::internal(format!("invalid upload part: {e}")))?;
        let form = Form::new().part("file", part);

        tracing::info!("Uploading '{}' to {}", filename, self.url("/upload/"));
        let response = self
            .client
            .post(self.url("/upload/"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_err)?;

        let body: UploadResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(decode_err)?;

        tracing::info!(
            "Upload of '{}' created dataset {} ({} records)",
            body.filename,
            body.dataset_id,
            body.record_count
        );

        Ok(DatasetRef {
            id: body.dataset_id,
            filename: body.filename,
            record_count: body.record_count,
            summary: body.summary,
        })
    }

    async fn analytics(&self, dataset_id: &str) -> Result<Analytics> {
        let response = self
            .client
            .get(self.url(&format!("/analytics/{dataset_id}/")))
            .send()
            .await
            .map_err(transport_err)?;

        Self::check(response).await?.json().await.map_err(decode_err)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.url("/history/"))
            .send()
            .await
            .map_err(transport_err)?;

        let body: HistoryResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(decode_err)?;
        Ok(body.datasets)
    }

    async fn delete_dataset(&self, dataset_id: &str) -> Result<()> {
        tracing::info!("Deleting dataset {}", dataset_id);
        let response = self
            .client
            .delete(self.url(&format!("/datasets/{dataset_id}/")))
            .send()
            .await
            .map_err(transport_err)?;
        Self::check(response).await?;
        Ok(())
    }
}
