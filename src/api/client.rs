//! reqwest-backed implementation of [`MonitorApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::MonitorApi;
use crate::error::{DashboardError, Result};
use crate::state::{MonitorStats, NewSite, StatusRecord};

/// Acknowledgement returned by `POST /sites`.
#[derive(Debug, Deserialize)]
struct CreatedSite {
    id: i64,
    #[serde(default)]
    message: Option<String>,
}

/// FastAPI error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// HTTP client for the monitoring service rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpMonitorApi {
    client: Client,
    base_url: Url,
}

impl HttpMonitorApi {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!("monitoring API client rooted at {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&NewSite>) -> Result<Response> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turn non-2xx answers into transport errors, keeping the server's detail.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(text),
        }) => text,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    };

    Err(DashboardError::Transport(if detail.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), detail)
    }))
}

#[async_trait]
impl MonitorApi for HttpMonitorApi {
    async fn list_statuses(&self) -> Result<Vec<StatusRecord>> {
        self.get_json("sites/status").await
    }

    async fn get_stats(&self) -> Result<MonitorStats> {
        self.get_json("stats").await
    }

    async fn create_site(&self, name: String, url: String) -> Result<StatusRecord> {
        let site = NewSite::parse(&name, &url)?;
        let response = self.send(Method::POST, "sites", Some(&site)).await?;
        let created: CreatedSite = response.json().await?;

        tracing::info!(
            "created site {} ({}) as #{}: {}",
            site.name,
            site.url,
            created.id,
            created.message.as_deref().unwrap_or("ok")
        );
        Ok(StatusRecord::new_site(created.id, site.name, site.url))
    }

    async fn trigger_manual_check(&self) -> Result<()> {
        self.send(Method::POST, "check/manual", None).await?;
        Ok(())
    }

    async fn delete_site(&self, id: i64) -> Result<()> {
        self.send(Method::DELETE, &format!("sites/{id}"), None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SiteStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api_for(server: &MockServer) -> HttpMonitorApi {
        HttpMonitorApi::new(&format!("{}/api", server.uri()), None).unwrap()
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let api = HttpMonitorApi::new("http://localhost:8000/api", None).unwrap();
        assert_eq!(api.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            api.endpoint("sites/status").unwrap().as_str(),
            "http://localhost:8000/api/sites/status"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(HttpMonitorApi::new("not a url", None).is_err());
    }

    #[tokio::test]
    async fn lists_statuses_in_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sites/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "name": "B", "url": "https://b.example", "created_at": "2024-01-01 00:00:00", "status": "down"},
                {"id": 1, "name": "A", "url": "https://a.example", "created_at": "2024-01-01 00:00:00", "status": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let records = api_for(&server).await.list_statuses().await.unwrap();
        let summary: Vec<(i64, SiteStatus)> = records.iter().map(|r| (r.id, r.status)).collect();
        assert_eq!(summary, vec![(2, SiteStatus::Down), (1, SiteStatus::Unknown)]);
    }

    #[tokio::test]
    async fn fetches_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_sites": 3, "sites_up": 2, "sites_down": 1, "average_response_time": 0.25
            })))
            .mount(&server)
            .await;

        let stats = api_for(&server).await.get_stats().await.unwrap();
        assert_eq!(
            stats,
            MonitorStats {
                total_sites: 3,
                sites_up: 2,
                sites_down: 1,
                average_response_time: Some(0.25),
            }
        );
    }

    #[tokio::test]
    async fn server_error_becomes_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "database locked"})))
            .mount(&server)
            .await;

        let err = api_for(&server).await.get_stats().await.unwrap_err();
        assert_eq!(err, DashboardError::Transport("HTTP 500: database locked".into()));
    }

    #[tokio::test]
    async fn malformed_body_becomes_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sites/status"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = api_for(&server).await.list_statuses().await.unwrap_err();
        assert!(matches!(err, DashboardError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let api = HttpMonitorApi::new("http://127.0.0.1:9/api", Some(Duration::from_secs(2))).unwrap();
        let err = api.list_statuses().await.unwrap_err();
        assert!(matches!(err, DashboardError::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn create_site_sends_normalized_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sites"))
            .and(body_json(json!({"name": "Example", "url": "https://example.com"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 7, "message": "Site added successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let record = api_for(&server)
            .await
            .create_site(" Example ".into(), "example.com".into())
            .await
            .unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.url, "https://example.com");
        assert_eq!(record.status, SiteStatus::Unknown);
    }

    #[tokio::test]
    async fn create_site_validates_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = api_for(&server)
            .await
            .create_site("".into(), "example.com".into())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn create_site_rejection_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sites"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "UNIQUE constraint failed: sites.url"})))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .await
            .create_site("Example".into(), "https://example.com".into())
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "request failed: HTTP 400: UNIQUE constraint failed: sites.url"
        );
    }

    #[tokio::test]
    async fn manual_check_and_delete_hit_their_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/check/manual"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Checked 2 sites", "results": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/sites/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Site deleted successfully"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        api.trigger_manual_check().await.unwrap();
        api.delete_site(4).await.unwrap();
    }
}
