//! [`SlideStore`] over the carousel REST API, using [`reqwest`].

use carousel_core::slide::{NewSlide, Slide};
use carousel_core::types::DbId;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::config::EditorConfig;
use crate::store::{SlideChanges, SlideStore, StoreError};

/// The part of `GET /projects/{id}` the editor needs.
#[derive(Debug, Deserialize)]
struct ProjectSnapshot {
    slides: Vec<Slide>,
}

pub struct HttpSlideStore {
    client: reqwest::Client,
    config: EditorConfig,
}

impl HttpSlideStore {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, config: EditorConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&self.config.access_token)
    }

    // ---- private helpers ----

    /// Map 404/409 onto their store errors and any other failure onto
    /// [`StoreError::Api`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound),
            StatusCode::CONFLICT => Err(StoreError::Stale),
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                Err(StoreError::Api {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

impl SlideStore for HttpSlideStore {
    async fn fetch_slides(&self, project_id: DbId) -> Result<Vec<Slide>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/projects/{project_id}"))
            .send()
            .await?;
        let snapshot: ProjectSnapshot = Self::ensure_success(response).await?.json().await?;
        Ok(snapshot.slides)
    }

    async fn create_slide(&self, slide: &NewSlide) -> Result<Slide, StoreError> {
        let body = json!({
            "slide_number": slide.slide_number,
            "content": slide.content,
            "title": slide.title,
            "tone": slide.tone,
        });
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/projects/{}/slides", slide.project_id),
            )
            .json(&body)
            .send()
            .await?;
        match Self::ensure_success(response).await {
            Ok(response) => Ok(response.json().await?),
            // On create a conflict means the project is full, not a stale save.
            Err(StoreError::Stale) => Err(StoreError::Api {
                status: StatusCode::CONFLICT.as_u16(),
                body: "slide limit reached".to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn update_slide(&self, slide_id: DbId, changes: &SlideChanges) -> Result<(), StoreError> {
        // The API treats an empty tone as "clear" and an absent one as "keep".
        let body = json!({
            "content": changes.content,
            "tone": changes.tone.as_deref().unwrap_or(""),
            "revision": changes.revision,
        });
        let response = self
            .request(reqwest::Method::PUT, &format!("/slides/{slide_id}"))
            .json(&body)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_slide(&self, slide_id: DbId) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/slides/{slide_id}"))
            .send()
            .await?;
        match Self::ensure_success(response).await {
            Ok(_) | Err(StoreError::NotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
