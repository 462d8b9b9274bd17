//! Record API client.

use crate::error::ClientError;
use crate::models::{StudentForm, StudentRecord};
use async_trait::async_trait;
use serde::Deserialize;

/// The four Record API calls the screen makes.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn list(&self) -> Result<Vec<StudentRecord>, ClientError>;
    /// Returns the generated id.
    async fn create(&self, form: &StudentForm) -> Result<i32, ClientError>;
    async fn update(&self, id: i32, form: &StudentForm) -> Result<(), ClientError>;
    async fn delete(&self, id: i32) -> Result<(), ClientError>;
}

/// List responses are a bare array; a `{"data": [...]}` envelope is tolerated too.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Plain(Vec<StudentRecord>),
    Envelope {
        #[serde(default)]
        data: Vec<StudentRecord>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedBody {
    student_id: i32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to `{base_url}/api/students` over HTTP.
#[derive(Clone)]
pub struct HttpStudentApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStudentApi {
    /// `base_url` is the server root, e.g. `http://192.168.0.185:3000`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        let endpoint = format!("{}/api/students", base_url.as_ref().trim_end_matches('/'));
        HttpStudentApi { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

/// Non-2xx responses become [`ClientError::Status`] carrying the server's `error` message when present.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list(&self) -> Result<Vec<StudentRecord>, ClientError> {
        tracing::debug!(url = %self.endpoint, "GET");
        let resp = check(self.client.get(&self.endpoint).send().await?).await?;
        Ok(match resp.json::<ListBody>().await? {
            ListBody::Plain(rows) => rows,
            ListBody::Envelope { data } => data,
        })
    }

    async fn create(&self, form: &StudentForm) -> Result<i32, ClientError> {
        tracing::debug!(url = %self.endpoint, "POST");
        let resp = check(self.client.post(&self.endpoint).json(form).send().await?).await?;
        Ok(resp.json::<CreatedBody>().await?.student_id)
    }

    async fn update(&self, id: i32, form: &StudentForm) -> Result<(), ClientError> {
        let url = self.item_url(id);
        tracing::debug!(url = %url, "PUT");
        check(self.client.put(&url).json(form).send().await?).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let url = self.item_url(id);
        tracing::debug!(url = %url, "DELETE");
        check(self.client.delete(&url).send().await?).await?;
        Ok(())
    }
}
