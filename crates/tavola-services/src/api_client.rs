//! REST client for the admin API
//!
//! List endpoints take the query parameters produced by
//! [`ListRequest::to_query_pairs`] and answer with a [`PageEnvelope`].
//! Error responses may carry a JSON body with a `message` field, which is
//! surfaced to the user verbatim.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tavola_core::{ListRequest, Page, PageEnvelope};
use tavola_settings::ApiSettings;
use tavola_table::{FetchError, RowSource};
use url::Url;

use crate::error::{ServiceError, ServiceResult};

/// HTTP client bound to one API base URL
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> ServiceResult<Self> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            base_url: Self::parse_base_url(&settings.base_url)?,
            client,
            access_token: settings.access_token.clone(),
        })
    }

    /// Base URLs are treated as directories, so `http://host/api/v1` and
    /// `http://host/api/v1/` resolve resources the same way
    fn parse_base_url(base_url: &str) -> ServiceResult<Url> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> ServiceResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch one page of `resource`
    #[tracing::instrument(skip(self, request), fields(page = request.page, size = request.size))]
    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        request: &ListRequest,
    ) -> ServiceResult<Page<T>> {
        let url = self.endpoint(resource)?;
        let query = request.to_query_pairs();
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .authorized(self.client.get(url))
            .query(&query)
            .send()
            .await?;
        let envelope: PageEnvelope<T> = Self::read_json(response).await?;
        Ok(envelope.into_page(request.page))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, resource: &str, id: &str) -> ServiceResult<T> {
        let url = self.endpoint(&format!("{}/{}", resource.trim_end_matches('/'), id))?;
        let response = self.authorized(self.client.get(url)).send().await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn create<B, T>(&self, resource: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(resource)?;
        let response = self
            .authorized(self.client.post(url))
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn update<B, T>(&self, resource: &str, id: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(&format!("{}/{}", resource.trim_end_matches('/'), id))?;
        let response = self
            .authorized(self.client.put(url))
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, resource: &str, id: &str) -> ServiceResult<()> {
        let url = self.endpoint(&format!("{}/{}", resource.trim_end_matches('/'), id))?;
        let response = self.authorized(self.client.delete(url)).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
        let body = Self::check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn check_status(response: Response) -> ServiceResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::warn!(status = status.as_u16(), "API error: {}", body);
        Err(ServiceError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Human readable message from an error response body, if it has one
fn error_message(body: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(body).ok()?;
    body.message
        .or(body.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Row source reading one list resource through an [`ApiClient`]
pub struct ApiRowSource<T> {
    client: Arc<ApiClient>,
    resource: String,
    _row: PhantomData<fn() -> T>,
}

impl<T> ApiRowSource<T> {
    pub fn new(client: Arc<ApiClient>, resource: impl Into<String>) -> Self {
        Self {
            client,
            resource: resource.into(),
            _row: PhantomData,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

#[async_trait]
impl<T> RowSource<T> for ApiRowSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, request: &ListRequest) -> Result<Page<T>, FetchError> {
        self.client
            .list(&self.resource, request)
            .await
            .map_err(FetchError::from)
    }
}
