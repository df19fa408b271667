use crate::movie::Movie;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Collection path of the movie resource, resolved against the base URL.
pub const MOVIES_PATH: &str = "/api/movies";

/// Failure of a call against the movie service.
///
/// Callers treat every variant the same way: the operation rejected.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network Error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Message carried by the service's response body, if there was a response.
    ///
    /// The service answers errors with a JSON string such as
    /// `"movie already exist"`; that string is returned unquoted. Any other
    /// JSON is returned as compact JSON text, and non-JSON bodies verbatim.
    pub fn response_message(&self) -> Option<String> {
        match self {
            ApiError::Status { body, .. } => Some(body_message(body)),
            _ => None,
        }
    }
}

fn body_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => body.to_string(),
    }
}

/// Operations the UI needs from the movie service.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// `GET /api/movies`
    async fn list(&self) -> Result<Vec<Movie>, ApiError>;

    /// `POST /api/movies`
    async fn create(&self, movie: &Movie) -> Result<(), ApiError>;

    /// `PUT /api/movies/{id}`. Any 2xx is success; the stored representation
    /// is returned when the body decodes as a movie.
    async fn update(&self, movie: &Movie) -> Result<Option<Movie>, ApiError>;

    /// `DELETE /api/movies/{id}`
    async fn remove(&self, id: &str) -> Result<(), ApiError>;

    /// `GET /api/movies/{id}`
    async fn fetch(&self, id: &str) -> Result<Movie, ApiError>;
}

/// [`MovieApi`] over plain HTTP with reqwest.
///
/// No timeouts, retries or caching are configured.
pub struct HttpMovieApi {
    client: Client,
    base: Url,
}

impl HttpMovieApi {
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    pub fn collection_url(&self) -> Result<Url, ApiError> {
        Ok(self.base.join(MOVIES_PATH)?)
    }

    pub fn item_url(&self, id: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(&format!("{MOVIES_PATH}/{id}"))?)
    }

    /// Send the request and return the body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "movie service responded");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn list(&self) -> Result<Vec<Movie>, ApiError> {
        let url = self.collection_url()?;
        debug!(%url, "GET");
        let body = self.send(self.client.get(url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create(&self, movie: &Movie) -> Result<(), ApiError> {
        let url = self.collection_url()?;
        debug!(%url, "POST");
        self.send(self.client.post(url).json(movie)).await?;
        Ok(())
    }

    async fn update(&self, movie: &Movie) -> Result<Option<Movie>, ApiError> {
        let url = self.item_url(&movie.id_text())?;
        debug!(%url, "PUT");
        let body = self.send(self.client.put(url).json(movie)).await?;
        match serde_json::from_str(&body) {
            Ok(stored) => Ok(Some(stored)),
            Err(err) => {
                debug!(error = %err, "update response carried no movie");
                Ok(None)
            }
        }
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        debug!(%url, "DELETE");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Movie, ApiError> {
        let url = self.item_url(id)?;
        debug!(%url, "GET");
        let body = self.send(self.client.get(url)).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
