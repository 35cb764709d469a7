use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;

use super::ApiError;
use crate::config;
use crate::state::{Booking, Car, CarId, FetchTicket, Fetched, Resource};

/// HTTP client for the rental backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Build a client from the current environment
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(config::api_base_url()?))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/{path}?{key}={value}` with the value form-encoded
    pub fn endpoint(&self, path: &str, key: &str, value: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(path);
        }
        url.query_pairs_mut().append_pair(key, value);
        url
    }

    pub fn list_url(&self, resource: Resource, identity: &str) -> Url {
        self.endpoint(resource.path(), "userID", identity)
    }

    pub async fn fetch_cars(&self, identity: &str) -> Result<Vec<Car>, ApiError> {
        self.get_list(Resource::Cars, identity).await
    }

    pub async fn fetch_bookings(&self, identity: &str) -> Result<Vec<Booking>, ApiError> {
        self.get_list(Resource::Bookings, identity).await
    }

    /// Run the request described by a ticket
    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<Fetched, ApiError> {
        match ticket.resource {
            Resource::Cars => self.fetch_cars(&ticket.identity).await.map(Fetched::Cars),
            Resource::Bookings => self.fetch_bookings(&ticket.identity).await.map(Fetched::Bookings),
        }
    }

    pub async fn delete_car(&self, id: &CarId) -> Result<(), ApiError> {
        let url = self.endpoint("cars", "carID", id.as_str());
        tracing::info!(car = %id, "deleting car");

        let response = self.http.request(Method::DELETE, url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status("delete car", status));
        }
        Ok(())
    }

    async fn get_list<T: DeserializeOwned>(&self, resource: Resource, identity: &str) -> Result<Vec<T>, ApiError> {
        let url = self.list_url(resource, identity);
        tracing::debug!(%resource, %url, "fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(format!("fetch {resource}"), status));
        }

        let body = response.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&body)?;
        tracing::info!(%resource, count = items.len(), "fetched");
        Ok(items)
    }
}
