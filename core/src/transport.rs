//! The I/O seam: one async request/response exchange per call.
//!
//! `ProductApi` pairs a stateless `ProductClient` with a `Transport` so the
//! five product operations read as single calls, while the build/parse split
//! stays available for hosts that do their own I/O.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::client::ProductClient;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{NewProduct, Product, ProductId};

/// Executes one HTTP round-trip.
///
/// Implementations must not retry and must return non-2xx responses as data
/// (`Ok(HttpResponse)`); only failures that produce no response at all are
/// `Err(TransportError::Network)`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// The five product operations over a concrete transport.
#[derive(Debug, Clone)]
pub struct ProductApi<T> {
    client: ProductClient,
    transport: T,
}

impl<T: Transport> ProductApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: ProductClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, TransportError> {
        let response = self.send(self.client.build_list_products()).await?;
        self.client.parse_list_products(response)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, TransportError> {
        let response = self.send(self.client.build_get_product(id)).await?;
        self.client.parse_get_product(response)
    }

    /// Sends the draft as-is. Validation belongs to the caller.
    pub async fn create_product(&self, input: &NewProduct) -> Result<Product, TransportError> {
        let request = self.client.build_create_product(input)?;
        let response = self.send(request).await?;
        self.client.parse_create_product(response)
    }

    pub async fn update_product(&self, id: ProductId, product: &Product) -> Result<Product, TransportError> {
        let request = self.client.build_update_product(id, product)?;
        let response = self.send(request).await?;
        self.client.parse_update_product(response)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), TransportError> {
        let response = self.send(self.client.build_delete_product(id)).await?;
        self.client.parse_delete_product(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::ScriptedTransport;
    use crate::types::Rating;

    #[tokio::test]
    async fn list_products_goes_through_transport() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(200, r#"[{"id":1,"title":"A","price":2.0}]"#);
        let api = ProductApi::new("http://api.test", transport.clone());

        let products = api.list_products().await.unwrap();
        assert_eq!(products.len(), 1);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].path, "http://api.test/products");
    }

    #[tokio::test]
    async fn network_failure_surfaces_as_transport_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_network_error("connection refused");
        let api = ProductApi::new("http://api.test", transport);

        let err = api.get_product(ProductId(1)).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn create_product_returns_server_copy() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(
            201,
            r#"{"id":21,"title":"Lamp","price":19.99,"rating":{"rate":0,"count":0}}"#,
        );
        let api = ProductApi::new("http://api.test", transport.clone());
        let draft = NewProduct {
            title: "Lamp".to_string(),
            price: 19.99,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        };

        let created = api.create_product(&draft).await.unwrap();
        assert_eq!(created.id, ProductId(21));
        assert_eq!(created.rating, Rating::default());
        assert_eq!(transport.requests()[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn delete_product_accepts_no_content() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(204, "");
        let api = ProductApi::new("http://api.test", transport.clone());

        api.delete_product(ProductId(4)).await.unwrap();
        assert_eq!(transport.requests()[0].path, "http://api.test/products/4");
    }
}
