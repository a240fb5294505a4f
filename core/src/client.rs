//! Stateless HTTP request builder and response parser for the products API.
//!
//! # Design
//! `ProductClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping this layer
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewProduct, Product, ProductId};

/// Synchronous, stateless client for the products API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_product(&self, id: ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_product(&self, input: &NewProduct) -> Result<HttpRequest, TransportError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    /// Full replace: the whole product is sent, not a diff.
    pub fn build_update_product(&self, id: ProductId, product: &Product) -> Result<HttpRequest, TransportError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_path(id),
            headers: json_headers(),
            body: Some(encode(product)?),
        })
    }

    pub fn build_delete_product(&self, id: ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, TransportError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, TransportError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, TransportError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, TransportError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Any 2xx confirms the deletion. The body is ignored: upstream returns
    /// the deleted record, other servers return 204 with nothing.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), TransportError> {
        check_status(&response)
    }

    fn collection_path(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn item_path(&self, id: ProductId) -> String {
        format!("{}/products/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode<T: Serialize>(value: &T) -> Result<String, TransportError> {
    serde_json::to_string(value).map_err(|e| TransportError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Map non-2xx responses to `TransportError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        return Ok(());
    }
    Err(TransportError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rating;

    fn client() -> ProductClient {
        ProductClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn sample_product() -> Product {
        Product {
            id: ProductId(7),
            title: "X".to_string(),
            price: 12.5,
            description: "desc".to_string(),
            category: "misc".to_string(),
            image: "https://img/7.png".to_string(),
            rating: Rating { rate: 4.0, count: 10 },
        }
    }

    #[test]
    fn build_list_products_produces_correct_request() {
        let req = client().build_list_products();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_product_produces_correct_request() {
        let req = client().build_get_product(ProductId(5));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products/5");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_product_sends_draft_without_id() {
        let input = NewProduct {
            title: "Lamp".to_string(),
            price: 19.99,
            description: String::new(),
            category: "home".to_string(),
            image: String::new(),
            rating: Rating::default(),
        };
        let req = client().build_create_product(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Lamp");
        assert_eq!(body["price"], 19.99);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_product_sends_full_product() {
        let product = sample_product();
        let req = client().build_update_product(product.id, &product).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/products/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 7);
        assert_eq!(body["price"], 12.5);
        assert_eq!(body["rating"]["rate"], 4.0);
        assert_eq!(body["rating"]["count"], 10);
        assert_eq!(body["description"], "desc");
    }

    #[test]
    fn build_delete_product_produces_correct_request() {
        let req = client().build_delete_product(ProductId(9));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/products/9");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_products_success() {
        let body = r#"[{"id":1,"title":"Test","price":1.5,"rating":{"rate":3.9,"count":120}}]"#;
        let products = client().parse_list_products(response(200, body)).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Test");
        assert_eq!(products[0].rating.count, 120);
    }

    #[test]
    fn parse_get_product_not_found_is_a_status_error() {
        let err = client().parse_get_product(response(404, "")).unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[test]
    fn parse_create_product_accepts_200_and_201() {
        let body = r#"{"id":21,"title":"New","price":3.0}"#;
        for status in [200, 201] {
            let product = client().parse_create_product(response(status, body)).unwrap();
            assert_eq!(product.id, ProductId(21));
        }
    }

    #[test]
    fn parse_create_product_server_error() {
        let err = client()
            .parse_create_product(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 500, .. }));
    }

    #[test]
    fn parse_update_product_success() {
        let body = serde_json::to_string(&sample_product()).unwrap();
        let product = client().parse_update_product(response(200, &body)).unwrap();
        assert_eq!(product, sample_product());
    }

    #[test]
    fn parse_delete_product_tolerates_empty_body() {
        assert!(client().parse_delete_product(response(204, "")).is_ok());
        assert!(client().parse_delete_product(response(200, "")).is_ok());
    }

    #[test]
    fn parse_delete_product_ignores_json_body() {
        let body = serde_json::to_string(&sample_product()).unwrap();
        assert!(client().parse_delete_product(response(200, &body)).is_ok());
    }

    #[test]
    fn parse_delete_product_failure_status() {
        let err = client().parse_delete_product(response(404, "")).unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ProductClient::new("http://localhost:3000/");
        let req = client.build_list_products();
        assert_eq!(req.path, "http://localhost:3000/products");
    }

    #[test]
    fn parse_list_products_bad_json() {
        let err = client().parse_list_products(response(200, "not json")).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
