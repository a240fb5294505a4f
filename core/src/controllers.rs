//! The five product controllers: one `FetchController` per API operation.

use std::sync::Arc;

use crate::fetch::FetchController;
use crate::transport::{ProductApi, Transport};
use crate::types::{NewProduct, Product, ProductId};

pub type ProductListController = FetchController<(), Vec<Product>>;
pub type ProductLookupController = FetchController<ProductId, Product>;
pub type CreateProductController = FetchController<NewProduct, Product>;
pub type UpdateProductController = FetchController<(ProductId, Product), Product>;
pub type DeleteProductController = FetchController<ProductId, ()>;

pub const LIST_FAILED: &str = "Failed to load products";
pub const LOOKUP_FAILED: &str = "Failed to load product";
pub const CREATE_FAILED: &str = "Failed to add product";
pub const UPDATE_FAILED: &str = "Failed to update product";
pub const DELETE_FAILED: &str = "Failed to delete product";

/// Starts in `Loading`; the owning screen runs it on mount.
pub fn product_list<T: Transport + 'static>(api: Arc<ProductApi<T>>) -> ProductListController {
    FetchController::new("list_products", LIST_FAILED, move |()| {
        let api = api.clone();
        async move { api.list_products().await }
    })
    .preloading()
}

/// Starts in `Loading`; re-run through `run_if_changed` whenever the id changes.
pub fn product_lookup<T: Transport + 'static>(api: Arc<ProductApi<T>>) -> ProductLookupController {
    FetchController::new("get_product", LOOKUP_FAILED, move |id| {
        let api = api.clone();
        async move { api.get_product(id).await }
    })
    .preloading()
}

pub fn create_product<T: Transport + 'static>(api: Arc<ProductApi<T>>) -> CreateProductController {
    FetchController::new("create_product", CREATE_FAILED, move |draft: NewProduct| {
        let api = api.clone();
        async move { api.create_product(&draft).await }
    })
}

pub fn update_product<T: Transport + 'static>(api: Arc<ProductApi<T>>) -> UpdateProductController {
    FetchController::new("update_product", UPDATE_FAILED, move |(id, product): (ProductId, Product)| {
        let api = api.clone();
        async move { api.update_product(id, &product).await }
    })
}

pub fn delete_product<T: Transport + 'static>(api: Arc<ProductApi<T>>) -> DeleteProductController {
    FetchController::new("delete_product", DELETE_FAILED, move |id| {
        let api = api.clone();
        async move { api.delete_product(id).await }
    })
}
