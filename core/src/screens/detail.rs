use std::sync::{Arc, Mutex};

use crate::controllers::{self, ProductLookupController};
use crate::fetch::{FetchStatus, Outcome};
use crate::navigation::{Navigator, Route};
use crate::screens::lock;
use crate::transport::{ProductApi, Transport};
use crate::types::{Product, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Failed(String),
    Ready(Product),
}

/// Read-only view of one product, keyed by the id in its route.
pub struct ProductDetailScreen {
    id: Mutex<ProductId>,
    product: ProductLookupController,
    navigator: Arc<dyn Navigator>,
}

impl ProductDetailScreen {
    pub fn new<T: Transport + 'static>(
        api: Arc<ProductApi<T>>,
        navigator: Arc<dyn Navigator>,
        id: ProductId,
    ) -> Self {
        Self {
            id: Mutex::new(id),
            product: controllers::product_lookup(api),
            navigator,
        }
    }

    pub fn id(&self) -> ProductId {
        *lock(&self.id)
    }

    pub async fn mount(&self) -> Option<Outcome<Product>> {
        self.product.run_if_changed(self.id()).await
    }

    /// Re-key the screen. Fetches only when `id` differs from the last one.
    pub async fn show(&self, id: ProductId) -> Option<Outcome<Product>> {
        *lock(&self.id) = id;
        self.product.run_if_changed(id).await
    }

    /// Fetches the current id again, e.g. after a failed load.
    pub async fn reload(&self) -> Outcome<Product> {
        self.product.rerun(self.id()).await
    }

    pub fn view(&self) -> DetailView {
        let state = self.product.state();
        match (state.status, state.data) {
            (FetchStatus::Failed, _) => DetailView::Failed(state.error.unwrap_or_default()),
            (FetchStatus::Success, Some(product)) => DetailView::Ready(product),
            _ => DetailView::Loading,
        }
    }

    pub fn edit(&self) {
        self.navigator.navigate(Route::Edit { id: self.id() });
    }

    pub fn delete(&self) {
        self.navigator.navigate(Route::DeleteConfirm { id: self.id() });
    }

    pub fn back(&self) {
        self.navigator.go_back();
    }

    pub fn leave(&self) {
        self.product.dispose();
    }
}
