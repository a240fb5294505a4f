use std::sync::Arc;

use tracing::debug;

use crate::controllers::{self, DeleteProductController, ProductLookupController};
use crate::fetch::{FetchStatus, Outcome};
use crate::navigation::{ConfirmDialog, Navigator, Prompt, Route};
use crate::screens::DeleteOutcome;
use crate::transport::{ProductApi, Transport};
use crate::types::{Product, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteView {
    pub product: Option<Product>,
    pub loading: bool,
    pub deleting: bool,
    pub error: Option<String>,
}

pub struct DeleteProductScreen {
    id: ProductId,
    product: ProductLookupController,
    delete: DeleteProductController,
    navigator: Arc<dyn Navigator>,
}

impl DeleteProductScreen {
    pub fn new<T: Transport + 'static>(
        api: Arc<ProductApi<T>>,
        navigator: Arc<dyn Navigator>,
        id: ProductId,
    ) -> Self {
        Self {
            id,
            product: controllers::product_lookup(api.clone()),
            delete: controllers::delete_product(api),
            navigator,
        }
    }

    pub async fn mount(&self) -> Option<Outcome<Product>> {
        self.product.run_if_changed(self.id).await
    }

    pub async fn reload(&self) -> Outcome<Product> {
        self.product.rerun(self.id).await
    }

    pub fn view(&self) -> DeleteView {
        let product = self.product.state();
        let delete = self.delete.state();
        DeleteView {
            loading: product.status == FetchStatus::Loading,
            deleting: delete.loading(),
            error: delete.error.or(product.error),
            product: product.data,
        }
    }

    /// Asks first. Cancelling sends nothing; a confirmed delete that succeeds
    /// replaces this screen with the list.
    pub async fn confirm_delete(&self, dialog: &dyn ConfirmDialog) -> DeleteOutcome {
        if self.delete.state().loading() {
            debug!(id = %self.id, "delete already in flight");
            return DeleteOutcome::Busy;
        }
        let prompt = Prompt::delete_product(self.product.state().data.as_ref());
        if !dialog.confirm(&prompt).await {
            debug!(id = %self.id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.delete.run(self.id).await {
            Outcome::Success(()) => {
                self.navigator.replace(Route::List);
                DeleteOutcome::Deleted
            }
            Outcome::Failed(message) => DeleteOutcome::Failed(message),
            Outcome::Discarded => DeleteOutcome::Discarded,
        }
    }

    pub fn leave(&self) {
        self.product.dispose();
        self.delete.dispose();
    }
}
