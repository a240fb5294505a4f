use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::controllers::{self, ProductLookupController, UpdateProductController};
use crate::fetch::{FetchStatus, Outcome};
use crate::form::{FormField, ProductForm};
use crate::navigation::Navigator;
use crate::screens::{lock, SubmitOutcome};
use crate::transport::{ProductApi, Transport};
use crate::types::{Product, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub enum EditView {
    Loading,
    Failed(String),
    Editing {
        form: ProductForm,
        saving: bool,
        error: Option<String>,
    },
}

/// Loads the product, prefills the form from it and submits a full
/// replacement that keeps the product's rating.
pub struct EditProductScreen {
    id: ProductId,
    form: Mutex<ProductForm>,
    product: ProductLookupController,
    update: UpdateProductController,
    navigator: Arc<dyn Navigator>,
}

impl EditProductScreen {
    pub fn new<T: Transport + 'static>(
        api: Arc<ProductApi<T>>,
        navigator: Arc<dyn Navigator>,
        id: ProductId,
    ) -> Self {
        Self {
            id,
            form: Mutex::new(ProductForm::new()),
            product: controllers::product_lookup(api.clone()),
            update: controllers::update_product(api),
            navigator,
        }
    }

    pub async fn mount(&self) -> Option<Outcome<Product>> {
        let outcome = self.product.run_if_changed(self.id).await;
        if let Some(outcome) = &outcome {
            self.prefill(outcome);
        }
        outcome
    }

    /// Loads the product again and refills the form from it.
    pub async fn reload(&self) -> Outcome<Product> {
        let outcome = self.product.rerun(self.id).await;
        self.prefill(&outcome);
        outcome
    }

    fn prefill(&self, outcome: &Outcome<Product>) {
        if let Outcome::Success(product) = outcome {
            *lock(&self.form) = ProductForm::from_product(product);
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        lock(&self.form).set(field, value);
    }

    pub fn view(&self) -> EditView {
        let loaded = self.product.state();
        match loaded.status {
            FetchStatus::Failed => EditView::Failed(loaded.error.unwrap_or_default()),
            FetchStatus::Success => {
                let update = self.update.state();
                EditView::Editing {
                    form: lock(&self.form).clone(),
                    saving: update.loading(),
                    error: update.error,
                }
            }
            FetchStatus::Idle | FetchStatus::Loading => EditView::Loading,
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.update.state().loading() {
            debug!(id = %self.id, "update already in flight");
            return SubmitOutcome::Busy;
        }
        let Some(original) = self.product.state().data else {
            return SubmitOutcome::NotReady;
        };
        let replacement = lock(&self.form).to_product(self.id, original.rating);
        let replacement = match replacement {
            Ok(product) => product,
            Err(err) => {
                debug!(error = %err, id = %self.id, "edit form rejected");
                return SubmitOutcome::Invalid(err);
            }
        };

        let outcome = SubmitOutcome::from_outcome(self.update.run((self.id, replacement)).await);
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            self.navigator.go_back();
        }
        outcome
    }

    pub fn leave(&self) {
        self.product.dispose();
        self.update.dispose();
    }
}
