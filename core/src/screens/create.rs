use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::controllers::{self, CreateProductController};
use crate::form::{FormField, ProductForm};
use crate::navigation::Navigator;
use crate::screens::{lock, SubmitOutcome};
use crate::transport::{ProductApi, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateView {
    pub form: ProductForm,
    pub submitting: bool,
    pub error: Option<String>,
}

pub struct CreateProductScreen {
    form: Mutex<ProductForm>,
    create: CreateProductController,
    navigator: Arc<dyn Navigator>,
}

impl CreateProductScreen {
    pub fn new<T: Transport + 'static>(api: Arc<ProductApi<T>>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            form: Mutex::new(ProductForm::new()),
            create: controllers::create_product(api),
            navigator,
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        lock(&self.form).set(field, value);
    }

    pub fn view(&self) -> CreateView {
        let state = self.create.state();
        CreateView {
            form: lock(&self.form).clone(),
            submitting: state.loading(),
            error: state.error,
        }
    }

    /// Validates, posts the draft and goes back once the server accepts it.
    /// The form is left untouched on failure so the user can retry.
    /// Refused while an earlier submit is still pending.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.create.state().loading() {
            debug!("create already in flight");
            return SubmitOutcome::Busy;
        }
        let draft = lock(&self.form).to_new_product();
        let draft = match draft {
            Ok(draft) => draft,
            Err(err) => {
                debug!(error = %err, "create form rejected");
                return SubmitOutcome::Invalid(err);
            }
        };

        let outcome = SubmitOutcome::from_outcome(self.create.run(draft).await);
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            self.navigator.go_back();
        }
        outcome
    }

    pub fn leave(&self) {
        self.create.dispose();
    }
}
