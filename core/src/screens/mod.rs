//! View-models for the five catalog screens.
//!
//! A screen owns its controllers and form state, hands the host plain
//! snapshots through `view()`, and fires exactly one navigation call once a
//! request it started succeeds. `leave()` disposes every controller so late
//! responses cannot touch a screen that is gone.

mod create;
mod delete;
mod detail;
mod edit;
mod list;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use create::{CreateProductScreen, CreateView};
pub use delete::{DeleteProductScreen, DeleteView};
pub use detail::{DetailView, ProductDetailScreen};
pub use edit::{EditProductScreen, EditView};
pub use list::{ListView, ProductListScreen};

use crate::error::ValidationError;
use crate::fetch::Outcome;
use crate::types::Product;

/// Result of submitting the create or edit form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Rejected locally; nothing was sent.
    Invalid(ValidationError),
    /// The product being edited has not loaded yet; nothing was sent.
    NotReady,
    /// A save from this screen is still in flight; nothing was sent.
    Busy,
    Saved(Product),
    Failed(String),
    Discarded,
}

impl SubmitOutcome {
    fn from_outcome(outcome: Outcome<Product>) -> Self {
        match outcome {
            Outcome::Success(product) => SubmitOutcome::Saved(product),
            Outcome::Failed(message) => SubmitOutcome::Failed(message),
            Outcome::Discarded => SubmitOutcome::Discarded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    /// A delete from this screen is still in flight; nothing was sent.
    Busy,
    Deleted,
    Failed(String),
    Discarded,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
