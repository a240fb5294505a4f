//! Contracts with the host's navigation stack and dialogs.
//!
//! Screens only ever issue one-shot, fire-and-forget navigation calls after a
//! request reaches a terminal success state. The concrete stack lives in the
//! host.

use std::fmt;

use async_trait::async_trait;

use crate::types::{Product, ProductId};

/// Every screen the catalog can show, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    List,
    Detail { id: ProductId },
    Create,
    Edit { id: ProductId },
    DeleteConfirm { id: ProductId },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::List => "list",
            Route::Detail { .. } => "detail",
            Route::Create => "create",
            Route::Edit { .. } => "edit",
            Route::DeleteConfirm { .. } => "delete-confirm",
        }
    }

    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Route::Detail { id } | Route::Edit { id } | Route::DeleteConfirm { id } => Some(*id),
            Route::List | Route::Create => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.product_id() {
            Some(id) => write!(f, "{}/{id}", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);

    /// Swap the current screen for `route` instead of pushing it.
    fn replace(&self, route: Route);

    fn go_back(&self);
}

/// Text of a confirm/cancel dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Prompt {
    pub fn delete_product(product: Option<&Product>) -> Self {
        let message = match product {
            Some(product) => format!("Are you sure you want to delete \"{}\"?", product.title),
            None => "Are you sure you want to delete this product?".to_string(),
        };
        Self {
            title: "Confirm deletion".to_string(),
            message,
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

/// A modal confirm/cancel gate. `false` means cancelled.
#[async_trait]
pub trait ConfirmDialog: Send + Sync {
    async fn confirm(&self, prompt: &Prompt) -> bool;
}
