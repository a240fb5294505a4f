//! Subcommands. Each one drives a single screen the way a tap would.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail};
use catalog_core::screens::{DetailView, EditView, ListView};
use catalog_core::{
    ConfirmDialog, CreateProductScreen, DeleteOutcome, DeleteProductScreen, EditProductScreen, FormField, Product,
    ProductApi, ProductDetailScreen, ProductId, ProductListScreen, Route, SubmitOutcome, Transport,
};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::host::StackNavigator;
use crate::settings::CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse and edit the product catalog")]
pub struct Cli {
    /// API root, e.g. http://127.0.0.1:3000. Overrides the settings file and environment.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every product.
    List,
    /// Show one product.
    Show { id: ProductId },
    /// Create a product.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Image URL; a placeholder is used when omitted.
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Replace a product. Omitted fields keep their current value.
    Edit {
        id: ProductId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product after confirmation.
    Delete {
        id: ProductId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    /// The screen stack a user would have built up to reach this command.
    pub fn entry_stack(&self) -> Vec<Route> {
        match *self {
            Command::List => vec![Route::List],
            Command::Show { id } => vec![Route::List, Route::Detail { id }],
            Command::Add { .. } => vec![Route::List, Route::Create],
            Command::Edit { id, .. } => vec![Route::List, Route::Detail { id }, Route::Edit { id }],
            Command::Delete { id, .. } => vec![Route::List, Route::Detail { id }, Route::DeleteConfirm { id }],
        }
    }
}

/// Runs one command against `api` and returns the text to print.
pub async fn run<T: Transport + 'static>(
    command: Command,
    api: Arc<ProductApi<T>>,
    navigator: Arc<StackNavigator>,
    dialog: &dyn ConfirmDialog,
) -> anyhow::Result<String> {
    let output = match command {
        Command::List => {
            let screen = ProductListScreen::new(api, navigator.clone());
            screen.mount().await;
            match screen.view() {
                ListView::Ready(products) => render_list(&products),
                ListView::Failed(message) => bail!(message),
                ListView::Loading => bail!("product list did not load"),
            }
        }
        Command::Show { id } => {
            let screen = ProductDetailScreen::new(api, navigator.clone(), id);
            screen.mount().await;
            match screen.view() {
                DetailView::Ready(product) => render_product(&product),
                DetailView::Failed(message) => bail!(message),
                DetailView::Loading => bail!("product {id} did not load"),
            }
        }
        Command::Add {
            title,
            price,
            description,
            category,
            image,
        } => {
            let screen = CreateProductScreen::new(api, navigator.clone());
            screen.set_field(FormField::Title, title);
            screen.set_field(FormField::Price, price);
            screen.set_field(FormField::Description, description);
            screen.set_field(FormField::Category, category);
            screen.set_field(FormField::Image, image);
            let product = saved(screen.submit().await)?;
            info!(id = %product.id, "product created");
            format!("Created product {}\n{}", product.id, render_product(&product))
        }
        Command::Edit {
            id,
            title,
            price,
            description,
            category,
            image,
        } => {
            let screen = EditProductScreen::new(api, navigator.clone(), id);
            screen.mount().await;
            if let EditView::Failed(message) = screen.view() {
                bail!(message);
            }
            let changes = [
                (FormField::Title, title),
                (FormField::Price, price),
                (FormField::Description, description),
                (FormField::Category, category),
                (FormField::Image, image),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    screen.set_field(field, value);
                }
            }
            let product = saved(screen.submit().await)?;
            info!(id = %product.id, "product updated");
            format!("Updated product {}\n{}", product.id, render_product(&product))
        }
        Command::Delete { id, .. } => {
            let screen = DeleteProductScreen::new(api, navigator.clone(), id);
            screen.mount().await;
            match screen.confirm_delete(dialog).await {
                DeleteOutcome::Deleted => {
                    info!(%id, "product deleted");
                    format!("Deleted product {id}")
                }
                DeleteOutcome::Cancelled => "Cancelled".to_string(),
                DeleteOutcome::Busy => bail!("a delete is already in progress"),
                DeleteOutcome::Failed(message) => bail!(message),
                DeleteOutcome::Discarded => bail!("delete abandoned"),
            }
        }
    };
    Ok(output)
}

fn saved(outcome: SubmitOutcome) -> anyhow::Result<Product> {
    match outcome {
        SubmitOutcome::Saved(product) => Ok(product),
        SubmitOutcome::Invalid(err) => Err(anyhow!(err)),
        SubmitOutcome::Failed(message) => Err(anyhow!(message)),
        SubmitOutcome::NotReady => Err(anyhow!("product has not loaded")),
        SubmitOutcome::Busy => Err(anyhow!("a save is already in progress")),
        SubmitOutcome::Discarded => Err(anyhow!("request abandoned")),
    }
}

pub fn render_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products.".to_string();
    }
    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "#{:<4} {:<40} {:>10}  {}",
            product.id,
            product.title,
            product.price_label(),
            product.category
        );
    }
    out.trim_end().to_string()
}

pub fn render_product(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", product.id, product.title);
    let _ = writeln!(out, "price:    {}", product.price_label());
    if !product.category.is_empty() {
        let _ = writeln!(out, "category: {}", product.category);
    }
    let _ = writeln!(
        out,
        "rating:   {:.1} ({} reviews)",
        product.rating.rate, product.rating.count
    );
    if !product.image.is_empty() {
        let _ = writeln!(out, "image:    {}", product.image);
    }
    if !product.description.is_empty() {
        let _ = writeln!(out, "\n{}", product.description);
    }
    out.trim_end().to_string()
}
