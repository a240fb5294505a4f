//! Each subcommand against the seeded mock server over real HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_cli::{run, AssumeYes, Command, ReqwestTransport, StackNavigator};
use catalog_core::{ConfirmDialog, ProductApi, ProductId, Prompt, Route};

struct Decline;

#[async_trait]
impl ConfirmDialog for Decline {
    async fn confirm(&self, _prompt: &Prompt) -> bool {
        false
    }
}

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = mock_server::app_with(mock_server::demo_products());
    tokio::spawn(mock_server::serve(listener, app));
    format!("http://{addr}")
}

async fn exec(
    base_url: &str,
    command: Command,
    dialog: &dyn ConfirmDialog,
) -> (anyhow::Result<String>, Arc<StackNavigator>) {
    let api = Arc::new(ProductApi::new(base_url, ReqwestTransport::new()));
    let navigator = Arc::new(StackNavigator::new(command.entry_stack()));
    let result = run(command, api, navigator.clone(), dialog).await;
    (result, navigator)
}

#[tokio::test]
async fn list_shows_seeded_catalog() {
    let base_url = start_server().await;
    let (output, _) = exec(&base_url, Command::List, &AssumeYes).await;
    let output = output.unwrap();

    assert_eq!(output.lines().count(), 5);
    assert!(output.contains("Canvas Backpack"));
    assert!(output.contains("$109.95"));
}

#[tokio::test]
async fn show_missing_product_reports_fixed_message() {
    let base_url = start_server().await;
    let (output, _) = exec(&base_url, Command::Show { id: ProductId(999) }, &AssumeYes).await;

    assert_eq!(output.unwrap_err().to_string(), "Failed to load product");
}

#[tokio::test]
async fn add_creates_with_placeholder_and_goes_back() {
    let base_url = start_server().await;
    let command = Command::Add {
        title: "Desk Lamp".to_string(),
        price: "24.5".to_string(),
        description: String::new(),
        category: "home".to_string(),
        image: String::new(),
    };
    let (output, navigator) = exec(&base_url, command, &AssumeYes).await;
    let output = output.unwrap();

    assert!(output.starts_with("Created product 6"), "{output}");
    assert!(output.contains("image:    https://via.placeholder.com/150"));
    assert_eq!(navigator.history(), [Route::List]);
}

#[tokio::test]
async fn add_with_bad_price_is_rejected_locally() {
    let base_url = start_server().await;
    let command = Command::Add {
        title: "Desk Lamp".to_string(),
        price: "cheap".to_string(),
        description: String::new(),
        category: String::new(),
        image: String::new(),
    };
    let (output, navigator) = exec(&base_url, command, &AssumeYes).await;

    assert!(output.unwrap_err().to_string().contains("Price must be a number"));
    assert_eq!(navigator.current(), Some(Route::Create));

    let (list, _) = exec(&base_url, Command::List, &AssumeYes).await;
    assert_eq!(list.unwrap().lines().count(), 5);
}

#[tokio::test]
async fn edit_changes_only_given_fields() {
    let base_url = start_server().await;
    let id = ProductId(3);
    let command = Command::Edit {
        id,
        title: None,
        price: Some("60".to_string()),
        description: None,
        category: None,
        image: None,
    };
    let (output, navigator) = exec(&base_url, command, &AssumeYes).await;
    let output = output.unwrap();

    assert!(output.contains("Cotton Jacket"));
    assert!(output.contains("$60.00"));
    assert!(output.contains("4.7 (500 reviews)"));
    assert_eq!(navigator.current(), Some(Route::Detail { id }));
}

#[tokio::test]
async fn delete_cancelled_keeps_product() {
    let base_url = start_server().await;
    let id = ProductId(2);
    let (output, navigator) = exec(&base_url, Command::Delete { id, yes: false }, &Decline).await;

    assert_eq!(output.unwrap(), "Cancelled");
    assert_eq!(navigator.current(), Some(Route::DeleteConfirm { id }));
    let (shown, _) = exec(&base_url, Command::Show { id }, &AssumeYes).await;
    assert!(shown.is_ok());
}

#[tokio::test]
async fn delete_confirmed_replaces_with_list() {
    let base_url = start_server().await;
    let id = ProductId(2);
    let (output, navigator) = exec(&base_url, Command::Delete { id, yes: true }, &AssumeYes).await;

    assert_eq!(output.unwrap(), "Deleted product 2");
    assert_eq!(navigator.current(), Some(Route::List));
    let (shown, _) = exec(&base_url, Command::Show { id }, &AssumeYes).await;
    assert!(shown.is_err());
}

#[tokio::test]
async fn unreachable_server_fails_cleanly() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (output, _) = exec(&format!("http://{addr}"), Command::List, &AssumeYes).await;
    assert_eq!(output.unwrap_err().to_string(), "Failed to load products");
}
