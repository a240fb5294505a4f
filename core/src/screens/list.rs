use std::sync::Arc;

use tracing::debug;

use crate::controllers::{self, ProductListController};
use crate::fetch::{FetchStatus, Outcome};
use crate::navigation::{Navigator, Route};
use crate::transport::{ProductApi, Transport};
use crate::types::{Product, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Failed(String),
    Ready(Vec<Product>),
}

pub struct ProductListScreen {
    products: ProductListController,
    navigator: Arc<dyn Navigator>,
}

impl ProductListScreen {
    pub fn new<T: Transport + 'static>(api: Arc<ProductApi<T>>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            products: controllers::product_list(api),
            navigator,
        }
    }

    pub async fn mount(&self) -> Outcome<Vec<Product>> {
        self.products.run(()).await
    }

    pub async fn refresh(&self) -> Outcome<Vec<Product>> {
        self.products.run(()).await
    }

    pub fn view(&self) -> ListView {
        let state = self.products.state();
        match state.status {
            FetchStatus::Idle | FetchStatus::Loading => ListView::Loading,
            FetchStatus::Failed => ListView::Failed(state.error.unwrap_or_default()),
            FetchStatus::Success => ListView::Ready(state.data.unwrap_or_default()),
        }
    }

    pub fn open_product(&self, id: ProductId) {
        debug!(%id, "opening product");
        self.navigator.navigate(Route::Detail { id });
    }

    pub fn add_product(&self) {
        self.navigator.navigate(Route::Create);
    }

    pub fn leave(&self) {
        self.products.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::LIST_FAILED;
    use crate::testing::{product_json, NavEvent, RecordingNavigator, ScriptedTransport};

    fn screen(transport: &Arc<ScriptedTransport>, navigator: &Arc<RecordingNavigator>) -> ProductListScreen {
        let api = Arc::new(ProductApi::new("http://api.test", transport.clone()));
        ProductListScreen::new(api, navigator.clone())
    }

    #[tokio::test]
    async fn shows_loading_before_mount_then_products() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(
            200,
            &format!("[{},{}]", product_json(1, "Mug", 3.0), product_json(2, "Lamp", 19.99)),
        );
        let navigator = Arc::new(RecordingNavigator::default());
        let screen = screen(&transport, &navigator);

        assert_eq!(screen.view(), ListView::Loading);
        screen.mount().await;

        let ListView::Ready(products) = screen.view() else {
            panic!("expected products");
        };
        let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Mug", "Lamp"]);
        assert!(navigator.events().is_empty());
    }

    #[tokio::test]
    async fn failure_shows_message_and_refresh_recovers() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(500, "boom");
        transport.push_ok(200, "[]");
        let navigator = Arc::new(RecordingNavigator::default());
        let screen = screen(&transport, &navigator);

        screen.mount().await;
        assert_eq!(screen.view(), ListView::Failed(LIST_FAILED.to_string()));

        screen.refresh().await;
        assert_eq!(screen.view(), ListView::Ready(Vec::new()));
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn selecting_and_adding_navigate() {
        let transport = Arc::new(ScriptedTransport::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let screen = screen(&transport, &navigator);

        screen.open_product(ProductId(5));
        screen.add_product();
        assert_eq!(
            navigator.events(),
            [
                NavEvent::Navigate(Route::Detail { id: ProductId(5) }),
                NavEvent::Navigate(Route::Create),
            ]
        );
    }

    #[tokio::test]
    async fn late_list_after_leave_is_ignored() {
        let transport = Arc::new(ScriptedTransport::new());
        let gate = transport.push_gated();
        let navigator = Arc::new(RecordingNavigator::default());
        let screen = screen(&transport, &navigator);

        let release = async {
            tokio::task::yield_now().await;
            screen.leave();
            gate.respond(200, &format!("[{}]", product_json(1, "Mug", 3.0)));
        };
        let (outcome, ()) = tokio::join!(screen.mount(), release);

        assert_eq!(outcome, Outcome::Discarded);
        assert_eq!(screen.view(), ListView::Loading);
    }
}
