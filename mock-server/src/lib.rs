use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Body of `POST /products` and `PUT /products/{id}`. Any `id` in the body
/// is ignored; the server owns ids.
#[derive(Deserialize)]
pub struct ProductBody {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl ProductBody {
    fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            rating: self.rating,
        }
    }
}

#[derive(Default)]
pub struct Store {
    products: BTreeMap<u64, Product>,
    next_id: u64,
}

impl Store {
    fn with(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            next_id,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-populated with `products`. New ids continue after the largest
/// seeded one.
pub fn app_with(products: Vec<Product>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with(products)));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

/// A small catalog for local runs.
pub fn demo_products() -> Vec<Product> {
    let product = |id, title: &str, price, category: &str, rate, count| Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{title} from the demo catalog"),
        category: category.to_string(),
        image: "https://via.placeholder.com/150".to_string(),
        rating: Rating { rate, count },
    };
    vec![
        product(1, "Canvas Backpack", 109.95, "bags", 3.9, 120),
        product(2, "Slim Fit T-Shirt", 22.3, "clothing", 4.1, 259),
        product(3, "Cotton Jacket", 55.99, "clothing", 4.7, 500),
        product(4, "Silver Bracelet", 695.0, "jewelery", 4.6, 400),
        product(5, "Portable SSD 1TB", 109.0, "electronics", 4.8, 319),
    ]
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(store.products.values().cloned().collect())
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<ProductBody>,
) -> (StatusCode, Json<Product>) {
    let mut store = db.write().await;
    let id = store.allocate_id();
    let product = input.into_product(id);
    store.products.insert(id, product.clone());
    info!(id, title = %product.title, "created product");
    (StatusCode::CREATED, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, StatusCode> {
    let store = db.read().await;
    store.products.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ProductBody>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let slot = store.products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_product(id);
    info!(id, "replaced product");
    Ok(Json(slot.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let removed = store.products.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!(id, "deleted product");
    Ok(Json(removed))
}
