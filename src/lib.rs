//! shoesApp admin client
//!
//! Typed access to the shop back-end's REST resources (categories, products,
//! favorites, bills, sizes). Each entity gets an [`EntityController`] that owns
//! a state container and keeps it consistent with the server through list,
//! fetch-one, create, update, partial-update and delete operations.

pub mod config;
pub mod entity;
pub mod error;
pub mod fetch;
pub mod models;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::entity::{EntityController, EntityRecord};
use crate::error::{Error, Result};
use crate::models::{Bill, Category, Favorite, Product, Size};

/// Application context owning one controller per entity
pub struct ShopAdmin {
    /// The base URL of the back-end
    pub url: String,
    /// HTTP client shared by all controllers
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    categories: EntityController<Category>,
    products: EntityController<Product>,
    favorites: EntityController<Favorite>,
    bills: EntityController<Bill>,
    sizes: EntityController<Size>,
}

impl ShopAdmin {
    /// Create a new client with default options
    ///
    /// Fails outside a Tokio runtime: every controller spawns its store task
    /// on construction.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shoesapp_admin::ShopAdmin;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> shoesapp_admin::error::Result<()> {
    /// let admin = ShopAdmin::new("http://localhost:8080")?;
    /// admin.sizes().list(&Default::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(url: &str) -> Result<Self> {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new client with custom options
    pub fn new_with_options(url: &str, options: ClientOptions) -> Result<Self> {
        url::Url::parse(url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            url: url.to_string(),
            categories: EntityController::new(url, http_client.clone(), options.clone())?,
            products: EntityController::new(url, http_client.clone(), options.clone())?,
            favorites: EntityController::new(url, http_client.clone(), options.clone())?,
            bills: EntityController::new(url, http_client.clone(), options.clone())?,
            sizes: EntityController::new(url, http_client.clone(), options.clone())?,
            http_client,
            options,
        })
    }

    /// Create a client from `SHOESAPP_URL` and optional `SHOESAPP_TOKEN`
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SHOESAPP_URL").map_err(|_| {
            Error::general("SHOESAPP_URL environment variable not found")
        })?;
        let mut options = ClientOptions::default();
        if let Ok(token) = std::env::var("SHOESAPP_TOKEN") {
            options = options.with_token(&token);
        }
        Self::new_with_options(&url, options)
    }

    /// Controller for `api/categories`
    pub fn categories(&self) -> &EntityController<Category> {
        &self.categories
    }

    /// Controller for `api/products`
    pub fn products(&self) -> &EntityController<Product> {
        &self.products
    }

    /// Controller for `api/favorites`
    pub fn favorites(&self) -> &EntityController<Favorite> {
        &self.favorites
    }

    /// Controller for `api/bills`
    pub fn bills(&self) -> &EntityController<Bill> {
        &self.bills
    }

    /// Controller for `api/sizes`
    pub fn sizes(&self) -> &EntityController<Size> {
        &self.sizes
    }

    /// A fresh controller, with its own state, for any record type
    pub fn controller<T: EntityRecord>(&self) -> Result<EntityController<T>> {
        EntityController::new(&self.url, self.http_client.clone(), self.options.clone())
    }

    /// Stop background re-fetches on every controller
    pub fn shutdown(&self) {
        self.categories.shutdown();
        self.products.shutdown();
        self.favorites.shutdown();
        self.bills.shutdown();
        self.sizes.shutdown();
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::entity::{
        Criteria, EntityController, EntityRecord, EntityState, ListRequest, SortOrder,
    };
    pub use crate::error::Error;
    pub use crate::models::*;
    pub use crate::ShopAdmin;
}
