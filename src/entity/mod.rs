//! Entity state controllers over the back-end's REST resources

mod clean;
mod filter;
mod query;
mod state;
mod store;

use chrono::Utc;
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::{Fetch, FetchBuilder};
use store::Store;

pub use clean::clean_entity;
pub use filter::*;
pub use query::*;
pub use state::*;

/// A record type served under its own REST resource
pub trait EntityRecord:
    Serialize + DeserializeOwned + Clone + Default + fmt::Debug + Send + Sync + 'static
{
    /// Singular entity name, used in logs
    const NAME: &'static str;

    /// Resource path segment below the API prefix, e.g. `sizes`
    const RESOURCE: &'static str;

    /// Server-assigned identifier, `None` for records not yet created
    fn id(&self) -> Option<i64>;
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Create,
    Update,
    PartialUpdate,
}

struct Inner<T> {
    resource_url: String,
    client: Client,
    options: ClientOptions,
    store: Store<T>,
    background: CancellationToken,
}

/// State container plus the operations that keep it in line with the server.
///
/// Cloning is cheap and every clone drives the same state. Construction
/// spawns the store task and fails outside a Tokio runtime.
pub struct EntityController<T: EntityRecord> {
    inner: Arc<Inner<T>>,
}

impl<T: EntityRecord> Clone for EntityController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: EntityRecord> EntityController<T> {
    /// Create a controller for `T` against the back-end at `base_url`
    pub fn new(base_url: &str, client: Client, options: ClientOptions) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            Error::general(format!("{} controller needs a Tokio runtime: {}", T::NAME, e))
        })?;

        let resource_url = [
            base_url.trim_end_matches('/'),
            options.api_prefix.as_str(),
            T::RESOURCE,
        ]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

        Ok(Self {
            inner: Arc::new(Inner {
                resource_url,
                client,
                options,
                store: Store::spawn(&runtime, T::NAME),
                background: CancellationToken::new(),
            }),
        })
    }

    /// Full URL of the collection resource
    pub fn resource_url(&self) -> &str {
        &self.inner.resource_url
    }

    /// Snapshot of the current state
    pub fn state(&self) -> EntityState<T> {
        self.inner.store.snapshot()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<EntityState<T>> {
        self.inner.store.subscribe()
    }

    /// Request a page of the collection and replace the stored one
    pub async fn list(&self, request: &ListRequest) -> Result<Vec<T>> {
        debug!("list {} {:?}", T::NAME, request);
        self.inner
            .store
            .dispatch(Action::ListPending { background: false })
            .await;

        match self.request_page(request).await {
            Ok((entities, total_items)) => {
                self.inner
                    .store
                    .dispatch(Action::ListFulfilled {
                        entities: entities.clone(),
                        total_items,
                    })
                    .await;
                Ok(entities)
            }
            Err(e) => {
                self.reject(&e, false).await;
                Err(e)
            }
        }
    }

    /// Load one record into the single-entity slot
    pub async fn fetch_one(&self, id: i64) -> Result<T> {
        debug!("fetch {} {}", T::NAME, id);
        self.inner.store.dispatch(Action::FetchPending).await;

        let url = self.record_url(id);
        let result = self.authorized(Fetch::get(&self.inner.client, &url)).execute::<T>().await;

        match result {
            Ok(entity) => {
                self.inner
                    .store
                    .dispatch(Action::FetchFulfilled(entity.clone()))
                    .await;
                Ok(entity)
            }
            Err(e) => {
                self.reject(&e, false).await;
                Err(e)
            }
        }
    }

    /// Create a record; the server assigns its id
    pub async fn create(&self, record: &T) -> Result<T> {
        self.mutate(Mutation::Create, record).await
    }

    /// Replace an existing record
    pub async fn update(&self, record: &T) -> Result<T> {
        self.mutate(Mutation::Update, record).await
    }

    /// Send only the supplied fields of an existing record
    pub async fn partial_update(&self, record: &T) -> Result<T> {
        self.mutate(Mutation::PartialUpdate, record).await
    }

    /// Delete a record and clear the single-entity slot
    pub async fn delete(&self, id: i64) -> Result<()> {
        debug!("delete {} {}", T::NAME, id);
        self.inner.store.dispatch(Action::MutationPending).await;

        let url = self.record_url(id);
        let result = self
            .authorized(Fetch::delete(&self.inner.client, &url))
            .execute_empty()
            .await;

        match result {
            Ok(headers) => {
                let alert = self.alert_from(&headers);
                self.inner
                    .store
                    .dispatch(Action::DeleteFulfilled { alert })
                    .await;
                self.spawn_refetch();
                Ok(())
            }
            Err(e) => {
                self.reject(&e, false).await;
                Err(e)
            }
        }
    }

    /// Number of records matching the criteria; the state is left alone
    pub async fn count(&self, criteria: &Criteria) -> Result<u64> {
        let url = format!("{}/count", self.inner.resource_url);
        self.authorized(Fetch::get(&self.inner.client, &url))
            .query(criteria.to_params())
            .execute::<u64>()
            .await
    }

    /// Return the state to its initial shape
    pub async fn reset(&self) {
        self.inner.store.dispatch(Action::Reset).await;
    }

    /// Cancel running background re-fetches and suppress future ones
    pub fn shutdown(&self) {
        self.inner.background.cancel();
    }

    async fn mutate(&self, kind: Mutation, record: &T) -> Result<T> {
        debug!("{:?} {} {:?}", kind, T::NAME, record.id());
        self.inner.store.dispatch(Action::MutationPending).await;

        match self.send_mutation(kind, record).await {
            Ok((entity, headers)) => {
                let alert = self.alert_from(&headers);
                self.inner
                    .store
                    .dispatch(Action::MutationFulfilled {
                        entity: entity.clone(),
                        alert,
                    })
                    .await;
                self.spawn_refetch();
                Ok(entity)
            }
            Err(e) => {
                self.reject(&e, false).await;
                Err(e)
            }
        }
    }

    async fn send_mutation(&self, kind: Mutation, record: &T) -> Result<(T, HeaderMap)> {
        let body = clean_entity(record)?;
        let client = &self.inner.client;

        let fetch = match kind {
            Mutation::Create => Fetch::post(client, &self.inner.resource_url),
            Mutation::Update | Mutation::PartialUpdate => {
                let id = record.id().ok_or_else(|| {
                    Error::invalid_parameters(format!("{} has no id to update", T::NAME))
                })?;
                let url = self.record_url(id);
                match kind {
                    Mutation::PartialUpdate => Fetch::patch(client, &url),
                    _ => Fetch::put(client, &url),
                }
            }
        };

        let response = self
            .authorized(fetch)
            .json(&body)?
            .execute_with_headers::<T>()
            .await?;
        Ok((response.data, response.headers))
    }

    async fn request_page(&self, request: &ListRequest) -> Result<(Vec<T>, u64)> {
        let stamp = self
            .inner
            .options
            .cache_buster
            .then(|| Utc::now().timestamp_millis());

        let response = self
            .authorized(Fetch::get(&self.inner.client, &self.inner.resource_url))
            .query(request.to_params(stamp))
            .execute_with_headers::<Vec<T>>()
            .await?;

        let total_items = match response.header("x-total-count") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::invalid_header(format!("x-total-count: {:?}", raw)))?,
            None => response.data.len() as u64,
        };

        Ok((response.data, total_items))
    }

    /// Re-fetch the first page after a mutation without blocking the caller
    fn spawn_refetch(&self) {
        let token = self.inner.background.child_token();
        if token.is_cancelled() {
            return;
        }

        let this = self.clone();
        tokio::spawn(async move {
            let options = &this.inner.options;
            let request = ListRequest::first_page(options.page_size, options.default_sort.as_deref());

            this.inner
                .store
                .dispatch(Action::ListPending { background: true })
                .await;

            let outcome = tokio::select! {
                _ = token.cancelled() => None,
                result = this.request_page(&request) => Some(result),
            };

            match outcome {
                Some(Ok((entities, total_items))) => {
                    this.inner
                        .store
                        .dispatch(Action::ListFulfilled {
                            entities,
                            total_items,
                        })
                        .await;
                }
                Some(Err(e)) => this.reject(&e, true).await,
                None => {
                    debug!("{} re-fetch cancelled", T::NAME);
                    this.inner.store.dispatch(Action::Cancelled).await;
                }
            }
        });
    }

    async fn reject(&self, error: &Error, background: bool) {
        warn!("{} request failed: {}", T::NAME, error);
        self.inner
            .store
            .dispatch(Action::Rejected {
                message: error.to_string(),
                background,
            })
            .await;
    }

    fn authorized<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        fetch.bearer_auth(self.inner.options.token.as_deref())
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}/{}", self.inner.resource_url, id)
    }

    fn alert_from(&self, headers: &HeaderMap) -> Option<Alert> {
        let read = |name: String| {
            headers
                .get(name.as_str())
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        read(self.inner.options.alert_header()).map(|key| Alert {
            key,
            param: read(self.inner.options.alert_params_header()),
        })
    }
}
