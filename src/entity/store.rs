//! Single-writer store task owning an entity state

use log::{trace, warn};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};

use crate::entity::state::{Action, EntityState};

struct Envelope<T> {
    action: Action<T>,
    ack: oneshot::Sender<()>,
}

/// Handle to a store task.
///
/// Actions are applied in the order they are received by the task, which is
/// the only writer of the state. Readers get snapshots through `watch`.
pub(crate) struct Store<T> {
    name: &'static str,
    actions: mpsc::UnboundedSender<Envelope<T>>,
    snapshots: watch::Receiver<EntityState<T>>,
}

impl<T> Store<T>
where
    T: Default + Send + Sync + 'static,
{
    /// Spawn the store task on the given runtime
    pub(crate) fn spawn(runtime: &Handle, name: &'static str) -> Self {
        let (actions, mut inbox) = mpsc::unbounded_channel::<Envelope<T>>();
        let (publisher, snapshots) = watch::channel(EntityState::<T>::default());

        runtime.spawn(async move {
            while let Some(Envelope { action, ack }) = inbox.recv().await {
                publisher.send_modify(|state| state.reduce(action));
                let _ = ack.send(());
            }
            trace!("{} store closed", name);
        });

        Self {
            name,
            actions,
            snapshots,
        }
    }

    /// Send an action and wait until the store has applied it
    pub(crate) async fn dispatch(&self, action: Action<T>) {
        let (ack, applied) = oneshot::channel();
        if self.actions.send(Envelope { action, ack }).is_err() {
            warn!("{} store is gone, action dropped", self.name);
            return;
        }
        let _ = applied.await;
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<EntityState<T>> {
        self.snapshots.clone()
    }
}

impl<T: Clone> Store<T> {
    pub(crate) fn snapshot(&self) -> EntityState<T> {
        self.snapshots.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatch_is_visible_once_awaited() {
        let store = Store::<Option<i64>>::spawn(&Handle::current(), "test");
        store.dispatch(Action::FetchPending).await;
        assert!(store.snapshot().loading);

        store.dispatch(Action::FetchFulfilled(Some(4))).await;
        let state = store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.entity, Some(4));
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let store = Store::<Option<i64>>::spawn(&Handle::current(), "test");
        let mut rx = store.subscribe();
        store.dispatch(Action::MutationPending).await;
        rx.changed().await.unwrap();
        assert!(rx.borrow().updating);
    }
}
