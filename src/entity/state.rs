//! Entity state container and the transitions applied to it

/// State held for one entity type
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState<T> {
    /// A list or fetch-one request is in flight
    pub loading: bool,
    /// Message of the last failed operation
    pub error_message: Option<String>,
    /// Current page of the collection, in server order
    pub entities: Vec<T>,
    /// Currently loaded record, the empty record when none is loaded
    pub entity: T,
    /// A mutation is in flight
    pub updating: bool,
    /// Collection size reported by the server
    pub total_items: u64,
    /// The last mutation completed without error
    pub update_success: bool,
    /// Alert key sent by the server with the last successful mutation
    pub alert: Option<Alert>,
}

impl<T: Default> Default for EntityState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error_message: None,
            entities: Vec::new(),
            entity: T::default(),
            updating: false,
            total_items: 0,
            update_success: false,
            alert: None,
        }
    }
}

/// Server notification attached to a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Message key, e.g. `shoesApp.size.created`
    pub key: String,
    /// Parameter for the message, usually the record id
    pub param: Option<String>,
}

/// Transitions dispatched by the controller
#[derive(Debug, Clone)]
pub enum Action<T> {
    /// A list request started; `background` re-fetches keep mutation markers
    ListPending { background: bool },
    ListFulfilled { entities: Vec<T>, total_items: u64 },
    FetchPending,
    FetchFulfilled(T),
    MutationPending,
    /// Create, update or partial update resolved with the server's record
    MutationFulfilled { entity: T, alert: Option<Alert> },
    DeleteFulfilled { alert: Option<Alert> },
    Rejected { message: String, background: bool },
    /// A background re-fetch was cancelled before it resolved
    Cancelled,
    Reset,
}

impl<T: Default> EntityState<T> {
    /// Apply one transition
    pub fn reduce(&mut self, action: Action<T>) {
        match action {
            Action::ListPending { background: true } => {
                self.loading = true;
            }
            Action::ListPending { background: false } | Action::FetchPending => {
                self.error_message = None;
                self.update_success = false;
                self.loading = true;
            }
            Action::ListFulfilled {
                entities,
                total_items,
            } => {
                self.loading = false;
                self.entities = entities;
                self.total_items = total_items;
            }
            Action::FetchFulfilled(entity) => {
                self.loading = false;
                self.entity = entity;
            }
            Action::MutationPending => {
                self.error_message = None;
                self.update_success = false;
                self.updating = true;
                self.alert = None;
            }
            Action::MutationFulfilled { entity, alert } => {
                self.updating = false;
                self.loading = false;
                self.update_success = true;
                self.entity = entity;
                self.alert = alert;
            }
            Action::DeleteFulfilled { alert } => {
                self.updating = false;
                self.update_success = true;
                self.entity = T::default();
                self.alert = alert;
            }
            Action::Rejected {
                message,
                background,
            } => {
                self.loading = false;
                self.error_message = Some(message);
                if !background {
                    self.updating = false;
                    self.update_success = false;
                }
            }
            Action::Cancelled => {
                self.loading = false;
            }
            Action::Reset => *self = Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Rec {
        id: Option<i64>,
        name: Option<String>,
    }

    fn rec(id: i64, name: &str) -> Rec {
        Rec {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn list_cycle_replaces_collection_and_total() {
        let mut state = EntityState::<Rec>::default();
        state.error_message = Some("old".to_string());
        state.update_success = true;

        state.reduce(Action::ListPending { background: false });
        assert!(state.loading);
        assert!(state.error_message.is_none());
        assert!(!state.update_success);

        state.reduce(Action::ListFulfilled {
            entities: vec![rec(1, "EU 41"), rec(2, "EU 42")],
            total_items: 12,
        });
        assert!(!state.loading);
        assert_eq!(state.entities.len(), 2);
        assert_eq!(state.total_items, 12);
    }

    #[test]
    fn mutation_success_sets_marker_and_entity() {
        let mut state = EntityState::<Rec>::default();
        state.reduce(Action::MutationPending);
        assert!(state.updating);

        state.reduce(Action::MutationFulfilled {
            entity: rec(7, "EU 42"),
            alert: Some(Alert {
                key: "shoesApp.size.created".to_string(),
                param: Some("7".to_string()),
            }),
        });
        assert!(!state.updating);
        assert!(state.update_success);
        assert_eq!(state.entity, rec(7, "EU 42"));
        assert_eq!(state.alert.as_ref().map(|a| a.key.as_str()), Some("shoesApp.size.created"));
    }

    #[test]
    fn background_refetch_keeps_success_marker() {
        let mut state = EntityState::<Rec>::default();
        state.reduce(Action::MutationPending);
        state.reduce(Action::MutationFulfilled {
            entity: rec(7, "EU 42"),
            alert: None,
        });

        state.reduce(Action::ListPending { background: true });
        assert!(state.update_success);
        state.reduce(Action::Rejected {
            message: "boom".to_string(),
            background: true,
        });
        assert!(state.update_success);
        assert!(!state.loading);
        assert_eq!(state.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn delete_clears_entity() {
        let mut state = EntityState::<Rec>::default();
        state.reduce(Action::FetchFulfilled(rec(3, "EU 40")));
        state.reduce(Action::MutationPending);
        state.reduce(Action::DeleteFulfilled { alert: None });
        assert_eq!(state.entity, Rec::default());
        assert!(state.update_success);
        assert!(!state.updating);
    }

    #[test]
    fn failure_clears_flags_and_keeps_collection() {
        let mut state = EntityState::<Rec>::default();
        state.reduce(Action::ListFulfilled {
            entities: vec![rec(1, "EU 41")],
            total_items: 1,
        });
        state.reduce(Action::FetchPending);
        state.reduce(Action::Rejected {
            message: "Not found".to_string(),
            background: false,
        });
        assert!(!state.loading);
        assert!(!state.updating);
        assert!(!state.update_success);
        assert_eq!(state.entities, vec![rec(1, "EU 41")]);
        assert_eq!(state.error_message.as_deref(), Some("Not found"));
    }

    #[test]
    fn reset_restores_initial_shape() {
        let mut state = EntityState::<Rec>::default();
        state.reduce(Action::FetchFulfilled(rec(3, "EU 40")));
        state.reduce(Action::Reset);
        assert_eq!(state, EntityState::default());
    }
}
