use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::types::{Action, ActionCategory, ActionUpdate};

/// Known actions keyed by id, plus a category index maintained on every mutation.
///
/// Both live behind one lock so readers never observe the index out of step
/// with the primary map.
pub struct ActionCatalog {
    state: RwLock<CatalogState>,
}

#[derive(Default)]
struct CatalogState {
    actions: IndexMap<String, Action>,
    by_category: HashMap<ActionCategory, Vec<String>>,
}

impl CatalogState {
    fn insert(&mut self, action: Action) {
        if let Some(prev) = self.actions.get(&action.id) {
            if prev.category != action.category {
                let prev_category = prev.category;
                self.unindex(prev_category, &action.id);
            }
        }
        let bucket = self.by_category.entry(action.category).or_default();
        if !bucket.iter().any(|id| id == &action.id) {
            bucket.push(action.id.clone());
        }
        self.actions.insert(action.id.clone(), action);
    }

    fn unindex(&mut self, category: ActionCategory, id: &str) {
        if let Some(bucket) = self.by_category.get_mut(&category) {
            bucket.retain(|existing| existing != id);
            if bucket.is_empty() {
                self.by_category.remove(&category);
            }
        }
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ActionCatalog {
    pub fn new(actions: Vec<Action>) -> Self {
        let catalog = Self {
            state: RwLock::new(CatalogState::default()),
        };
        catalog.register_all(actions);
        catalog
    }

    /// Inserts or replaces by id. A replaced action keeps its position.
    pub fn register(&self, action: Action) {
        tracing::debug!(action_id = %action.id, category = ?action.category, "registering action");
        self.state.write().insert(action);
    }

    pub fn register_all(&self, actions: Vec<Action>) {
        let mut state = self.state.write();
        for action in actions {
            state.insert(action);
        }
    }

    pub fn get(&self, id: &str) -> Option<Action> {
        self.state.read().actions.get(id).cloned()
    }

    pub fn all(&self) -> Vec<Action> {
        self.state.read().actions.values().cloned().collect()
    }

    pub fn by_category(&self, category: ActionCategory) -> Vec<Action> {
        let state = self.state.read();
        state
            .by_category
            .get(&category)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.actions.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Actions owned by `team_id` plus every global action.
    pub fn by_team(&self, team_id: &str) -> Vec<Action> {
        self.state
            .read()
            .actions
            .values()
            .filter(|a| a.team.as_deref().map_or(true, |t| t == team_id))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match on id, name, or description.
    pub fn search(&self, query: &str) -> Vec<Action> {
        let query = query.to_lowercase();
        self.state
            .read()
            .actions
            .values()
            .filter(|a| {
                a.id.to_lowercase().contains(&query)
                    || a.name.to_lowercase().contains(&query)
                    || a.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut state = self.state.write();
        let Some(action) = state.actions.shift_remove(id) else {
            return false;
        };
        state.unindex(action.category, id);
        tracing::debug!(action_id = id, "removed action");
        true
    }

    /// Merges `update` into the action. A changed category moves the action to
    /// the end of its new index bucket.
    pub fn update(&self, id: &str, update: ActionUpdate) -> bool {
        let mut state = self.state.write();
        let Some(existing) = state.actions.get(id) else {
            return false;
        };
        let mut updated = existing.clone();
        update.apply_to(&mut updated);
        // The id is the key; a patch cannot rename it.
        updated.id = id.to_string();

        state.insert(updated);
        tracing::debug!(action_id = id, "updated action");
        true
    }

    pub fn count(&self) -> usize {
        self.state.read().actions.len()
    }

    pub fn categories(&self) -> BTreeSet<ActionCategory> {
        self.state.read().by_category.keys().copied().collect()
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.actions.clear();
        state.by_category.clear();
    }

    pub fn export(&self) -> Vec<Action> {
        self.all()
    }

    /// Registers `actions`, first dropping everything when `replace` is set.
    pub fn import(&self, actions: Vec<Action>, replace: bool) {
        let mut state = self.state.write();
        if replace {
            state.actions.clear();
            state.by_category.clear();
        }
        for action in actions {
            state.insert(action);
        }
    }

    /// Checks that every action sits in exactly one bucket matching its
    /// category and that no bucket is empty or refers to a missing action.
    pub fn index_is_consistent(&self) -> bool {
        let state = self.state.read();
        let indexed: usize = state.by_category.values().map(Vec::len).sum();
        if indexed != state.actions.len() {
            return false;
        }
        state.by_category.iter().all(|(category, ids)| {
            !ids.is_empty()
                && ids.iter().all(|id| {
                    state
                        .actions
                        .get(id)
                        .is_some_and(|a| a.category == *category)
                })
                && ids.iter().collect::<BTreeSet<_>>().len() == ids.len()
        })
    }
}
