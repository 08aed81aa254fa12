use std::sync::{PoisonError, RwLock};

use hashbrown::HashMap;
use uuid::Uuid;

use super::request::RouteRequest;
use crate::Error;

/// Persistence collaborator for route requests.
///
/// The engine calls `save` after submission and after the terminal
/// transition; status polling is the collaborator's `load`. Durable
/// storage and its serialization format live outside this crate.
pub trait RequestStore {
    /// Records the request under its id, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Implementations surface storage failures as
    /// [`Error::InvalidData`].
    fn save(&self, request: &RouteRequest) -> Result<(), Error>;

    /// Loads a request by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids.
    fn load(&self, id: Uuid) -> Result<RouteRequest, Error>;
}

/// In-memory store, a stand-in for the durable collaborator in tests
/// and examples.
#[derive(Debug, Default)]
pub struct MemoryStore {
    requests: RwLock<HashMap<Uuid, RouteRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestStore for MemoryStore {
    fn save(&self, request: &RouteRequest) -> Result<(), Error> {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request.id(), request.clone());
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<RouteRequest, Error> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::submit;
    use crate::model::Coordinate;

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let request = submit(
            Coordinate::new(0.0, 0.0).unwrap(),
            Coordinate::new(1.0, 1.0).unwrap(),
        )
        .unwrap();

        store.save(&request).unwrap();
        let loaded = store.load(request.id()).unwrap();
        assert_eq!(loaded, request);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.load(id), Err(Error::NotFound(found)) if found == id));
    }

    #[test]
    fn save_replaces_the_previous_record() {
        let store = MemoryStore::new();
        let request = submit(
            Coordinate::new(0.0, 0.0).unwrap(),
            Coordinate::new(1.0, 1.0).unwrap(),
        )
        .unwrap();
        store.save(&request).unwrap();

        let failed = request.clone().into_error("no path".to_string());
        store.save(&failed).unwrap();
        assert_eq!(store.load(request.id()).unwrap(), failed);
    }
}
