//! Actor-id resolution.

use std::collections::BTreeMap;

use crate::{AddressError, FilAddress};

/// Lookup service mapping actor ids to addresses and back.
///
/// Implemented by whatever talks to the chain; `Ok(None)` is a normal answer
/// meaning the actor has no such address.
pub trait ActorDirectory {
    /// Delegated address of `actor_id`, if it has one.
    fn lookup_delegated_address(&self, actor_id: u64) -> Result<Option<FilAddress>, AddressError>;

    /// Actor id an address refers to, if any.
    fn resolve_address(&self, address: &FilAddress) -> Result<Option<u64>, AddressError>;
}

/// Looks up the delegated address of an actor.
///
/// An actor can exist without a delegated address; that case is `Ok(None)`,
/// not an error.
pub fn resolve<D: ActorDirectory + ?Sized>(
    directory: &D,
    actor_id: u64,
) -> Result<Option<FilAddress>, AddressError> {
    directory.lookup_delegated_address(actor_id)
}

/// Directory backed by a map, for tests and offline tooling.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    actors: BTreeMap<u64, Option<FilAddress>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor, optionally with a delegated address.
    pub fn insert(&mut self, actor_id: u64, delegated: Option<FilAddress>) {
        self.actors.insert(actor_id, delegated);
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl ActorDirectory for InMemoryDirectory {
    fn lookup_delegated_address(&self, actor_id: u64) -> Result<Option<FilAddress>, AddressError> {
        Ok(self.actors.get(&actor_id).cloned().flatten())
    }

    fn resolve_address(&self, address: &FilAddress) -> Result<Option<u64>, AddressError> {
        if let FilAddress::Id(id) = address {
            return Ok(self.actors.contains_key(id).then_some(*id));
        }
        let canonical = FilAddress::from_bytes(&address.to_bytes())?;
        Ok(self
            .actors
            .iter()
            .find(|(_, delegated)| delegated.as_ref() == Some(&canonical))
            .map(|(id, _)| *id))
    }
}
