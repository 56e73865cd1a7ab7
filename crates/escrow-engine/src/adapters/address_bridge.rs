//! Address Bridge Adapter
//!
//! One-to-one, append-only mapping between origin and destination
//! identifiers.

use crate::domain::{DestinationAddress, EscrowError, OriginAddress};
use crate::ports::outbound::AddressBridge;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct Maps {
    forward: HashMap<OriginAddress, DestinationAddress>,
    reverse: HashMap<DestinationAddress, OriginAddress>,
}

/// In-memory address bridge.
#[derive(Default)]
pub struct InMemoryAddressBridge {
    maps: RwLock<Maps>,
}

impl InMemoryAddressBridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        self.maps.read().forward.len()
    }

    /// True when nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn conflict(identifier: impl ToString, existing: impl ToString) -> EscrowError {
    EscrowError::AddressMappingConflict {
        identifier: identifier.to_string(),
        existing: existing.to_string(),
    }
}

impl AddressBridge for InMemoryAddressBridge {
    fn map_all(&self, pairs: &[(OriginAddress, DestinationAddress)]) -> Result<(), EscrowError> {
        let mut maps = self.maps.write();

        // Validate the whole batch, including pairs within it, before writing.
        let mut staged = Maps::default();
        for (origin, destination) in pairs {
            let bound_dst = maps.forward.get(origin).or_else(|| staged.forward.get(origin));
            if let Some(existing) = bound_dst {
                if existing != destination {
                    return Err(conflict(origin, existing));
                }
            }
            let bound_org = maps
                .reverse
                .get(destination)
                .or_else(|| staged.reverse.get(destination));
            if let Some(existing) = bound_org {
                if existing != origin {
                    return Err(conflict(destination, existing));
                }
            }
            staged.forward.insert(*origin, *destination);
            staged.reverse.insert(*destination, *origin);
        }

        for (origin, destination) in staged.forward {
            if maps.forward.insert(origin, destination).is_none() {
                debug!(%origin, %destination, "[escrow] Address mapped");
            }
            maps.reverse.insert(destination, origin);
        }
        Ok(())
    }

    fn resolve_to_destination(
        &self,
        origin: &OriginAddress,
    ) -> Result<DestinationAddress, EscrowError> {
        self.maps
            .read()
            .forward
            .get(origin)
            .copied()
            .ok_or_else(|| EscrowError::AddressMappingMissing(origin.to_string()))
    }

    fn resolve_to_origin(
        &self,
        destination: &DestinationAddress,
    ) -> Result<OriginAddress, EscrowError> {
        self.maps
            .read()
            .reverse
            .get(destination)
            .copied()
            .ok_or_else(|| EscrowError::AddressMappingMissing(destination.to_string()))
    }
}
