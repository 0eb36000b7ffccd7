//! Factions competing over the galaxy

use serde::{Deserialize, Serialize};

use crate::core::types::FactionId;

/// A faction taking part in the campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
}

/// Catalog of all factions in the campaign
///
/// The economy and transaction layers consult this for existence checks;
/// a purchase on behalf of an unregistered faction is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionCatalog {
    factions: Vec<Faction>,
    next_faction_id: u32,
}

impl FactionCatalog {
    pub fn new() -> Self {
        Self {
            factions: Vec::new(),
            next_faction_id: 1,
        }
    }

    /// Register a new faction
    pub fn add_faction(&mut self, name: impl Into<String>) -> FactionId {
        let id = FactionId(self.next_faction_id);
        self.next_faction_id += 1;
        self.factions.push(Faction {
            id,
            name: name.into(),
        });
        id
    }

    pub fn get(&self, id: FactionId) -> Option<&Faction> {
        self.factions.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FactionId) -> bool {
        self.factions.iter().any(|f| f.id == id)
    }

    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }
}

impl Default for FactionCatalog {
    fn default() -> Self {
        Self::new()
    }
}
