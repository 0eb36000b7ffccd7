//! Ships stationed at planets
//!
//! Ships are created by shop purchases (`deploy_ship`, rapid deployment)
//! and lost to razed planets. They carry no movement logic of their own;
//! the GM moves them between planets via the connectivity queries.

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, PlanetId, ShipId};

/// A ship stationed at a planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub faction: FactionId,
    pub station: PlanetId,
}

/// All ships in the campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetRegistry {
    ships: Vec<Ship>,
    next_ship_id: u32,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self {
            ships: Vec::new(),
            next_ship_id: 1,
        }
    }

    /// Commission a new ship at the given planet
    pub fn deploy(
        &mut self,
        name: impl Into<String>,
        faction: FactionId,
        station: PlanetId,
    ) -> ShipId {
        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;
        self.ships.push(Ship {
            id,
            name: name.into(),
            faction,
            station,
        });
        id
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    /// Move a ship to a new station, returning whether the ship exists
    pub fn restation(&mut self, id: ShipId, station: PlanetId) -> bool {
        if let Some(ship) = self.ships.iter_mut().find(|s| s.id == id) {
            ship.station = station;
            true
        } else {
            false
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ships_at(&self, planet: PlanetId) -> Vec<&Ship> {
        self.ships.iter().filter(|s| s.station == planet).collect()
    }

    pub fn ships_of(&self, faction: FactionId) -> Vec<&Ship> {
        self.ships.iter().filter(|s| s.faction == faction).collect()
    }

    /// Remove every ship stationed at a planet (used when a planet is razed)
    pub fn scuttle_at(&mut self, planet: PlanetId) -> usize {
        let before = self.ships.len();
        self.ships.retain(|s| s.station != planet);
        before - self.ships.len()
    }
}

impl Default for FleetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_and_query() {
        let mut fleet = FleetRegistry::new();
        let id = fleet.deploy("Hammer of Dawn", FactionId(1), PlanetId(3));
        assert_eq!(fleet.get(id).unwrap().station, PlanetId(3));
        assert_eq!(fleet.ships_at(PlanetId(3)).len(), 1);
        assert_eq!(fleet.ships_of(FactionId(1)).len(), 1);
        assert!(fleet.ships_of(FactionId(2)).is_empty());
    }

    #[test]
    fn test_restation() {
        let mut fleet = FleetRegistry::new();
        let id = fleet.deploy("Spear of Truth", FactionId(1), PlanetId(3));
        assert!(fleet.restation(id, PlanetId(5)));
        assert_eq!(fleet.get(id).unwrap().station, PlanetId(5));
        assert!(!fleet.restation(ShipId(99), PlanetId(5)));
    }

    #[test]
    fn test_scuttle_at() {
        let mut fleet = FleetRegistry::new();
        fleet.deploy("One", FactionId(1), PlanetId(3));
        fleet.deploy("Two", FactionId(2), PlanetId(3));
        fleet.deploy("Three", FactionId(1), PlanetId(4));
        assert_eq!(fleet.scuttle_at(PlanetId(3)), 2);
        assert_eq!(fleet.ships().len(), 1);
    }
}
