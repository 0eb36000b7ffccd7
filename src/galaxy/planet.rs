//! Planets and the galaxy map
//!
//! Planets are the nodes of the campaign: they carry an owner, a type with a
//! per-turn yield table, harvest modifiers, and the static connection edges
//! of the travel graph.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, PlanetId, ResourceId};

/// Planet classification affecting per-turn harvest yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    Forge,
    Hive,
    Agri,
    Mining,
    Shrine,
    Fortress,
    Cursed,
    WarTorn,
    Corrupted,
    Destroyed,
}

impl PlanetType {
    /// Base per-turn yield for a planet of this type
    ///
    /// Negative entries drain the owner's wallet each turn; holding a
    /// cursed or corrupted world is a liability, not an asset.
    pub fn base_yield(&self) -> Vec<(ResourceId, i64)> {
        let table: &[(&str, i64)] = match self {
            Self::Forge => &[("materiel", 4), ("requisition", 1)],
            Self::Hive => &[("requisition", 4)],
            Self::Agri => &[("requisition", 2), ("materiel", 1)],
            Self::Mining => &[("materiel", 3), ("promethium", 2)],
            Self::Shrine => &[("requisition", 3)],
            Self::Fortress => &[("requisition", 1), ("materiel", 1)],
            Self::Cursed => &[("requisition", -2)],
            Self::WarTorn => &[("requisition", -1), ("materiel", -1)],
            Self::Corrupted => &[("requisition", -2), ("materiel", -1)],
            Self::Destroyed => &[],
        };
        table
            .iter()
            .map(|(id, amount)| (ResourceId::from(*id), *amount))
            .collect()
    }
}

impl Default for PlanetType {
    fn default() -> Self {
        Self::Hive
    }
}

/// Per-planet adjustments applied to the base yield during harvest
///
/// Canonical combination order: flat adds, then percentage multiply,
/// then doubling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestModifiers {
    /// Flat amount added to every yield entry (mining upgrades)
    pub flat_bonus: i64,
    /// Percentage added to every yield entry (trade hubs); 25 = +25%
    pub trade_bonus_pct: i64,
    /// Doubles every yield entry after the other modifiers (elite training)
    pub double_output: bool,
}

/// A planet on the galaxy map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub planet_type: PlanetType,
    pub owner: Option<FactionId>,
    /// Stockpiled resources sitting on the planet itself (loot, relics)
    pub resources: AHashMap<ResourceId, i64>,
    /// Static travel edges; kept symmetric by the registry
    pub connections: Vec<PlanetId>,
    pub in_battle: bool,
    pub modifiers: HarvestModifiers,
    defence: i64,
    production: i64,
}

impl Planet {
    pub fn new(id: PlanetId, name: String, planet_type: PlanetType) -> Self {
        Self {
            id,
            name,
            planet_type,
            owner: None,
            resources: AHashMap::new(),
            connections: Vec::new(),
            in_battle: false,
            modifiers: HarvestModifiers::default(),
            defence: 0,
            production: 0,
        }
    }

    pub fn with_owner(mut self, owner: FactionId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_defence(mut self, defence: i64) -> Self {
        self.defence = defence.max(0);
        self
    }

    pub fn with_production(mut self, production: i64) -> Self {
        self.production = production.max(0);
        self
    }

    pub fn set_owner(&mut self, owner: Option<FactionId>) {
        self.owner = owner;
    }

    pub fn set_battle_status(&mut self, in_battle: bool) {
        self.in_battle = in_battle;
    }

    pub fn defence(&self) -> i64 {
        self.defence
    }

    /// Set the defence value, clamped at zero
    pub fn set_defence(&mut self, defence: i64) {
        self.defence = defence.max(0);
    }

    pub fn production(&self) -> i64 {
        self.production
    }

    /// Set the production value, clamped at zero
    pub fn set_production(&mut self, production: i64) {
        self.production = production.max(0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.planet_type == PlanetType::Destroyed
    }

    pub fn is_connected(&self, other: PlanetId) -> bool {
        self.connections.contains(&other)
    }

    /// Add a travel edge; no-op when the edge exists or targets self
    pub fn add_connection(&mut self, other: PlanetId) {
        if other != self.id && !self.connections.contains(&other) {
            self.connections.push(other);
        }
    }

    /// Remove a travel edge, returning whether one was present
    pub fn remove_connection(&mut self, other: PlanetId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|&c| c != other);
        self.connections.len() < before
    }
}

/// The galaxy map containing all planets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetRegistry {
    planets: Vec<Planet>,
    next_planet_id: u32,
}

impl PlanetRegistry {
    pub fn new() -> Self {
        Self {
            planets: Vec::new(),
            next_planet_id: 1,
        }
    }

    /// Add a planet to the galaxy
    pub fn add_planet(&mut self, name: impl Into<String>, planet_type: PlanetType) -> PlanetId {
        let id = PlanetId(self.next_planet_id);
        self.next_planet_id += 1;
        self.planets.push(Planet::new(id, name.into(), planet_type));
        id
    }

    pub fn get(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlanetId) -> bool {
        self.planets.iter().any(|p| p.id == id)
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    /// All planets owned by the given faction
    pub fn owned_by(&self, faction: FactionId) -> Vec<&Planet> {
        self.planets
            .iter()
            .filter(|p| p.owner == Some(faction))
            .collect()
    }

    /// Number of planets under any faction's control
    pub fn claimed_count(&self) -> usize {
        self.planets.iter().filter(|p| p.owner.is_some()).count()
    }

    /// Destroy a planet: clear its owner, wipe its yields, and drop every
    /// travel edge touching it (both directions)
    pub fn raze(&mut self, id: PlanetId) {
        for planet in &mut self.planets {
            if planet.id == id {
                planet.planet_type = PlanetType::Destroyed;
                planet.owner = None;
                planet.in_battle = false;
                planet.modifiers = HarvestModifiers::default();
                planet.set_defence(0);
                planet.set_production(0);
                planet.resources.clear();
                planet.connections.clear();
            } else {
                planet.remove_connection(id);
            }
        }
    }
}

impl Default for PlanetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
