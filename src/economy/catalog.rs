//! Shop and stratagem catalog
//!
//! Definitions of everything a faction can spend resources on. Items are
//! one-shot purchases; stratagems are cooldown-gated special actions.
//! Each definition carries a tagged effect that selects its resolver in
//! the transaction engine.

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceId;

/// A resource the campaign economy recognises
///
/// The catalog exists for display and validation only; wallets and yield
/// tables accept any id, and unknown ids simply read as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    pub id: ResourceId,
    pub name: String,
}

/// The enumerable resource ids of the campaign
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: Vec<ResourceDef>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard resource set
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for (id, name) in [
            ("requisition", "Requisition"),
            ("materiel", "Materiel"),
            ("promethium", "Promethium"),
            ("archeotech", "Archeotech"),
        ] {
            catalog.add(ResourceDef {
                id: ResourceId::from(id),
                name: name.to_string(),
            });
        }
        catalog
    }

    pub fn add(&mut self, resource: ResourceDef) {
        self.resources.push(resource);
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.resources.iter().any(|r| &r.id == id)
    }

    pub fn resources(&self) -> &[ResourceDef] {
        &self.resources
    }
}

/// Which planets a targeted purchase may legally point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRule {
    /// Target must be owned by the buying faction
    OwnPlanet,
    /// Target must NOT be owned by the buying faction (sabotage and kin)
    EnemyPlanet,
    /// Any intact planet will do
    AnyPlanet,
}

/// The concrete effect a purchase resolves to, one variant per catalog id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Commission a ship at the target planet
    DeployShip,
    /// Two-phase warp lane: first purchase anchors, completion links
    WarpBeacon,
    /// Permanent flat yield bonus on the target planet
    MiningUpgrade { bonus: i64 },
    /// Permanent percentage yield bonus on the target planet
    TradeHub { bonus_pct: i64 },
    /// Doubles the target planet's yields
    EliteTraining,
    /// Raises the target planet's defence value
    PlanetaryShield { strength: i64 },
    /// Lowers an enemy planet's defence value
    Sabotage { damage: i64 },
    /// Lowers an enemy planet's production value
    Infiltrate { disruption: i64 },
    /// Razes an enemy planet outright
    SuperWeapon,
    /// Lowers an enemy planet's defence and marks it embattled
    OrbitalBombardment { damage: i64 },
    /// Commission a ship anywhere, friend or foe
    RapidDeployment,
    /// Immediate resource windfall; the target world turns corrupted
    DarkPact { windfall: i64 },
}

/// A one-shot shop purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    /// Every entry must be met for the purchase to go through
    pub cost: Vec<(ResourceId, i64)>,
    pub target_required: bool,
    pub target_rule: TargetRule,
    pub effect: ItemEffect,
}

/// A cooldown-gated special action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stratagem {
    pub id: String,
    pub name: String,
    pub cost: Vec<(ResourceId, i64)>,
    pub target_required: bool,
    pub target_rule: TargetRule,
    /// Minimum turns between uses by the same faction
    pub cooldown: u32,
    pub effect: ItemEffect,
}

/// Catalog of all purchasable items and stratagems
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<ShopItem>,
    stratagems: Vec<Stratagem>,
}

fn cost(entries: &[(&str, i64)]) -> Vec<(ResourceId, i64)> {
    entries
        .iter()
        .map(|(id, amount)| (ResourceId::from(*id), *amount))
        .collect()
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard campaign catalog
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add_item(ShopItem {
            id: "deploy_ship".into(),
            name: "Deploy Ship".into(),
            cost: cost(&[("requisition", 3), ("materiel", 1)]),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            effect: ItemEffect::DeployShip,
        });
        catalog.add_item(ShopItem {
            id: "warp_beacon".into(),
            name: "Warp Beacon".into(),
            cost: cost(&[("requisition", 5), ("archeotech", 1)]),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            effect: ItemEffect::WarpBeacon,
        });
        catalog.add_item(ShopItem {
            id: "mining_upgrade".into(),
            name: "Mining Upgrade".into(),
            cost: cost(&[("materiel", 4)]),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            effect: ItemEffect::MiningUpgrade { bonus: 1 },
        });
        catalog.add_item(ShopItem {
            id: "trade_hub".into(),
            name: "Trade Hub".into(),
            cost: cost(&[("requisition", 6)]),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            effect: ItemEffect::TradeHub { bonus_pct: 25 },
        });
        catalog.add_item(ShopItem {
            id: "elite_training".into(),
            name: "Elite Training Cadre".into(),
            cost: cost(&[("requisition", 4), ("materiel", 2)]),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            effect: ItemEffect::EliteTraining,
        });
        catalog.add_item(ShopItem {
            id: "planetary_shield".into(),
            name: "Planetary Shield".into(),
            cost: cost(&[("materiel", 5)]),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            effect: ItemEffect::PlanetaryShield { strength: 3 },
        });
        catalog.add_item(ShopItem {
            id: "sabotage".into(),
            name: "Sabotage".into(),
            cost: cost(&[("requisition", 4)]),
            target_required: true,
            target_rule: TargetRule::EnemyPlanet,
            effect: ItemEffect::Sabotage { damage: 2 },
        });
        catalog.add_item(ShopItem {
            id: "infiltrate".into(),
            name: "Infiltrate".into(),
            cost: cost(&[("requisition", 3)]),
            target_required: true,
            target_rule: TargetRule::EnemyPlanet,
            effect: ItemEffect::Infiltrate { disruption: 2 },
        });
        catalog.add_item(ShopItem {
            id: "super_weapon".into(),
            name: "Exterminatus Device".into(),
            cost: cost(&[("requisition", 10), ("archeotech", 2)]),
            target_required: true,
            target_rule: TargetRule::EnemyPlanet,
            effect: ItemEffect::SuperWeapon,
        });

        catalog.add_stratagem(Stratagem {
            id: "orbital_shield".into(),
            name: "Orbital Shield".into(),
            cost: cost(&[("requisition", 2)]),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            cooldown: 3,
            effect: ItemEffect::PlanetaryShield { strength: 2 },
        });
        catalog.add_stratagem(Stratagem {
            id: "orbital_bombardment".into(),
            name: "Orbital Bombardment".into(),
            cost: cost(&[("requisition", 3), ("promethium", 1)]),
            target_required: true,
            target_rule: TargetRule::EnemyPlanet,
            cooldown: 4,
            effect: ItemEffect::OrbitalBombardment { damage: 2 },
        });
        catalog.add_stratagem(Stratagem {
            id: "rapid_deployment".into(),
            name: "Rapid Deployment".into(),
            cost: cost(&[("requisition", 4), ("materiel", 1)]),
            target_required: true,
            target_rule: TargetRule::AnyPlanet,
            cooldown: 5,
            effect: ItemEffect::RapidDeployment,
        });
        catalog.add_stratagem(Stratagem {
            id: "dark_pact".into(),
            name: "Dark Pact".into(),
            cost: Vec::new(),
            target_required: true,
            target_rule: TargetRule::OwnPlanet,
            cooldown: 6,
            effect: ItemEffect::DarkPact { windfall: 8 },
        });

        catalog
    }

    pub fn add_item(&mut self, item: ShopItem) {
        self.items.push(item);
    }

    pub fn add_stratagem(&mut self, stratagem: Stratagem) {
        self.stratagems.push(stratagem);
    }

    pub fn item(&self, id: &str) -> Option<&ShopItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn stratagem(&self, id: &str) -> Option<&Stratagem> {
        self.stratagems.iter().find(|s| s.id == id)
    }

    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn stratagems(&self) -> &[Stratagem] {
        &self.stratagems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookups() {
        let catalog = ItemCatalog::with_defaults();
        assert!(catalog.item("deploy_ship").is_some());
        assert!(catalog.item("warp_beacon").is_some());
        assert!(catalog.item("nonexistent").is_none());
        assert!(catalog.stratagem("orbital_shield").is_some());
        assert!(catalog.stratagem("deploy_ship").is_none());
    }

    #[test]
    fn test_hostile_items_target_enemy_planets() {
        let catalog = ItemCatalog::with_defaults();
        for id in ["sabotage", "infiltrate", "super_weapon"] {
            let item = catalog.item(id).unwrap();
            assert_eq!(item.target_rule, TargetRule::EnemyPlanet, "{id}");
        }
    }

    #[test]
    fn test_every_default_entry_requires_target() {
        let catalog = ItemCatalog::with_defaults();
        assert!(catalog.items().iter().all(|i| i.target_required));
        assert!(catalog.stratagems().iter().all(|s| s.target_required));
    }

    #[test]
    fn test_stratagem_cooldowns_positive() {
        let catalog = ItemCatalog::with_defaults();
        assert!(catalog.stratagems().iter().all(|s| s.cooldown > 0));
    }

    #[test]
    fn test_resource_catalog_knows_defaults() {
        let resources = ResourceCatalog::with_defaults();
        assert!(resources.contains(&ResourceId::from("requisition")));
        assert!(!resources.contains(&ResourceId::from("spice")));
        assert_eq!(resources.resources().len(), 4);
    }

    #[test]
    fn test_default_costs_use_known_resources() {
        let resources = ResourceCatalog::with_defaults();
        let catalog = ItemCatalog::with_defaults();
        for item in catalog.items() {
            for (resource, _) in &item.cost {
                assert!(resources.contains(resource), "{}", resource);
            }
        }
        for stratagem in catalog.stratagems() {
            for (resource, _) in &stratagem.cost {
                assert!(resources.contains(resource), "{}", resource);
            }
        }
    }
}
