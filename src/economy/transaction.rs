//! Purchase and stratagem transactions
//!
//! Every spend follows the same pipeline: validate everything, then debit,
//! then resolve the effect. No failure path mutates state - a rejected
//! purchase leaves wallets, planets, and cooldowns exactly as they were.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{FactionId, PlanetId, ResourceId};
use crate::economy::catalog::{ItemCatalog, ItemEffect, TargetRule};
use crate::economy::wallet::Wallet;
use crate::galaxy::connectivity;
use crate::galaxy::faction::FactionCatalog;
use crate::galaxy::fleet::FleetRegistry;
use crate::galaxy::planet::{PlanetRegistry, PlanetType};

/// Why a transaction was rejected
///
/// Every variant is a user-recoverable validation failure; none of them
/// leave any state mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransactionError {
    #[error("Unknown shop item '{0}'")]
    UnknownItem(String),

    #[error("Unknown stratagem '{0}'")]
    UnknownStratagem(String),

    #[error("Unknown faction {0}")]
    UnknownFaction(FactionId),

    #[error("Not enough {resource}: need {needed}, have {available}")]
    InsufficientResources {
        resource: ResourceId,
        needed: i64,
        available: i64,
    },

    #[error("'{0}' requires a target planet")]
    MissingTarget(String),

    #[error("Unknown planet {0}")]
    UnknownPlanet(PlanetId),

    #[error("Planet {0} has been destroyed")]
    TargetDestroyed(PlanetId),

    #[error("{faction} does not control {planet}")]
    TargetNotOwned { faction: FactionId, planet: PlanetId },

    #[error("{faction} controls {planet}; this action targets hostile worlds")]
    TargetNotHostile { faction: FactionId, planet: PlanetId },

    #[error("'{stratagem}' is on cooldown for {remaining} more turns")]
    OnCooldown { stratagem: String, remaining: u32 },

    #[error("No pending '{0}' link to complete")]
    NoPendingLink(String),

    #[error("A warp link must join two different planets")]
    SamePlanet(PlanetId),
}

/// Successful transaction summary returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    pub message: String,
    /// Set for two-phase purchases awaiting their second planet
    pub requires_second_planet: bool,
    pub first_planet: Option<PlanetId>,
}

impl PurchaseReceipt {
    fn done(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            requires_second_planet: false,
            first_planet: None,
        }
    }

    fn pending(first_planet: PlanetId, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            requires_second_planet: true,
            first_planet: Some(first_planet),
        }
    }
}

/// Remaining cooldown turns per faction and stratagem
///
/// An absent entry means the stratagem is usable. Entries are decremented
/// by the turn orchestrator and dropped when they reach zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CooldownTracker {
    cooldowns: AHashMap<FactionId, AHashMap<String, u32>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, faction: FactionId, stratagem: &str) -> u32 {
        self.cooldowns
            .get(&faction)
            .and_then(|m| m.get(stratagem))
            .copied()
            .unwrap_or(0)
    }

    pub fn set(&mut self, faction: FactionId, stratagem: &str, turns: u32) {
        if turns == 0 {
            return;
        }
        self.cooldowns
            .entry(faction)
            .or_default()
            .insert(stratagem.to_string(), turns);
    }

    /// Decrement every entry by one turn; entries reaching zero are removed
    pub fn advance_turn(&mut self) {
        for ledger in self.cooldowns.values_mut() {
            for remaining in ledger.values_mut() {
                *remaining = remaining.saturating_sub(1);
            }
            ledger.retain(|_, remaining| *remaining > 0);
        }
        self.cooldowns.retain(|_, ledger| !ledger.is_empty());
    }
}

/// Mutable view over everything a transaction may touch
///
/// Built fresh for each call; the explicit borrows replace any ambient
/// lookup of shared state.
pub struct EconomyContext<'a> {
    pub wallet: &'a mut Wallet,
    pub planets: &'a mut PlanetRegistry,
    pub fleet: &'a mut FleetRegistry,
    pub factions: &'a FactionCatalog,
    pub cooldowns: &'a mut CooldownTracker,
}

/// Validates and applies shop purchases and stratagem activations
#[derive(Debug, Default)]
pub struct TransactionEngine {
    catalog: ItemCatalog,
    /// First planet of each in-flight two-phase purchase
    pending_links: AHashMap<(FactionId, String), PlanetId>,
}

impl TransactionEngine {
    pub fn new(catalog: ItemCatalog) -> Self {
        Self {
            catalog,
            pending_links: AHashMap::new(),
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Buy a shop item for a faction
    ///
    /// Validation order: item lookup, faction existence, affordability,
    /// target rules. Only when everything passes is the cost debited and
    /// the effect resolved; failures never mutate state.
    pub fn purchase(
        &mut self,
        ctx: &mut EconomyContext<'_>,
        faction: FactionId,
        item_id: &str,
        target: Option<PlanetId>,
    ) -> Result<PurchaseReceipt, TransactionError> {
        let item = self
            .catalog
            .item(item_id)
            .ok_or_else(|| TransactionError::UnknownItem(item_id.to_string()))?
            .clone();

        if !ctx.factions.contains(faction) {
            return Err(TransactionError::UnknownFaction(faction));
        }

        check_affordable(ctx.wallet, faction, &item.cost)?;
        let target = validate_target(
            ctx.planets,
            faction,
            &item.id,
            item.target_required,
            item.target_rule,
            target,
        )?;

        for (resource, amount) in &item.cost {
            ctx.wallet.debit(faction, resource, *amount);
        }
        tracing::info!("{} bought '{}'", faction, item.id);

        // Two-phase items stop here; the edge comes with the second planet
        if item.effect == ItemEffect::WarpBeacon {
            let first = target.expect("warp beacon requires a target");
            self.pending_links.insert((faction, item.id.clone()), first);
            return Ok(PurchaseReceipt::pending(
                first,
                format!("Warp beacon anchored at {}; choose a second planet", first),
            ));
        }

        Ok(resolve_effect(ctx, faction, &item.effect, target))
    }

    /// Complete a two-phase purchase by naming both planets
    ///
    /// Fails cleanly when no matching first-phase purchase is pending.
    /// The cost was paid in phase one; completion only adds the edge.
    pub fn complete_two_planet_purchase(
        &mut self,
        ctx: &mut EconomyContext<'_>,
        faction: FactionId,
        item_id: &str,
        planet1: PlanetId,
        planet2: PlanetId,
    ) -> Result<PurchaseReceipt, TransactionError> {
        let key = (faction, item_id.to_string());
        let pending = self
            .pending_links
            .get(&key)
            .copied()
            .ok_or_else(|| TransactionError::NoPendingLink(item_id.to_string()))?;
        if pending != planet1 {
            return Err(TransactionError::NoPendingLink(item_id.to_string()));
        }

        if planet1 == planet2 {
            return Err(TransactionError::SamePlanet(planet1));
        }
        for planet in [planet1, planet2] {
            let found = ctx
                .planets
                .get(planet)
                .ok_or(TransactionError::UnknownPlanet(planet))?;
            if found.is_destroyed() {
                return Err(TransactionError::TargetDestroyed(planet));
            }
        }

        if connectivity::add_connection(ctx.planets, planet1, planet2).is_err() {
            return Err(TransactionError::UnknownPlanet(planet2));
        }
        self.pending_links.remove(&key);
        tracing::info!("{} linked {} <-> {}", faction, planet1, planet2);

        Ok(PurchaseReceipt::done(format!(
            "Warp lane established between {} and {}",
            planet1, planet2
        )))
    }

    /// Activate a stratagem for a faction
    ///
    /// Same pipeline as `purchase`, with the cooldown gate checked before
    /// any spend and armed only on success.
    pub fn use_stratagem(
        &mut self,
        ctx: &mut EconomyContext<'_>,
        faction: FactionId,
        stratagem_id: &str,
        target: Option<PlanetId>,
    ) -> Result<PurchaseReceipt, TransactionError> {
        let stratagem = self
            .catalog
            .stratagem(stratagem_id)
            .ok_or_else(|| TransactionError::UnknownStratagem(stratagem_id.to_string()))?
            .clone();

        if !ctx.factions.contains(faction) {
            return Err(TransactionError::UnknownFaction(faction));
        }

        let remaining = ctx.cooldowns.remaining(faction, &stratagem.id);
        if remaining > 0 {
            return Err(TransactionError::OnCooldown {
                stratagem: stratagem.id.clone(),
                remaining,
            });
        }

        check_affordable(ctx.wallet, faction, &stratagem.cost)?;
        let target = validate_target(
            ctx.planets,
            faction,
            &stratagem.id,
            stratagem.target_required,
            stratagem.target_rule,
            target,
        )?;

        for (resource, amount) in &stratagem.cost {
            ctx.wallet.debit(faction, resource, *amount);
        }
        ctx.cooldowns.set(faction, &stratagem.id, stratagem.cooldown);
        tracing::info!(
            "{} used '{}' (cooldown {})",
            faction,
            stratagem.id,
            stratagem.cooldown
        );

        Ok(resolve_effect(ctx, faction, &stratagem.effect, target))
    }
}

fn check_affordable(
    wallet: &Wallet,
    faction: FactionId,
    cost: &[(ResourceId, i64)],
) -> Result<(), TransactionError> {
    for (resource, needed) in cost {
        let available = wallet.get(faction, resource);
        if available < *needed {
            return Err(TransactionError::InsufficientResources {
                resource: resource.clone(),
                needed: *needed,
                available,
            });
        }
    }
    Ok(())
}

fn validate_target(
    planets: &PlanetRegistry,
    faction: FactionId,
    entry_id: &str,
    target_required: bool,
    target_rule: TargetRule,
    target: Option<PlanetId>,
) -> Result<Option<PlanetId>, TransactionError> {
    if !target_required {
        return Ok(None);
    }

    let target = target.ok_or_else(|| TransactionError::MissingTarget(entry_id.to_string()))?;
    let planet = planets
        .get(target)
        .ok_or(TransactionError::UnknownPlanet(target))?;
    if planet.is_destroyed() {
        return Err(TransactionError::TargetDestroyed(target));
    }

    match target_rule {
        TargetRule::OwnPlanet => {
            if planet.owner != Some(faction) {
                return Err(TransactionError::TargetNotOwned {
                    faction,
                    planet: target,
                });
            }
        }
        TargetRule::EnemyPlanet => {
            if planet.owner == Some(faction) {
                return Err(TransactionError::TargetNotHostile {
                    faction,
                    planet: target,
                });
            }
        }
        TargetRule::AnyPlanet => {}
    }

    Ok(Some(target))
}

/// Apply a validated, paid-for effect to the galaxy
fn resolve_effect(
    ctx: &mut EconomyContext<'_>,
    faction: FactionId,
    effect: &ItemEffect,
    target: Option<PlanetId>,
) -> PurchaseReceipt {
    // Targeted effects were validated upstream; a missing planet here is a
    // bug in the pipeline, not user input.
    let planet_name = |ctx: &EconomyContext<'_>, id: PlanetId| -> String {
        ctx.planets
            .get(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    match effect {
        ItemEffect::DeployShip => {
            let station = target.expect("deploy_ship target validated");
            let name = format!("Vessel of {}", planet_name(ctx, station));
            let ship = ctx.fleet.deploy(name.clone(), faction, station);
            PurchaseReceipt::done(format!("{} ({:?}) launched at {}", name, ship, station))
        }
        ItemEffect::WarpBeacon => {
            unreachable!("warp beacon is handled by the two-phase path")
        }
        ItemEffect::MiningUpgrade { bonus } => {
            let id = target.expect("mining_upgrade target validated");
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.modifiers.flat_bonus += bonus;
            }
            PurchaseReceipt::done(format!("Mining yield on {} raised by {}", id, bonus))
        }
        ItemEffect::TradeHub { bonus_pct } => {
            let id = target.expect("trade_hub target validated");
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.modifiers.trade_bonus_pct += bonus_pct;
            }
            PurchaseReceipt::done(format!("Trade hub on {} adds {}% yield", id, bonus_pct))
        }
        ItemEffect::EliteTraining => {
            let id = target.expect("elite_training target validated");
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.modifiers.double_output = true;
            }
            PurchaseReceipt::done(format!("Elite cadre doubles output of {}", id))
        }
        ItemEffect::PlanetaryShield { strength } => {
            let id = target.expect("shield target validated");
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.set_defence(planet.defence() + strength);
            }
            PurchaseReceipt::done(format!("Defences of {} raised by {}", id, strength))
        }
        ItemEffect::Sabotage { damage } => {
            let id = target.expect("sabotage target validated");
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.set_defence(planet.defence() - damage);
            }
            PurchaseReceipt::done(format!("Saboteurs cripple defences of {}", id))
        }
        ItemEffect::Infiltrate { disruption } => {
            let id = target.expect("infiltrate target validated");
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.set_production(planet.production() - disruption);
            }
            PurchaseReceipt::done(format!("Infiltrators disrupt production on {}", id))
        }
        ItemEffect::SuperWeapon => {
            let id = target.expect("super_weapon target validated");
            let name = planet_name(ctx, id);
            ctx.planets.raze(id);
            let lost = ctx.fleet.scuttle_at(id);
            PurchaseReceipt::done(format!(
                "{} has been destroyed; {} ships lost with it",
                name, lost
            ))
        }
        ItemEffect::OrbitalBombardment { damage } => {
            let id = target.expect("bombardment target validated");
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.set_defence(planet.defence() - damage);
                planet.set_battle_status(true);
            }
            PurchaseReceipt::done(format!("Orbital strike hammers {}", id))
        }
        ItemEffect::RapidDeployment => {
            let station = target.expect("rapid_deployment target validated");
            let name = format!("Strike Wing {}", station);
            ctx.fleet.deploy(name.clone(), faction, station);
            PurchaseReceipt::done(format!("{} drops onto {}", name, station))
        }
        ItemEffect::DarkPact { windfall } => {
            let id = target.expect("dark_pact target validated");
            ctx.wallet
                .credit(faction, &ResourceId::from("requisition"), *windfall);
            if let Some(planet) = ctx.planets.get_mut(id) {
                planet.planet_type = PlanetType::Corrupted;
            }
            PurchaseReceipt::done(format!(
                "Dark bargain struck: {} requisition gained, {} is corrupted",
                windfall, id
            ))
        }
    }
}
