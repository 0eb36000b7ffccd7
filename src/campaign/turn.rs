//! Turn orchestration - the per-turn simulation step
//!
//! One call to `advance_turn` ticks the event registry, decays cooldowns,
//! pays out harvests, advances the active galactic order, and moves the
//! turn counter. It takes the campaign state by exclusive borrow, so a
//! resolver can never re-enter a turn advance halfway through.

use crate::campaign::orders::{OrderGoal, OrderStatus};
use crate::campaign::state::CampaignState;
use crate::core::config::CampaignConfig;
use crate::core::types::{EventId, FactionId, PlanetId, ResourceId, Turn};
use crate::events::event::{CampaignEvent, EventEffect};
use crate::events::generator::EventGenerator;
use crate::events::registry::EventRegistry;
use crate::galaxy::planet::Planet;

/// Resources one planet paid its owner this turn
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub planet: PlanetId,
    pub faction: FactionId,
    pub yields: Vec<(ResourceId, i64)>,
}

/// How the active galactic order resolved this turn
#[derive(Debug, Clone)]
pub struct OrderOutcome {
    pub name: String,
    pub status: OrderStatus,
    /// Paid to every faction, completed or expired alike
    pub reward: Vec<(ResourceId, i64)>,
}

/// Everything that happened during one turn advance
#[derive(Debug, Clone)]
pub struct TurnSummary {
    pub turn: Turn,
    pub expired_events: Vec<CampaignEvent>,
    pub razed_planets: Vec<PlanetId>,
    pub harvests: Vec<HarvestReport>,
    pub order_outcome: Option<OrderOutcome>,
    pub random_event: Option<EventId>,
}

/// Drives the campaign forward one turn at a time
pub struct TurnOrchestrator {
    config: CampaignConfig,
    generator: EventGenerator,
}

impl TurnOrchestrator {
    pub fn new(config: CampaignConfig, seed: u64) -> Self {
        Self {
            generator: EventGenerator::new(seed),
            config,
        }
    }

    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// Advance the campaign by one turn
    pub fn advance_turn(&mut self, state: &mut CampaignState) -> TurnSummary {
        // 1. Event lifecycle
        let expired_events = state.events.advance_turn();
        let razed_planets = raze_doomed_planets(state, &expired_events);

        // 2. Cooldowns decay
        state.cooldowns.advance_turn();

        // 3. Harvest into the owners' wallets
        let mut harvests = Vec::new();
        for planet in state.planets.planets() {
            let Some(owner) = planet.owner else {
                continue;
            };
            let yields = harvest_yield(planet, &state.events, &self.config);
            if yields.is_empty() {
                continue;
            }
            for (resource, amount) in &yields {
                state.wallet.credit(owner, resource, *amount);
            }
            harvests.push(HarvestReport {
                planet: planet.id,
                faction: owner,
                yields,
            });
        }

        // 4. Galactic order progress
        let order_outcome = advance_order(state);

        // 5. Spontaneous events, then the turn counter
        let random_event =
            self.generator
                .maybe_generate(&mut state.events, &state.planets, &self.config);
        state.turn += 1;

        tracing::info!(
            "Turn {} complete: {} events expired, {} harvests, {} planets razed",
            state.turn,
            expired_events.len(),
            harvests.len(),
            razed_planets.len()
        );

        TurnSummary {
            turn: state.turn,
            expired_events,
            razed_planets,
            harvests,
            order_outcome,
            random_event,
        }
    }
}

/// Per-turn resources a planet pays its owner
///
/// Canonical combination order, applied per resource entry of the type's
/// base table: flat adds (upgrades, event bonus/debuff), then the trade
/// percentage, then doubling. Negative base entries flow through the same
/// pipeline, so a cursed world with a trade hub drains even faster.
pub fn harvest_yield(
    planet: &Planet,
    events: &EventRegistry,
    config: &CampaignConfig,
) -> Vec<(ResourceId, i64)> {
    let mut flat = planet.modifiers.flat_bonus;
    if events.planet_has_active_effect(planet.id, EventEffect::BonusResources) {
        flat += config.event_bonus_yield;
    }
    if events.planet_has_active_effect(planet.id, EventEffect::Debuff) {
        flat -= config.event_debuff_yield;
    }

    planet
        .planet_type
        .base_yield()
        .into_iter()
        .map(|(resource, base)| {
            let mut amount = base + flat;
            amount = amount * (100 + planet.modifiers.trade_bonus_pct) / 100;
            if planet.modifiers.double_output {
                amount *= 2;
            }
            (resource, amount)
        })
        .collect()
}

/// Destroy every planet under an active or just-expired destruction event
fn raze_doomed_planets(
    state: &mut CampaignState,
    expired_events: &[CampaignEvent],
) -> Vec<PlanetId> {
    let mut doomed: Vec<PlanetId> = expired_events
        .iter()
        .filter(|e| e.effect == EventEffect::DestroyPlanet)
        .map(|e| e.planet)
        .collect();
    for event in state.events.events_with_effect(EventEffect::DestroyPlanet) {
        if event.is_active() {
            doomed.push(event.planet);
        }
    }

    let mut razed = Vec::new();
    for planet_id in doomed {
        let intact = state
            .planets
            .get(planet_id)
            .map(|p| !p.is_destroyed())
            .unwrap_or(false);
        if intact {
            tracing::warn!("{} is destroyed", planet_id);
            state.planets.raze(planet_id);
            state.fleet.scuttle_at(planet_id);
            razed.push(planet_id);
        }
    }
    razed
}

/// Measure and advance the active order; pay the shared reward when it
/// resolves, to every faction, on completion and expiry alike
fn advance_order(state: &mut CampaignState) -> Option<OrderOutcome> {
    let order = state.order.as_mut()?;
    let measured = match order.goal {
        OrderGoal::ClaimPlanets { .. } => state.planets.claimed_count() as u32,
        OrderGoal::MusterFleets { .. } => state.fleet.ships().len() as u32,
    };

    let status = order.advance(measured);
    if status == OrderStatus::Active {
        return None;
    }

    let outcome = OrderOutcome {
        name: order.name.clone(),
        status,
        reward: order.reward.clone(),
    };
    for faction in state.factions.factions() {
        for (resource, amount) in &outcome.reward {
            state.wallet.credit(faction.id, resource, *amount);
        }
    }
    tracing::info!("Galactic order '{}' resolved: {:?}", outcome.name, status);
    state.order = None;
    Some(outcome)
}
