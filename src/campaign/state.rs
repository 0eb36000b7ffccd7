//! Campaign state holding every component of a running campaign

use serde::{Deserialize, Serialize};

use crate::campaign::orders::GalacticOrder;
use crate::core::types::Turn;
use crate::economy::transaction::{CooldownTracker, EconomyContext};
use crate::economy::wallet::Wallet;
use crate::events::registry::EventRegistry;
use crate::galaxy::faction::FactionCatalog;
use crate::galaxy::fleet::FleetRegistry;
use crate::galaxy::planet::PlanetRegistry;

/// Everything a campaign session owns
///
/// This is also the persisted shape: serializing the state and loading it
/// back restores the session whole - events, wallets, cooldowns, the
/// per-planet connection lists, and the turn counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignState {
    pub turn: Turn,
    pub planets: PlanetRegistry,
    pub factions: FactionCatalog,
    pub fleet: FleetRegistry,
    pub events: EventRegistry,
    pub wallet: Wallet,
    pub cooldowns: CooldownTracker,
    pub order: Option<GalacticOrder>,
}

impl CampaignState {
    pub fn new() -> Self {
        Self {
            turn: 0,
            planets: PlanetRegistry::new(),
            factions: FactionCatalog::new(),
            fleet: FleetRegistry::new(),
            events: EventRegistry::new(),
            wallet: Wallet::new(),
            cooldowns: CooldownTracker::new(),
            order: None,
        }
    }

    /// Borrow the pieces a transaction needs, as one context
    pub fn economy_ctx(&mut self) -> EconomyContext<'_> {
        EconomyContext {
            wallet: &mut self.wallet,
            planets: &mut self.planets,
            fleet: &mut self.fleet,
            factions: &self.factions,
            cooldowns: &mut self.cooldowns,
        }
    }
}

impl Default for CampaignState {
    fn default() -> Self {
        Self::new()
    }
}
