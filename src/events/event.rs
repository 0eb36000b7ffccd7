//! Timed campaign events
//!
//! Events are the weather of the galaxy: warp storms close travel lanes,
//! wormholes open new ones, invasions and windfalls come and go. Every
//! event lives in exactly one of three states:
//!
//! - waiting:  `start_turn > 0`, the duration countdown has not started
//! - active:   `start_turn == 0` and `turns_remaining > 0` (or infinite)
//! - expired:  `turns_remaining == 0`, only reachable from active

use serde::{Deserialize, Serialize};

use crate::core::types::{EventId, PlanetId};

/// Sentinel duration for events that never expire
pub const INFINITE_DURATION: i32 = -1;

/// What kind of event this is (display identity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    WarpStorm,
    Wormhole,
    ResourceWindfall,
    Plague,
    Supernova,
    WaaaghMuster,
    StcFragment,
    CrusadeCall,
    Custom,
}

impl EventKind {
    /// The gameplay effect an event of this kind carries by default
    pub fn default_effect(&self) -> EventEffect {
        match self {
            Self::WarpStorm => EventEffect::BlocksTravel,
            Self::Wormhole => EventEffect::CreatesRoute,
            Self::ResourceWindfall => EventEffect::BonusResources,
            Self::Plague => EventEffect::Debuff,
            Self::Supernova => EventEffect::DestroyPlanet,
            Self::WaaaghMuster => EventEffect::OrkInvasion,
            Self::StcFragment => EventEffect::BonusTech,
            Self::CrusadeCall => EventEffect::AttackBonus,
            Self::Custom => EventEffect::None,
        }
    }
}

/// The mechanical effect an active event exerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventEffect {
    BlocksTravel,
    CreatesRoute,
    BonusResources,
    Debuff,
    DestroyPlanet,
    AttackBonus,
    BonusTech,
    OrkInvasion,
    None,
}

/// A timed event anchored to a planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    pub id: EventId,
    pub kind: EventKind,
    pub planet: PlanetId,
    /// Second anchor, wormholes only
    pub target_planet: Option<PlanetId>,
    pub effect: EventEffect,
    /// Turns until activation; 0 = active now
    pub start_turn: i32,
    /// Duration countdown; `INFINITE_DURATION` never ticks down
    pub turns_remaining: i32,
}

impl CampaignEvent {
    /// Create an event. `duration` of `INFINITE_DURATION` marks an event
    /// that never expires; otherwise it must be positive.
    pub fn new(
        kind: EventKind,
        planet: PlanetId,
        duration: i32,
        start_turn: i32,
        target_planet: Option<PlanetId>,
    ) -> Self {
        assert!(
            duration == INFINITE_DURATION || duration > 0,
            "event duration must be positive or the infinite sentinel, got {duration}"
        );
        assert!(start_turn >= 0, "start_turn must be non-negative, got {start_turn}");
        Self {
            id: EventId::new(),
            kind,
            planet,
            target_planet,
            effect: kind.default_effect(),
            start_turn,
            turns_remaining: duration,
        }
    }

    /// Waiting events have not begun their duration countdown
    pub fn is_waiting(&self) -> bool {
        self.start_turn > 0
    }

    /// Active events exert their effect on the galaxy
    pub fn is_active(&self) -> bool {
        self.start_turn == 0
            && (self.turns_remaining > 0 || self.turns_remaining == INFINITE_DURATION)
    }

    pub fn is_infinite(&self) -> bool {
        self.turns_remaining == INFINITE_DURATION
    }

    /// Whether this active event links the two planets (either direction)
    pub fn links(&self, a: PlanetId, b: PlanetId) -> bool {
        match self.target_planet {
            Some(target) => {
                (self.planet == a && target == b) || (self.planet == b && target == a)
            }
            None => false,
        }
    }

    /// Advance this event by one turn. Returns true when the event has
    /// expired and should be removed from the registry.
    ///
    /// Waiting events count down their start delay first; the duration
    /// countdown only begins once the delay reaches zero. An event with
    /// start delay `s` and finite duration `d` therefore expires after
    /// exactly `s + d` ticks.
    pub fn tick(&mut self) -> bool {
        assert!(
            !(self.start_turn > 0 && self.turns_remaining == 0),
            "event {:?} is simultaneously waiting and expired",
            self.id
        );

        if self.start_turn > 0 {
            self.start_turn -= 1;
            return false;
        }

        if self.turns_remaining == INFINITE_DURATION {
            return false;
        }

        self.turns_remaining -= 1;
        self.turns_remaining <= 0
    }
}
