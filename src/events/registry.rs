//! Event registry - owns all timed events and their lifecycle
//!
//! The registry is the single authority on which events exist and which are
//! active. Travel-blocking and wormhole queries are answered here so the
//! connectivity layer never stores derived state.

use serde::{Deserialize, Serialize};

use crate::core::types::{EventId, PlanetId};
use crate::events::event::{CampaignEvent, EventEffect, EventKind};

/// Owns every timed event in the campaign
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRegistry {
    events: Vec<CampaignEvent>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store an event, returning its id
    ///
    /// `duration` of -1 marks an infinite event; `start_turn` of 0 means
    /// the event is active immediately.
    pub fn add(
        &mut self,
        kind: EventKind,
        planet: PlanetId,
        duration: i32,
        start_turn: i32,
        target_planet: Option<PlanetId>,
    ) -> EventId {
        let event = CampaignEvent::new(kind, planet, duration, start_turn, target_planet);
        let id = event.id;
        tracing::debug!(
            "Event {:?} added at {} (duration {}, delay {})",
            kind,
            planet,
            duration,
            start_turn
        );
        self.events.push(event);
        id
    }

    /// Remove an event by id, returning it if present
    pub fn remove(&mut self, id: EventId) -> Option<CampaignEvent> {
        let idx = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(idx))
    }

    pub fn get(&self, id: EventId) -> Option<&CampaignEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn events(&self) -> &[CampaignEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events anchored at the planet (wormhole targets count)
    pub fn events_for_planet(&self, planet: PlanetId) -> Vec<&CampaignEvent> {
        self.events
            .iter()
            .filter(|e| e.planet == planet || e.target_planet == Some(planet))
            .collect()
    }

    /// All events carrying the given effect tag
    pub fn events_with_effect(&self, effect: EventEffect) -> Vec<&CampaignEvent> {
        self.events.iter().filter(|e| e.effect == effect).collect()
    }

    /// Whether the planet has an active event with the given effect
    pub fn planet_has_active_effect(&self, planet: PlanetId, effect: EventEffect) -> bool {
        self.events
            .iter()
            .any(|e| e.planet == planet && e.effect == effect && e.is_active())
    }

    /// Tick every event one turn; expired events are removed and returned
    pub fn advance_turn(&mut self) -> Vec<CampaignEvent> {
        let mut expired = Vec::new();
        let mut remaining = Vec::with_capacity(self.events.len());

        for mut event in self.events.drain(..) {
            if event.tick() {
                tracing::debug!("Event {:?} at {} expired", event.kind, event.planet);
                expired.push(event);
            } else {
                remaining.push(event);
            }
        }

        self.events = remaining;
        expired
    }

    /// True iff an active travel-blocking event is anchored at either planet
    pub fn is_route_blocked(&self, a: PlanetId, b: PlanetId) -> bool {
        self.events.iter().any(|e| {
            e.effect == EventEffect::BlocksTravel
                && e.is_active()
                && (e.planet == a || e.planet == b)
        })
    }

    /// True iff an active route-creating event connects the two planets,
    /// in either direction
    pub fn has_wormhole(&self, a: PlanetId, b: PlanetId) -> bool {
        self.events.iter().any(|e| {
            e.effect == EventEffect::CreatesRoute && e.is_active() && e.links(a, b)
        })
    }
}
