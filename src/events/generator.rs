//! Random event generation
//!
//! A seeded generator so campaign sessions replay identically: the same
//! seed and command sequence produce the same storms and windfalls.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::CampaignConfig;
use crate::core::types::EventId;
use crate::events::event::EventKind;
use crate::events::registry::EventRegistry;
use crate::galaxy::planet::PlanetRegistry;

/// Relative weights for randomly generated event kinds
///
/// Supernovae are excluded: planet destruction is a GM decision, never
/// a random roll.
const KIND_WEIGHTS: [(EventKind, u32); 7] = [
    (EventKind::WarpStorm, 30),
    (EventKind::Wormhole, 15),
    (EventKind::ResourceWindfall, 20),
    (EventKind::Plague, 15),
    (EventKind::WaaaghMuster, 10),
    (EventKind::StcFragment, 5),
    (EventKind::CrusadeCall, 5),
];

/// Seeded source of spontaneous campaign events
#[derive(Debug)]
pub struct EventGenerator {
    rng: ChaCha8Rng,
}

impl EventGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Roll the per-turn event chance; on success inject one random event
    /// and return its id
    pub fn maybe_generate(
        &mut self,
        registry: &mut EventRegistry,
        planets: &PlanetRegistry,
        config: &CampaignConfig,
    ) -> Option<EventId> {
        if self.rng.gen::<f64>() >= config.random_event_chance {
            return None;
        }
        if registry.len() >= config.max_events {
            tracing::debug!("Event registry full ({}), skipping random event", registry.len());
            return None;
        }

        let candidates: Vec<_> = planets
            .planets()
            .iter()
            .filter(|p| !p.is_destroyed())
            .map(|p| p.id)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let kind = self.roll_kind();
        let planet = candidates[self.rng.gen_range(0..candidates.len())];

        // Wormholes need a distinct second anchor
        let target = if kind == EventKind::Wormhole {
            let others: Vec<_> = candidates.iter().copied().filter(|&p| p != planet).collect();
            if others.is_empty() {
                return None;
            }
            Some(others[self.rng.gen_range(0..others.len())])
        } else {
            None
        };

        let duration = self
            .rng
            .gen_range(config.random_event_min_duration..=config.random_event_max_duration);
        let start_turn = self.rng.gen_range(0..=2);

        let id = registry.add(kind, planet, duration, start_turn, target);
        tracing::info!(
            "Random event {:?} rolled at {} (duration {}, delay {})",
            kind,
            planet,
            duration,
            start_turn
        );
        Some(id)
    }

    fn roll_kind(&mut self) -> EventKind {
        let total: u32 = KIND_WEIGHTS.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total);
        for (kind, weight) in KIND_WEIGHTS {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        EventKind::WarpStorm
    }
}
