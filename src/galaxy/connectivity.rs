//! Travel connectivity between planets
//!
//! The static edge set lives on the planets themselves; active events
//! overlay it at query time. Warp storms suppress edges, wormholes add
//! them, and nothing here is ever stored - the event registry is the
//! single source of truth for the dynamic part.

use ahash::AHashSet;

use crate::core::error::{CampaignError, Result};
use crate::core::types::PlanetId;
use crate::events::event::EventEffect;
use crate::events::registry::EventRegistry;
use crate::galaxy::planet::PlanetRegistry;

/// Outcome of toggling a static connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionChange {
    Added,
    Removed,
}

/// Toggle the static edge between two planets, keeping it symmetric
pub fn toggle_connection(
    planets: &mut PlanetRegistry,
    a: PlanetId,
    b: PlanetId,
) -> Result<ConnectionChange> {
    if a == b {
        return Err(CampaignError::SelfConnection(a));
    }
    if !planets.contains(a) {
        return Err(CampaignError::PlanetNotFound(a));
    }
    if !planets.contains(b) {
        return Err(CampaignError::PlanetNotFound(b));
    }

    let existing = planets.get(a).map(|p| p.is_connected(b)).unwrap_or(false);
    let change = if existing {
        if let Some(planet) = planets.get_mut(a) {
            planet.remove_connection(b);
        }
        if let Some(planet) = planets.get_mut(b) {
            planet.remove_connection(a);
        }
        ConnectionChange::Removed
    } else {
        if let Some(planet) = planets.get_mut(a) {
            planet.add_connection(b);
        }
        if let Some(planet) = planets.get_mut(b) {
            planet.add_connection(a);
        }
        ConnectionChange::Added
    };
    tracing::debug!("Connection {} <-> {} {:?}", a, b, change);
    Ok(change)
}

/// Add the static edge between two planets (two-phase purchase completion)
///
/// Idempotent: an existing edge is left alone.
pub fn add_connection(planets: &mut PlanetRegistry, a: PlanetId, b: PlanetId) -> Result<()> {
    if a == b {
        return Err(CampaignError::SelfConnection(a));
    }
    if !planets.contains(a) {
        return Err(CampaignError::PlanetNotFound(a));
    }
    if !planets.contains(b) {
        return Err(CampaignError::PlanetNotFound(b));
    }
    if let Some(planet) = planets.get_mut(a) {
        planet.add_connection(b);
    }
    if let Some(planet) = planets.get_mut(b) {
        planet.add_connection(a);
    }
    Ok(())
}

/// Planets reachable from `from` in a single move
///
/// Static neighbors whose lane is not storm-blocked at either endpoint,
/// plus any planet linked to `from` by an active wormhole. One hop only;
/// there is no pathfinding at this layer.
pub fn valid_move_targets(
    planets: &PlanetRegistry,
    events: &EventRegistry,
    from: PlanetId,
) -> AHashSet<PlanetId> {
    let mut targets = AHashSet::new();
    let Some(planet) = planets.get(from) else {
        return targets;
    };

    for &neighbor in &planet.connections {
        if !events.is_route_blocked(from, neighbor) {
            targets.insert(neighbor);
        }
    }

    for event in events.events_with_effect(EventEffect::CreatesRoute) {
        if !event.is_active() {
            continue;
        }
        let far_end = if event.planet == from {
            event.target_planet
        } else if event.target_planet == Some(from) {
            Some(event.planet)
        } else {
            None
        };
        if let Some(far_end) = far_end {
            let intact = planets.get(far_end).map(|p| !p.is_destroyed()).unwrap_or(false);
            if intact {
                targets.insert(far_end);
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::EventKind;
    use crate::galaxy::planet::PlanetType;

    fn test_galaxy() -> (PlanetRegistry, PlanetId, PlanetId, PlanetId) {
        let mut planets = PlanetRegistry::new();
        let a = planets.add_planet("Alpha", PlanetType::Hive);
        let b = planets.add_planet("Beta", PlanetType::Agri);
        let c = planets.add_planet("Gamma", PlanetType::Forge);
        (planets, a, b, c)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (mut planets, a, b, _) = test_galaxy();

        let change = toggle_connection(&mut planets, a, b).unwrap();
        assert_eq!(change, ConnectionChange::Added);
        assert!(planets.get(a).unwrap().is_connected(b));
        assert!(planets.get(b).unwrap().is_connected(a));

        let change = toggle_connection(&mut planets, a, b).unwrap();
        assert_eq!(change, ConnectionChange::Removed);
        assert!(!planets.get(a).unwrap().is_connected(b));
        assert!(!planets.get(b).unwrap().is_connected(a));
    }

    #[test]
    fn test_toggle_rejects_bad_input() {
        let (mut planets, a, _, _) = test_galaxy();
        assert!(toggle_connection(&mut planets, a, a).is_err());
        assert!(toggle_connection(&mut planets, a, PlanetId(99)).is_err());
    }

    #[test]
    fn test_move_targets_follow_static_edges() {
        let (mut planets, a, b, c) = test_galaxy();
        toggle_connection(&mut planets, a, b).unwrap();
        toggle_connection(&mut planets, a, c).unwrap();

        let events = EventRegistry::new();
        let targets = valid_move_targets(&planets, &events, a);
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&b));
        assert!(targets.contains(&c));
    }

    #[test]
    fn test_storm_suppresses_edge() {
        let (mut planets, a, b, c) = test_galaxy();
        toggle_connection(&mut planets, a, b).unwrap();
        toggle_connection(&mut planets, a, c).unwrap();

        let mut events = EventRegistry::new();
        events.add(EventKind::WarpStorm, b, 3, 0, None);

        let targets = valid_move_targets(&planets, &events, a);
        assert!(!targets.contains(&b));
        assert!(targets.contains(&c));
    }

    #[test]
    fn test_wormhole_adds_target() {
        let (planets, a, _, c) = test_galaxy();

        let mut events = EventRegistry::new();
        events.add(EventKind::Wormhole, a, 3, 0, Some(c));

        // No static edges at all, wormhole alone carries traffic
        let targets = valid_move_targets(&planets, &events, a);
        assert_eq!(targets.len(), 1);
        assert!(targets.contains(&c));

        // And from the far side too
        let targets = valid_move_targets(&planets, &events, c);
        assert!(targets.contains(&a));
    }

    #[test]
    fn test_wormhole_to_destroyed_planet_ignored() {
        let (mut planets, a, _, c) = test_galaxy();
        let mut events = EventRegistry::new();
        events.add(EventKind::Wormhole, a, 3, 0, Some(c));
        planets.raze(c);

        let targets = valid_move_targets(&planets, &events, a);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_unknown_planet_has_no_targets() {
        let (planets, _, _, _) = test_galaxy();
        let events = EventRegistry::new();
        assert!(valid_move_targets(&planets, &events, PlanetId(99)).is_empty());
    }
}
