//! Saving and loading campaigns
//!
//! The campaign state serializes to a single JSON document. The storage
//! location is the caller's business; this module only guarantees the
//! round-trip: events, wallets, cooldowns, per-planet connections, and
//! the turn counter all come back exactly as written.

use std::fs;
use std::path::Path;

use crate::campaign::state::CampaignState;
use crate::core::error::Result;

/// Write the campaign to a JSON file
pub fn save_campaign(path: &Path, state: &CampaignState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    tracing::info!("Campaign saved to {}", path.display());
    Ok(())
}

/// Read a campaign back from a JSON file
pub fn load_campaign(path: &Path) -> Result<CampaignState> {
    let content = fs::read_to_string(path)?;
    let state: CampaignState = serde_json::from_str(&content)?;
    tracing::info!(
        "Campaign loaded from {} (turn {})",
        path.display(),
        state.turn
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlanetId, ResourceId};
    use crate::events::event::{EventKind, INFINITE_DURATION};
    use crate::galaxy::connectivity;
    use crate::galaxy::planet::PlanetType;

    fn sample_state() -> CampaignState {
        let mut state = CampaignState::new();
        let faction = state.factions.add_faction("Iron Covenant");
        let a = state.planets.add_planet("Alpha", PlanetType::Hive);
        let b = state.planets.add_planet("Beta", PlanetType::Forge);
        state.planets.get_mut(a).unwrap().set_owner(Some(faction));
        connectivity::toggle_connection(&mut state.planets, a, b).unwrap();
        state.events.add(EventKind::WarpStorm, a, 3, 1, None);
        state
            .events
            .add(EventKind::Wormhole, a, INFINITE_DURATION, 0, Some(b));
        state
            .wallet
            .credit(faction, &ResourceId::from("requisition"), 17);
        state.cooldowns.set(faction, "orbital_shield", 2);
        state.turn = 9;
        state
    }

    #[test]
    fn test_round_trip_preserves_persisted_shape() {
        let state = sample_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.json");

        save_campaign(&path, &state).unwrap();
        let loaded = load_campaign(&path).unwrap();

        assert_eq!(loaded.turn, 9);

        // Event list, field by field
        assert_eq!(loaded.events.len(), 2);
        for (before, after) in state.events.events().iter().zip(loaded.events.events()) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.kind, after.kind);
            assert_eq!(before.planet, after.planet);
            assert_eq!(before.target_planet, after.target_planet);
            assert_eq!(before.effect, after.effect);
            assert_eq!(before.start_turn, after.start_turn);
            assert_eq!(before.turns_remaining, after.turns_remaining);
        }

        // Wallet and cooldown maps
        let faction = state.factions.factions()[0].id;
        assert_eq!(
            loaded.wallet.get(faction, &ResourceId::from("requisition")),
            17
        );
        assert_eq!(loaded.cooldowns.remaining(faction, "orbital_shield"), 2);

        // Per-planet connection lists
        let a = state.planets.planets()[0].id;
        let b = state.planets.planets()[1].id;
        assert!(loaded.planets.get(a).unwrap().is_connected(b));
        assert!(loaded.planets.get(b).unwrap().is_connected(a));
    }

    #[test]
    fn test_loaded_state_keeps_simulating() {
        let state = sample_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.json");
        save_campaign(&path, &state).unwrap();

        let mut loaded = load_campaign(&path).unwrap();
        // The waiting storm activates after one advance, exactly as it
        // would have in the original session
        loaded.events.advance_turn();
        let a = loaded.planets.planets()[0].id;
        assert!(loaded.events.is_route_blocked(a, PlanetId(42)));
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(load_campaign(Path::new("/nonexistent/campaign.json")).is_err());
    }
}
