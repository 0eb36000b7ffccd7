pub mod connectivity;
pub mod faction;
pub mod fleet;
pub mod planet;

pub use faction::{Faction, FactionCatalog};
pub use fleet::{FleetRegistry, Ship};
pub use planet::{Planet, PlanetRegistry, PlanetType};
