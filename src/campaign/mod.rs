pub mod orders;
pub mod snapshot;
pub mod state;
pub mod turn;

pub use orders::{GalacticOrder, OrderGoal, OrderStatus};
pub use state::CampaignState;
pub use turn::{TurnOrchestrator, TurnSummary};
