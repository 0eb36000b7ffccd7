pub mod catalog;
pub mod transaction;
pub mod wallet;

pub use catalog::{ItemCatalog, ItemEffect, ResourceCatalog, ShopItem, Stratagem, TargetRule};
pub use transaction::{
    CooldownTracker, EconomyContext, PurchaseReceipt, TransactionEngine, TransactionError,
};
pub use wallet::Wallet;
