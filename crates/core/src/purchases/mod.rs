pub(crate) mod purchases_model;
pub(crate) mod purchases_repository;
pub(crate) mod purchases_traits;

pub use purchases_model::{NewPurchase, Purchase, PurchaseDB, PurchaseStatus};
pub use purchases_repository::PurchaseRepository;
pub use purchases_traits::PurchaseRepositoryTrait;
