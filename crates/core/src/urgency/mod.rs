pub(crate) mod urgency_model;
pub(crate) mod urgency_service;

pub use urgency_model::{
    classify, time_description, UrgencyPriority, UrgencyStatus, UrgentItem, UrgentSource,
};
pub use urgency_service::UrgentItemScanner;
