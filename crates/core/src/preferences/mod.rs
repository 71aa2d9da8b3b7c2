pub(crate) mod preferences_model;
pub(crate) mod preferences_repository;
pub(crate) mod preferences_service;
pub(crate) mod preferences_traits;
pub mod quiet_hours;

pub use preferences_model::{
    ActivityPreferences, CommunicationPreferences, DeliveryFrequency, FinancialPreferences,
    FrequencyPreferences, NotificationPreferences, PreferenceValue, SystemPreferences,
    preference_route,
};
pub use preferences_repository::PreferenceRepository;
pub use preferences_service::NotificationPreferencesService;
pub use preferences_traits::{NotificationPreferencesServiceTrait, PreferenceStoreTrait};
