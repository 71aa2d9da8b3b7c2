pub(crate) mod dispatcher;
pub(crate) mod notifications_model;
pub(crate) mod notifications_repository;
pub(crate) mod notifications_traits;

pub use dispatcher::{NotificationDispatcher, NotificationRequest};
pub use notifications_model::{NewNotification, Notification, NotificationDB, Severity};
pub use notifications_repository::NotificationRepository;
pub use notifications_traits::NotificationRepositoryTrait;
