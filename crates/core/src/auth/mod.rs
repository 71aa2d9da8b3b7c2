mod session_provider;

pub use session_provider::{AuthError, Session, SessionProviderTrait, StaticSessionProvider};
