//! Request-time redirect of locale-less paths to a localized path.

pub mod accept_language;
pub mod filter;
pub mod redirect;

pub use accept_language::{
    LanguagePreference,
    negotiate,
    parse_accept_language,
    preferred_locale,
};
pub use filter::{
    FilterDecision,
    filter,
};
pub use redirect::EdgeRedirect;
