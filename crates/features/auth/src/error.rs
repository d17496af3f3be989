use std::borrow::Cow;

/// Errors of the registration flow.
#[artis_derive::artis_error]
pub enum AuthError {
    /// Phone registration needs the country table, which has not been fetched.
    #[error("Countries unavailable{}: {message}", format_context(.context))]
    CountriesUnavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Submission attempted while some fields fail validation.
    #[error("Invalid form{}: {message}", format_context(.context))]
    InvalidForm { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The backend rejected or failed the call. `message` is shown to the user.
    #[error("Auth service error{}: {message}", format_context(.context))]
    Service { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Event bus error{}: {source}", format_context(.context))]
    Bus { source: artis_event_bus::EventBusError, context: Option<Cow<'static, str>> },

    #[error("Routing error{}: {source}", format_context(.context))]
    Routing { source: artis_kernel::routing::RoutingError, context: Option<Cow<'static, str>> },

    #[error("Internal auth error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl AuthError {
    /// Text suitable for a toast: the bare message for service errors.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } => message.to_string(),
            other => other.to_string(),
        }
    }
}
