use std::borrow::Cow;

#[artis_derive::artis_error]
pub enum RoutingError {
    /// Redirects kept bouncing past the chase limit.
    #[error("Redirect loop{}: {message}", format_context(.context))]
    RedirectLoop { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A route targets a module nobody registered a loader for.
    #[error("Module not registered{}: {message}", format_context(.context))]
    ModuleNotRegistered { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The module loader failed. Activation is retried on the next navigation.
    #[error("Module load failed{}: {message}", format_context(.context))]
    ModuleLoad { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Event bus error{}: {source}", format_context(.context))]
    Bus { source: artis_event_bus::EventBusError, context: Option<Cow<'static, str>> },
}
