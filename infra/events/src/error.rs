use std::borrow::Cow;

/// Errors raised by [`crate::EventBus`] operations.
#[artis_derive::artis_error]
pub enum EventBusError {
    /// A stored sender could not be downcast to the requested event type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The event type is registered with a different channel kind.
    #[error("Channel kind mismatch{}: {message}", format_context(.context))]
    ChannelKindMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Broadcast channels need room for at least one event.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
