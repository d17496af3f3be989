use crate::Shell;
use anyhow::{Context, Result, bail};
use artis::domain::constants::{MSG_COUNTRIES_UNAVAILABLE, ROUTE_REGISTER};
use artis::events::EventReceiverExt;
use artis::features::auth::register::{RegistrationForm, RegistrationMode};
use artis::features::auth::{Auth, AuthError};
use artis::kernel::forms::{ErrorKey, PhoneNumber};
use artis::kernel::i18n::Translator;
use artis::kernel::notify::{Notifier, ToastEvent, ToastKind};
use artis::kernel::routing::{CurrentNavigation, NavigationOutcome};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::time::timeout;
use tracing::{debug, info};

/// How the user can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Phone { number: String, dial_code: String },
}

/// What the user typed into the registration page.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub contact: Contact,
    pub password: String,
    pub accept_terms: bool,
}

impl Registration {
    fn fill(&self, form: &mut RegistrationForm) {
        form.first_name.set_value(self.first_name.clone());
        form.last_name.set_value(self.last_name.clone());
        match &self.contact {
            Contact::Email(email) => form.email.set_value(email.clone()),
            Contact::Phone { number, dial_code } => {
                form.set_mode(RegistrationMode::Phone);
                form.phone.set_value(Some(PhoneNumber::new(number.as_str(), dial_code.as_str())));
            },
        }
        form.password.set_value(self.password.clone());
        form.terms.set_value(self.accept_terms);
    }
}

/// First visible reaction of the page to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Toast { kind: ToastKind, message: String },
    /// The page moved on, e.g. to mobile validation.
    Navigated { path: String },
    /// Nothing was sent; these fields fail validation.
    Invalid { fields: Vec<(&'static str, Vec<ErrorKey>)> },
}

impl Shell {
    /// Opens the registration page, submits `registration` and reports the
    /// first toast or navigation it causes.
    ///
    /// # Errors
    /// The page is not reachable for the current session, or nothing reacted
    /// to the submission in time.
    pub async fn register(&self, registration: &Registration) -> Result<RegistrationOutcome> {
        let outcome = self.navigate(ROUTE_REGISTER).await?;
        let NavigationOutcome::Activated { module: Some(module), .. } = &outcome else {
            bail!("Registration page is not reachable (landed on /{})", outcome.path());
        };
        if outcome.path() != ROUTE_REGISTER.trim_start_matches('/') {
            bail!("Registration page is not reachable (landed on /{})", outcome.path());
        }
        let auth = module.downcast_ref::<Auth>().context("Unexpected auth module state")?;

        let mut toasts = self.bus().subscribe::<ToastEvent>()?;
        let mut current = self.bus().subscribe_watch(CurrentNavigation::default())?;

        let mut page = auth.register_page(self.page_context())?;
        page.countries_ready().await;
        registration.fill(page.form_mut());

        match page.submit() {
            Ok(()) => {},
            Err(AuthError::InvalidForm { message, .. }) => {
                debug!(fields = %message, "Registration not sent");
                let fields = page
                    .form()
                    .invalid_fields()
                    .into_iter()
                    .map(|(name, errors)| (name, errors.iter().copied().collect()))
                    .collect();
                return Ok(RegistrationOutcome::Invalid { fields });
            },
            Err(AuthError::CountriesUnavailable { .. }) => {
                self.toasts().error(&self.translator().instant(MSG_COUNTRIES_UNAVAILABLE));
            },
            Err(e) => return Err(e.into()),
        }

        let reaction = timeout(self.wait_limit(), first_reaction(&mut toasts, &mut current))
            .await
            .context("The registration page did not react")?;
        page.teardown();

        if let Ok(outcome) = &reaction {
            info!(?outcome, "Registration finished");
        }
        reaction
    }
}

async fn first_reaction(
    toasts: &mut broadcast::Receiver<Arc<ToastEvent>>,
    current: &mut watch::Receiver<Arc<CurrentNavigation>>,
) -> Result<RegistrationOutcome> {
    loop {
        tokio::select! {
            event = EventReceiverExt::recv(toasts) => {
                if let ToastEvent::Shown(toast) = event.context("Toast channel closed")?.as_ref() {
                    return Ok(RegistrationOutcome::Toast { kind: toast.kind, message: toast.message.clone() });
                }
            },
            state = EventReceiverExt::recv(current) => {
                if let CurrentNavigation(Some(outcome)) = state.context("Router closed")?.as_ref() {
                    return Ok(RegistrationOutcome::Navigated { path: format!("/{}", outcome.path()) });
                }
            },
        }
    }
}
