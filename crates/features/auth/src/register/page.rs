use super::countries::CountryTable;
use super::form::RegistrationForm;
use crate::error::{AuthError, AuthErrorExt};
use crate::service::AuthService;
use crate::store::{AuthAction, AuthErrorState, AuthStore, RegisterUserState, ResetParams};
use artis_domain::account::RegisteredUser;
use artis_domain::constants::{MSG_VERIFY_EMAIL_SENT, ROUTE_VALIDATE_MOBILE};
use artis_event_bus::{EventReceiverExt, Lifetime, Unsubscriber};
use artis_kernel::dialog::{DialogPresenter, PolicyDialog, PolicyTab};
use artis_kernel::i18n::Translator;
use artis_kernel::notify::Notifier;
use artis_kernel::routing::Navigator;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Presentation collaborators of the page.
#[derive(Clone)]
pub struct PageContext {
    pub notifier: Arc<dyn Notifier>,
    pub translator: Arc<dyn Translator>,
    pub navigator: Arc<dyn Navigator>,
    pub dialogs: Arc<dyn DialogPresenter>,
}

impl std::fmt::Debug for PageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContext").finish_non_exhaustive()
    }
}

/// Controller of the registration page for as long as it is active.
///
/// Store reactions and the country fetch run on spawned tasks. They stop
/// acting once [`RegisterPage::teardown`] runs or the page is dropped.
#[derive(Debug)]
pub struct RegisterPage {
    form: RegistrationForm,
    store: AuthStore,
    ctx: PageContext,
    role: String,
    countries: Arc<RwLock<CountryTable>>,
    country_fetch: Option<JoinHandle<()>>,
    unsubscriber: Unsubscriber,
}

impl RegisterPage {
    /// Activates the page: resets the store, subscribes to its selectors and
    /// starts the country fetch. Must run inside a tokio runtime.
    pub fn init(store: AuthStore, ctx: PageContext, role: impl Into<String>) -> Result<Self, AuthError> {
        let handle = Handle::try_current().map_err(|e| AuthError::Internal {
            message: e.to_string().into(),
            context: Some("Registration page needs a runtime".into()),
        })?;

        store.dispatch(AuthAction::ResetAuthState(ResetParams::default()))?;

        let unsubscriber = Unsubscriber::new();
        let mut users = store.register_user()?;
        let mut errors = store.auth_error()?;

        let (reactions, mut lifetime) = (ctx.clone(), unsubscriber.lifetime());
        handle.spawn(async move {
            while let Some(state) = users.recv_until(&mut lifetime).await {
                if let RegisterUserState(Some(user)) = state.as_ref() {
                    on_registered(&reactions, user);
                }
            }
            debug!("register_user subscription closed");
        });

        let (reactions, mut lifetime) = (ctx.clone(), unsubscriber.lifetime());
        handle.spawn(async move {
            while let Some(state) = errors.recv_until(&mut lifetime).await {
                if let AuthErrorState(Some(message)) = state.as_ref()
                    && !message.is_empty()
                {
                    reactions.notifier.error(&reactions.translator.instant(message));
                }
            }
            debug!("auth_error subscription closed");
        });

        let countries = Arc::new(RwLock::new(CountryTable::NotLoaded));
        let country_fetch = handle.spawn(fetch_countries(
            store.service(),
            countries.clone(),
            unsubscriber.lifetime(),
        ));

        info!("Registration page initialized");
        Ok(Self {
            form: RegistrationForm::new(),
            store,
            ctx,
            role: role.into(),
            countries,
            country_fetch: Some(country_fetch),
            unsubscriber,
        })
    }

    #[must_use]
    pub const fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    #[must_use]
    pub fn countries_loaded(&self) -> bool {
        self.countries.read().is_loaded()
    }

    /// Waits for the country fetch started by [`RegisterPage::init`].
    pub async fn countries_ready(&mut self) {
        if let Some(fetch) = self.country_fetch.take()
            && let Err(e) = fetch.await
        {
            warn!(error = %e, "Country fetch task failed");
        }
    }

    /// Validates, builds the request and dispatches it. Results arrive
    /// through the store subscriptions.
    pub fn submit(&mut self) -> Result<(), AuthError> {
        let request = {
            let countries = self.countries.read();
            self.form.submit(&countries, &self.role)?
        };
        debug!(?request, "Registration submitted");
        self.store.dispatch(AuthAction::Register(request))
    }

    pub fn show_policy(&self, tab: PolicyTab) {
        self.ctx.dialogs.present(PolicyDialog::new(tab));
    }

    /// Stops every subscription of the page. Idempotent.
    pub fn teardown(&mut self) {
        if !self.unsubscriber.is_unsubscribed() {
            self.unsubscriber.unsubscribe();
            debug!("Registration page torn down");
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.unsubscriber.is_unsubscribed()
    }
}

impl Drop for RegisterPage {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn on_registered(ctx: &PageContext, user: &RegisteredUser) {
    let has = |field: Option<&String>| field.is_some_and(|v| !v.is_empty());

    if has(user.phone_number.as_ref()) {
        if let Err(e) = ctx.navigator.navigate(ROUTE_VALIDATE_MOBILE).context("Mobile validation") {
            warn!(error = %e, "Navigation after registration failed");
        }
    } else if has(user.email.as_ref()) {
        ctx.notifier.success(&ctx.translator.instant(MSG_VERIFY_EMAIL_SENT));
    }
}

async fn fetch_countries(service: Arc<dyn AuthService>, table: Arc<RwLock<CountryTable>>, lifetime: Lifetime) {
    match service.countries().await {
        Ok(list) if !lifetime.is_ended() => {
            debug!(countries = list.data.len(), "Country table loaded");
            *table.write() = list.into();
        },
        Ok(_) => debug!("Country table discarded after teardown"),
        Err(e) => warn!(error = %e, "Country lookup failed; phone registration disabled"),
    }
}
