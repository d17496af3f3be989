//! Backend contract of the registration flow.

use crate::error::AuthError;
use artis_domain::account::{CountryList, Identity, RegisteredUser, RegistrationRequest};
use artis_kernel::safe_nanoid;
use async_trait::async_trait;
use fxhash::FxHashSet;
use parking_lot::Mutex;
use tracing::{debug, info};

/// Account endpoints consumed by the store and the registration page.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Country records with their dialing codes.
    async fn countries(&self) -> Result<CountryList, AuthError>;

    /// Creates an account. Rejections come back as [`AuthError::Service`].
    async fn register(&self, request: RegistrationRequest) -> Result<RegisteredUser, AuthError>;
}

/// Process-local backend used by the shell demo and tests.
///
/// Rejects a second registration of the same email or phone number.
#[derive(Debug, Default)]
pub struct InMemoryAuthService {
    countries: Option<CountryList>,
    taken: Mutex<FxHashSet<String>>,
}

impl InMemoryAuthService {
    #[must_use]
    pub fn new(countries: CountryList) -> Self {
        Self { countries: Some(countries), taken: Mutex::default() }
    }

    /// A backend whose country lookup always fails.
    #[must_use]
    pub fn without_countries() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn accounts(&self) -> usize {
        self.taken.lock().len()
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn countries(&self) -> Result<CountryList, AuthError> {
        self.countries.clone().ok_or_else(|| AuthError::Service {
            message: "Country lookup unavailable".into(),
            context: None,
        })
    }

    async fn register(&self, request: RegistrationRequest) -> Result<RegisteredUser, AuthError> {
        let login = match &request.identity {
            Identity::Email { email } => email.to_lowercase(),
            Identity::Phone { phone_number, country_id } => format!("{country_id}:{phone_number}"),
        };

        if !self.taken.lock().insert(login) {
            debug!(role = %request.role, "Duplicate registration rejected");
            return Err(AuthError::Service { message: "Account already exists".into(), context: None });
        }

        let user = RegisteredUser {
            id: Some(safe_nanoid!()),
            email: request.email().map(str::to_owned),
            phone_number: request.phone_number().map(str::to_owned),
        };
        info!(id = ?user.id, role = %request.role, "Account registered");
        Ok(user)
    }
}
