//! Common imports for feature slices.

pub use crate::dialog::{BusDialogs, DialogPresenter, PolicyDialog, PolicyTab};
pub use crate::forms::{ControlValue, ErrorKey, FormControl, Rule};
pub use crate::i18n::{Catalog, Translator};
pub use crate::notify::{Notifier, Toast, ToastCenter, ToastEvent, ToastKind};
pub use crate::routing::{BusNavigator, NavigationRequested, Navigator};
pub use crate::security::guard::{Guard, SessionSource};
pub use artis_domain::roles::RoleSet;
pub use artis_domain::session::Session;
