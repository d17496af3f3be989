//! Modal requests handed to the presentation layer.

use artis_event_bus::EventBus;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::warn;

/// Document shown by the policy dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PolicyTab {
    Privacy,
    Terms,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDialog {
    pub tab: PolicyTab,
    pub show_header: bool,
    pub class: Cow<'static, str>,
}

impl PolicyDialog {
    #[must_use]
    pub const fn new(tab: PolicyTab) -> Self {
        Self { tab, show_header: false, class: Cow::Borrowed("modal-xl modal-dialog-centered") }
    }
}

pub trait DialogPresenter: Send + Sync {
    fn present(&self, dialog: PolicyDialog);
}

/// Publishes dialog requests on the bus for whatever renders them.
#[derive(Debug, Clone)]
pub struct BusDialogs {
    bus: EventBus,
}

impl BusDialogs {
    #[must_use]
    pub const fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl DialogPresenter for BusDialogs {
    fn present(&self, dialog: PolicyDialog) {
        if let Err(e) = self.bus.publish(dialog) {
            warn!(error = %e, "Dialog request not published");
        }
    }
}
