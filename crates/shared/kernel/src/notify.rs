//! Transient notifications (toasts).

use crate::safe_nanoid;
use artis_domain::config::NotificationConfig;
use artis_event_bus::EventBus;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use strum_macros::{AsRefStr, Display};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
    /// Set once the toast is visible; `None` for sticky or queued toasts.
    pub expires_at: Option<Instant>,
    /// Whether the renderer offers a close button.
    pub close_button: bool,
    /// Placement hint for the renderer, e.g. `toast-top-full-width`.
    pub position_class: String,
}

/// Published on the bus whenever the visible set changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown(Toast),
    Dismissed(Toast),
}

/// Accepts display requests. Returns the toast id, or `None` when suppressed.
pub trait Notifier: Send + Sync {
    fn show(&self, kind: ToastKind, message: &str) -> Option<String>;

    fn success(&self, message: &str) -> Option<String> {
        self.show(ToastKind::Success, message)
    }

    fn error(&self, message: &str) -> Option<String> {
        self.show(ToastKind::Error, message)
    }

    fn info(&self, message: &str) -> Option<String> {
        self.show(ToastKind::Info, message)
    }

    fn warning(&self, message: &str) -> Option<String> {
        self.show(ToastKind::Warning, message)
    }
}

#[derive(Debug, Default)]
struct Board {
    active: VecDeque<Toast>,
    queued: VecDeque<Toast>,
}

/// In-process toast container honoring [`NotificationConfig`].
///
/// At most `max_opened` toasts are visible. Past that, the oldest one is
/// dismissed when `auto_dismiss` is set, otherwise the new toast waits in a
/// queue until a slot frees up.
#[derive(Debug)]
pub struct ToastCenter {
    config: NotificationConfig,
    board: Mutex<Board>,
    bus: Option<EventBus>,
}

impl ToastCenter {
    #[must_use]
    pub fn new(config: NotificationConfig) -> Self {
        Self { config, board: Mutex::new(Board::default()), bus: None }
    }

    /// Mirrors changes as [`ToastEvent`]s on `bus`.
    #[must_use]
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Visible toasts, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        self.board.lock().active.iter().cloned().collect()
    }

    #[must_use]
    pub fn queued(&self) -> usize {
        self.board.lock().queued.len()
    }

    /// Shows `message` as of `now`. Toasts that expired by then are dismissed
    /// first, so they neither block a duplicate nor take a slot.
    pub fn show_at(&self, kind: ToastKind, message: &str, now: Instant) -> Option<String> {
        let mut events = Vec::new();
        let id = {
            let mut board = self.board.lock();
            self.expire(&mut board, now, &mut events);

            let duplicate = board
                .active
                .iter()
                .chain(board.queued.iter())
                .any(|t| t.kind == kind && t.message == message);
            if self.config.prevent_duplicates && duplicate {
                debug!(%kind, text = message, "Duplicate toast suppressed");
                drop(board);
                self.emit(events);
                return None;
            }

            let toast = Toast {
                id: safe_nanoid!(),
                kind,
                message: message.to_owned(),
                expires_at: None,
                close_button: self.config.close_button,
                position_class: self.config.position_class.clone(),
            };
            let id = toast.id.clone();

            if self.is_full(&board) {
                if self.config.auto_dismiss {
                    if let Some(oldest) = board.active.pop_front() {
                        events.push(ToastEvent::Dismissed(oldest));
                    }
                } else {
                    debug!(%kind, "Toast queued");
                    board.queued.push_back(toast);
                    drop(board);
                    self.emit(events);
                    return Some(id);
                }
            }

            let toast = self.activate(toast, now);
            events.push(ToastEvent::Shown(toast.clone()));
            board.active.push_back(toast);
            id
        };

        self.emit(events);
        Some(id)
    }

    /// Closes a toast by id, promoting a queued one.
    pub fn close(&self, id: &str) -> Option<Toast> {
        self.close_at(id, Instant::now())
    }

    pub fn close_at(&self, id: &str, now: Instant) -> Option<Toast> {
        let mut events = Vec::new();
        let closed = {
            let mut board = self.board.lock();
            let position = board.active.iter().position(|t| t.id == id)?;
            let closed = board.active.remove(position)?;
            events.push(ToastEvent::Dismissed(closed.clone()));
            self.promote(&mut board, now, &mut events);
            closed
        };
        self.emit(events);
        Some(closed)
    }

    /// Drops toasts whose timeout elapsed at `now`. Returns them oldest first.
    pub fn dismiss_expired(&self, now: Instant) -> Vec<Toast> {
        let mut events = Vec::new();
        let expired = {
            let mut board = self.board.lock();
            self.expire(&mut board, now, &mut events)
        };
        self.emit(events);
        expired
    }

    fn expire(&self, board: &mut Board, now: Instant, events: &mut Vec<ToastEvent>) -> Vec<Toast> {
        let (expired, kept): (VecDeque<_>, VecDeque<_>) = board
            .active
            .drain(..)
            .partition(|t| t.expires_at.is_some_and(|deadline| deadline <= now));
        board.active = kept;
        events.extend(expired.iter().cloned().map(ToastEvent::Dismissed));
        self.promote(board, now, events);
        expired.into_iter().collect()
    }

    fn is_full(&self, board: &Board) -> bool {
        self.config.max_opened > 0 && board.active.len() >= self.config.max_opened
    }

    fn activate(&self, mut toast: Toast, now: Instant) -> Toast {
        if self.config.timeout_ms > 0 {
            toast.expires_at = Some(now + Duration::from_millis(self.config.timeout_ms));
        }
        toast
    }

    fn promote(&self, board: &mut Board, now: Instant, events: &mut Vec<ToastEvent>) {
        while !self.is_full(board) {
            let Some(next) = board.queued.pop_front() else { break };
            let toast = self.activate(next, now);
            events.push(ToastEvent::Shown(toast.clone()));
            board.active.push_back(toast);
        }
    }

    fn emit(&self, events: Vec<ToastEvent>) {
        let Some(bus) = &self.bus else { return };
        for event in events {
            if let Err(e) = bus.publish(event) {
                warn!(error = %e, "Toast event not published");
            }
        }
    }
}

impl Notifier for ToastCenter {
    fn show(&self, kind: ToastKind, message: &str) -> Option<String> {
        self.show_at(kind, message, Instant::now())
    }
}
