//! Transient status banners.
//!
//! # Invariants
//! - At most one banner is visible; `show` replaces the current one.
//! - Expiry and dismissal only act on the banner they were issued for.

use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// How long a banner stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Info => "ℹ️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}

/// Single-slot banner holder.
#[derive(Debug)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: NotificationId,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            current: None,
            next_id: 1,
            ttl,
        }
    }

    /// Shows a banner, replacing any visible one.
    pub fn show(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Notification {
            id,
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
        id
    }

    /// Closes banner `id` if it is still the visible one.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
            return true;
        }
        false
    }

    /// Drops the visible banner once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|current| now >= current.expires_at)
        {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
