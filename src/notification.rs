//! Transient, self-dismissing notifications.
//!
//! A notification is shown, starts fading after the display duration and is
//! removed once the fade transition has finished. The close control starts
//! the same fade immediately. Notifications are independent of each other:
//! every call to [`Notifications::show`] adds one, and nothing deduplicates
//! or caps them.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifier of one notification, unique for the life of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
}

impl NotificationKind {
    /// CSS class applied to the banner, `notification-<kind>`.
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "notification-info",
            NotificationKind::Success => "notification-success",
        }
    }

    /// Font Awesome icon name shown in front of the message.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info-circle",
            NotificationKind::Success => "check-circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationPhase {
    Visible,
    /// The fade-out transition is running; removal is pending.
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// Time since page mount when the notification was shown.
    pub created_at: Duration,
    pub phase: NotificationPhase,
}

impl NotificationRecord {
    pub fn is_fading(&self) -> bool {
        self.phase == NotificationPhase::FadingOut
    }
}

/// Active notifications in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    active: Vec<NotificationRecord>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visible notification and return its id.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Duration,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let record = NotificationRecord {
            id,
            message: message.into(),
            kind,
            created_at: now,
            phase: NotificationPhase::Visible,
        };
        tracing::debug!(%id, kind = ?record.kind, "notification shown");
        self.active.push(record);
        id
    }

    /// Start the fade-out of a visible notification.
    ///
    /// Returns `false` when the notification is already fading or gone, so
    /// a late display timeout after an early dismissal does nothing.
    pub fn begin_fade(&mut self, id: NotificationId) -> bool {
        match self.active.iter_mut().find(|n| n.id == id) {
            Some(record) if record.phase == NotificationPhase::Visible => {
                record.phase = NotificationPhase::FadingOut;
                true
            }
            _ => false,
        }
    }

    /// Remove a notification once its fade has finished.
    pub fn remove(&mut self, id: NotificationId) -> Option<NotificationRecord> {
        let index = self.active.iter().position(|n| n.id == id)?;
        tracing::debug!(%id, "notification removed");
        Some(self.active.remove(index))
    }

    pub fn get(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.active.iter().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotificationRecord> {
        self.active.iter()
    }

    pub fn as_slice(&self) -> &[NotificationRecord] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_appends_in_order() {
        let mut notes = Notifications::new();
        let a = notes.show("first", NotificationKind::Info, Duration::ZERO);
        let b = notes.show("second", NotificationKind::Success, Duration::from_secs(1));

        assert_ne!(a, b);
        assert_eq!(notes.len(), 2);
        let messages: Vec<_> = notes.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(notes.get(b).unwrap().created_at, Duration::from_secs(1));
    }

    #[test]
    fn test_fade_only_once() {
        let mut notes = Notifications::new();
        let id = notes.show("hello", NotificationKind::Info, Duration::ZERO);

        assert!(notes.begin_fade(id));
        assert!(notes.get(id).unwrap().is_fading());
        assert!(!notes.begin_fade(id));
    }

    #[test]
    fn test_remove() {
        let mut notes = Notifications::new();
        let id = notes.show("hello", NotificationKind::Info, Duration::ZERO);

        assert!(notes.remove(id).is_some());
        assert!(notes.is_empty());
        assert!(notes.remove(id).is_none());
        assert!(!notes.begin_fade(id));
    }

    #[test]
    fn test_kind_presentation() {
        assert_eq!(NotificationKind::Success.css_class(), "notification-success");
        assert_eq!(NotificationKind::Success.icon(), "check-circle");
        assert_eq!(NotificationKind::Info.icon(), "info-circle");
    }
}
