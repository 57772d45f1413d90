/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A dismissable message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

/// Older notifications are dropped once this many are pending.
pub const MAX_PENDING: usize = 50;

/// Pending notifications, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    next_id: u64,
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification and mirrors it to the log. Returns its id.
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let message = message.into();
        match level {
            NotificationLevel::Error => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification { id, level, message });
        if self.items.len() > MAX_PENDING {
            let overflow = self.items.len() - MAX_PENDING;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Error, message)
    }

    /// Removes a notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
