//! The interactive layer: gestures, selection, the attribute side panel,
//! notifications, and the session that saves and loads through a repository.

mod notify;
mod panel;
mod selection;
mod session;
mod surface;
mod viewport;

pub use notify::{MAX_PENDING, Notification, NotificationLevel, Notifications};
pub use panel::{FieldValue, PanelField, PanelInput, PanelView};
pub use selection::Selection;
pub use session::{EditorSession, SaveGuard, SaveTicket};
pub use surface::{EditorSurface, Gesture, GestureOutcome};
pub use viewport::Viewport;
