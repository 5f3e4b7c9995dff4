//! Platform-free UI logic for the Canventory front end.
//!
//! Every DOM-facing concern is reached through a small trait
//! (`DialogSurface`, `Notifier`, `PreferenceStore`, `ConfirmableForm`,
//! `CanventoryApi`) so the same state machines drive the browser build and
//! the native tests.

pub mod api;
pub mod categories;
pub mod confirm;
pub mod emoji;
pub mod error;
pub mod modal;
pub mod reorder;
pub mod settings;
pub mod theme;
pub mod toast;

pub use api::CanventoryApi;
pub use error::{ApiError, UiError};
pub use modal::{DialogHandle, DialogOutcome, DialogRequest, DialogSurface, ModalController};
pub use toast::{Notifier, Toast, ToastKind};
