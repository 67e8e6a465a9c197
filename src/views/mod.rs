//! Front-end-agnostic view state: navigation, lists, forms and notifications.

pub mod desk;
pub mod form;
pub mod list;
pub mod notify;
pub mod shell;

pub use desk::Desk;
pub use form::{FormView, SubmitOutcome};
pub use list::{ListState, ListView};
pub use notify::{Level, Notification};
pub use shell::{EditTarget, FormTarget, Screen, Shell, ShellEvent, Tab, Ticket, ViewState};
