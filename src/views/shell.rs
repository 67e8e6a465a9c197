//! Navigation shell - the single owner of view state.
//!
//! The whole navigation state is one serializable [`ViewState`] value. It only
//! changes through [`Shell::dispatch`] with a [`ShellEvent`]; components receive
//! it read-only. Every applied transition bumps a generation counter, and
//! asynchronous results carry the [`Ticket`] they were issued under so a result
//! that arrives after its screen is gone can be dropped.

use crate::entities::{EmployeeModel, EntityKind, EnvelopeModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Top-level navigation tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Envelopes,
    Employees,
    Clients,
    Articles,
    Reports,
}

impl Tab {
    pub const ALL: [Self; 5] = [
        Self::Envelopes,
        Self::Employees,
        Self::Clients,
        Self::Articles,
        Self::Reports,
    ];

    /// Record kind managed on this tab, if the tab has a list and a form.
    #[must_use]
    pub const fn kind(self) -> Option<EntityKind> {
        match self {
            Self::Envelopes => Some(EntityKind::Envelope),
            Self::Employees => Some(EntityKind::Employee),
            Self::Clients | Self::Articles | Self::Reports => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Envelopes => "Envelopes",
            Self::Employees => "Employees",
            Self::Clients => "Clients",
            Self::Articles => "Articles",
            Self::Reports => "Reports",
        })
    }
}

/// A record opened for editing, tagged by kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum EditTarget {
    Envelope(EnvelopeModel),
    Employee(EmployeeModel),
}

impl EditTarget {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Envelope(_) => EntityKind::Envelope,
            Self::Employee(_) => EntityKind::Employee,
        }
    }
}

/// What the form overlay is doing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormTarget {
    Create,
    Edit(EditTarget),
}

/// Complete navigation state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub active_tab: Tab,
    /// `Some` while the form overlay is shown.
    pub form: Option<FormTarget>,
}

impl ViewState {
    #[must_use]
    pub const fn form_visible(&self) -> bool {
        self.form.is_some()
    }

    #[must_use]
    pub const fn editing_target(&self) -> Option<&EditTarget> {
        match &self.form {
            Some(FormTarget::Edit(target)) => Some(target),
            _ => None,
        }
    }
}

/// The closed set of navigation transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum ShellEvent {
    SelectTab(Tab),
    CreateNew,
    Edit(EditTarget),
    Submitted,
    Cancelled,
}

/// What the desk should render.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen<'a> {
    List(EntityKind),
    Form {
        kind: EntityKind,
        editing: Option<&'a EditTarget>,
    },
    UnderConstruction(Tab),
}

/// View generation an asynchronous call was issued under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Owner of [`ViewState`].
#[derive(Debug, Default)]
pub struct Shell {
    state: ViewState,
    generation: u64,
}

impl Shell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a previously serialized state.
    #[must_use]
    pub const fn from_state(state: ViewState) -> Self {
        Self {
            state,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    /// Whether no transition happened since `ticket` was issued.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Applies `event`. Returns `false` when the event does not apply to the
    /// current state and nothing changed.
    pub fn dispatch(&mut self, event: ShellEvent) -> bool {
        let applied = match event {
            ShellEvent::SelectTab(tab) => {
                self.state.active_tab = tab;
                self.state.form = None;
                true
            }
            ShellEvent::CreateNew => {
                if self.state.active_tab.kind().is_some() {
                    self.state.form = Some(FormTarget::Create);
                    true
                } else {
                    false
                }
            }
            ShellEvent::Edit(target) => {
                if self.state.active_tab.kind() == Some(target.kind()) {
                    self.state.form = Some(FormTarget::Edit(target));
                    true
                } else {
                    warn!(
                        "Ignoring edit of {} on the {} tab",
                        target.kind(),
                        self.state.active_tab
                    );
                    false
                }
            }
            ShellEvent::Submitted | ShellEvent::Cancelled => self.state.form.take().is_some(),
        };

        if applied {
            self.generation += 1;
            debug!(
                "View state now {:?} (generation {})",
                self.state, self.generation
            );
        }
        applied
    }

    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        let tab = self.state.active_tab;
        match (tab.kind(), &self.state.form) {
            (None, _) => Screen::UnderConstruction(tab),
            (Some(kind), None) => Screen::List(kind),
            (Some(kind), Some(FormTarget::Create)) => Screen::Form {
                kind,
                editing: None,
            },
            (Some(kind), Some(FormTarget::Edit(target))) => Screen::Form {
                kind,
                editing: Some(target),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::EmployeeStatus;
    use crate::test_utils::{sample_employee_model, sample_envelope_model};

    #[test]
    fn test_initial_state_is_envelope_list() {
        let shell = Shell::new();
        assert_eq!(shell.state().active_tab, Tab::Envelopes);
        assert!(!shell.state().form_visible());
        assert_eq!(shell.screen(), Screen::List(EntityKind::Envelope));
    }

    #[test]
    fn test_create_then_cancel() {
        let mut shell = Shell::new();
        assert!(shell.dispatch(ShellEvent::CreateNew));
        assert_eq!(shell.state().form, Some(FormTarget::Create));
        assert!(shell.state().editing_target().is_none());

        assert!(shell.dispatch(ShellEvent::Cancelled));
        assert_eq!(shell.state().form, None);
        assert!(!shell.dispatch(ShellEvent::Cancelled));
    }

    #[test]
    fn test_edit_sets_target_and_submit_clears_it() {
        let mut shell = Shell::new();
        let envelope = sample_envelope_model("Ana Rodríguez");
        assert!(shell.dispatch(ShellEvent::Edit(EditTarget::Envelope(envelope.clone()))));
        assert_eq!(
            shell.state().editing_target(),
            Some(&EditTarget::Envelope(envelope))
        );

        assert!(shell.dispatch(ShellEvent::Submitted));
        assert_eq!(shell.state(), &ViewState::default());
    }

    #[test]
    fn test_edit_of_wrong_kind_is_ignored() {
        let mut shell = Shell::new();
        let employee = sample_employee_model("María", "González", EmployeeStatus::Active);
        assert!(!shell.dispatch(ShellEvent::Edit(EditTarget::Employee(employee))));
        assert!(!shell.state().form_visible());
    }

    #[test]
    fn test_select_tab_clears_form() {
        let mut shell = Shell::new();
        shell.dispatch(ShellEvent::CreateNew);
        shell.dispatch(ShellEvent::SelectTab(Tab::Employees));
        assert_eq!(shell.state().active_tab, Tab::Employees);
        assert!(!shell.state().form_visible());
    }

    #[test]
    fn test_placeholder_tabs() {
        let mut shell = Shell::new();
        shell.dispatch(ShellEvent::SelectTab(Tab::Reports));
        assert_eq!(shell.screen(), Screen::UnderConstruction(Tab::Reports));
        assert!(!shell.dispatch(ShellEvent::CreateNew));
    }

    #[test]
    fn test_tickets_expire_on_transition() {
        let mut shell = Shell::new();
        let ticket = shell.ticket();
        assert!(shell.is_current(ticket));

        // Ignored events keep tickets alive
        shell.dispatch(ShellEvent::Cancelled);
        assert!(shell.is_current(ticket));

        shell.dispatch(ShellEvent::SelectTab(Tab::Employees));
        assert!(!shell.is_current(ticket));
    }

    #[test]
    fn test_view_state_serializes() {
        let mut shell = Shell::new();
        shell.dispatch(ShellEvent::SelectTab(Tab::Employees));
        shell.dispatch(ShellEvent::CreateNew);

        let json = serde_json::to_string(shell.state()).unwrap();
        assert_eq!(json, r#"{"active_tab":"employees","form":"create"}"#);

        let restored: ViewState = serde_json::from_str(&json).unwrap();
        let restored = Shell::from_state(restored);
        assert_eq!(restored.state(), shell.state());
    }
}
