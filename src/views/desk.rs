//! The desk: one shell, a list per record kind, and the open form.
//!
//! `Desk` wires the pieces together the way a front end drives them. Tab
//! changes fetch the tab's list; fetch results are accepted only under the
//! ticket they were issued with. Saved records are merged into their list
//! before the form closes.
//!
//! This is the state holder for a long-lived front end that keeps one screen
//! open. The Discord bot does not use it: each slash command is stateless and
//! builds its own `ListView` or `FormView` for the one interaction.

use crate::core::kind::{Employees, Envelopes, RecordKind};
use crate::entities::{EmployeeModel, EnvelopeModel};
use crate::errors::Result;
use crate::views::{
    form::{FormView, SubmitOutcome},
    list::ListView,
    notify::Notification,
    shell::{EditTarget, Screen, Shell, ShellEvent, Tab, Ticket, ViewState},
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

#[derive(Default)]
pub struct Desk {
    shell: Shell,
    envelopes: ListView<Envelopes>,
    employees: ListView<Employees>,
    envelope_form: Option<FormView<Envelopes>>,
    employee_form: Option<FormView<Employees>>,
    notifications: Vec<Notification>,
}

impl Desk {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the list for the initial tab.
    pub async fn open(&mut self, db: &DatabaseConnection) {
        let tab = self.shell.state().active_tab;
        info!("Opening desk on the {tab} tab");
        self.fetch_active(db).await;
    }

    /// Switches tabs, closing any form, and fetches the new tab's list.
    pub async fn select_tab(&mut self, db: &DatabaseConnection, tab: Tab) {
        self.shell.dispatch(ShellEvent::SelectTab(tab));
        self.envelope_form = None;
        self.employee_form = None;
        self.fetch_active(db).await;
    }

    async fn fetch_active(&mut self, db: &DatabaseConnection) {
        let ticket = self.shell.ticket();
        match self.shell.state().active_tab {
            Tab::Envelopes => {
                self.envelopes.mark_loading();
                let result = Envelopes::list(db).await;
                self.accept_envelopes(ticket, result);
            }
            Tab::Employees => {
                self.employees.mark_loading();
                let result = Employees::list(db).await;
                self.accept_employees(ticket, result);
            }
            Tab::Clients | Tab::Articles | Tab::Reports => {}
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        self.shell.ticket()
    }

    /// Applies an envelope fetch issued under `ticket`. Returns `false` and
    /// discards the result when the view has moved on.
    pub fn accept_envelopes(&mut self, ticket: Ticket, result: Result<Vec<EnvelopeModel>>) -> bool {
        accept(&self.shell, &mut self.envelopes, &mut self.notifications, ticket, result)
    }

    /// Employee counterpart of [`Desk::accept_envelopes`].
    pub fn accept_employees(&mut self, ticket: Ticket, result: Result<Vec<EmployeeModel>>) -> bool {
        accept(&self.shell, &mut self.employees, &mut self.notifications, ticket, result)
    }

    /// Opens a blank form for the active tab's kind.
    pub fn create_new(&mut self) -> bool {
        if !self.shell.dispatch(ShellEvent::CreateNew) {
            return false;
        }
        match self.shell.state().active_tab {
            Tab::Envelopes => self.envelope_form = Some(FormView::create()),
            Tab::Employees => self.employee_form = Some(FormView::create()),
            Tab::Clients | Tab::Articles | Tab::Reports => {}
        }
        true
    }

    /// Opens a form seeded from `target`.
    pub fn edit(&mut self, target: EditTarget) -> bool {
        if !self.shell.dispatch(ShellEvent::Edit(target.clone())) {
            return false;
        }
        match target {
            EditTarget::Envelope(record) => self.envelope_form = Some(FormView::edit(record)),
            EditTarget::Employee(record) => self.employee_form = Some(FormView::edit(record)),
        }
        true
    }

    /// Closes the form and discards its draft.
    pub fn cancel(&mut self) {
        self.shell.dispatch(ShellEvent::Cancelled);
        self.envelope_form = None;
        self.employee_form = None;
    }

    /// Submits the open form. Returns whether a record was saved.
    ///
    /// On success the record is merged into its list and the form closes. On
    /// failure the form stays open with its draft.
    pub async fn submit(&mut self, db: &DatabaseConnection) -> bool {
        let saved = if let Some(form) = self.envelope_form.as_mut() {
            submit(form, &mut self.envelopes, &mut self.notifications, db).await
        } else if let Some(form) = self.employee_form.as_mut() {
            submit(form, &mut self.employees, &mut self.notifications, db).await
        } else {
            debug!("Submit with no open form");
            return false;
        };

        if saved {
            self.shell.dispatch(ShellEvent::Submitted);
            self.envelope_form = None;
            self.employee_form = None;
        }
        saved
    }

    /// Starts the confirm-then-delete flow for an employee.
    pub fn request_delete_employee(&mut self, id: &str) -> bool {
        self.employees.request_delete(id)
    }

    pub fn cancel_delete(&mut self) {
        self.employees.cancel_delete();
    }

    pub async fn confirm_delete(&mut self, db: &DatabaseConnection) {
        if let Some(notification) = self.employees.confirm_delete(db).await {
            self.notifications.push(notification);
        }
    }

    #[must_use]
    pub const fn view_state(&self) -> &ViewState {
        self.shell.state()
    }

    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        self.shell.screen()
    }

    #[must_use]
    pub const fn envelopes(&self) -> &ListView<Envelopes> {
        &self.envelopes
    }

    pub fn envelopes_mut(&mut self) -> &mut ListView<Envelopes> {
        &mut self.envelopes
    }

    #[must_use]
    pub const fn employees(&self) -> &ListView<Employees> {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut ListView<Employees> {
        &mut self.employees
    }

    pub fn envelope_form(&mut self) -> Option<&mut FormView<Envelopes>> {
        self.envelope_form.as_mut()
    }

    pub fn employee_form(&mut self) -> Option<&mut FormView<Employees>> {
        self.employee_form.as_mut()
    }

    /// Drains pending notifications for display.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

fn accept<K: RecordKind>(
    shell: &Shell,
    list: &mut ListView<K>,
    notifications: &mut Vec<Notification>,
    ticket: Ticket,
    result: Result<Vec<K::Record>>,
) -> bool {
    if !shell.is_current(ticket) {
        debug!("Discarding stale {} fetch", K::KIND);
        return false;
    }
    if let Some(notification) = list.apply_fetch(result) {
        notifications.push(notification);
    }
    true
}

async fn submit<K: RecordKind>(
    form: &mut FormView<K>,
    list: &mut ListView<K>,
    notifications: &mut Vec<Notification>,
    db: &DatabaseConnection,
) -> bool {
    match form.submit(db).await {
        SubmitOutcome::Saved {
            record,
            notification,
        } => {
            list.merge(record);
            notifications.push(notification);
            true
        }
        SubmitOutcome::Invalid { notification, .. } | SubmitOutcome::Failed { notification } => {
            notifications.push(notification);
            false
        }
    }
}
