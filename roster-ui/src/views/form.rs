//! Employee form view: field caching, live validation, load-for-edit, save.

use crate::actions::{Action, Effect};
use crate::dom::{Document, NodeId};
use crate::error::UiError;
use crate::nav::{Fragment, NavScope};
use crate::notifications::{Notification, NotificationLevel};
use crate::views::ViewCtx;
use chrono::Utc;
use roster_core::{is_guid_shaped, new_employee_no, new_person_id, Employee, Status};

/// Actor recorded on every save.
const AUDIT_ACTOR: &str = "admin";

const SSN_MAX_LEN: usize = 10;

/// Controller for the form route.
///
/// If the template carries no form element the controller is inert and every
/// handler is a no-op. A form that is present but missing one of its named
/// fields fails bind instead.
#[derive(Debug)]
pub struct FormController {
    inner: Option<BoundForm>,
    scope: NavScope,
}

#[derive(Debug)]
struct BoundForm {
    form: NodeId,
    breadcrumb: NodeId,
    first_name: NodeId,
    last_name: NodeId,
    person_id: NodeId,
    ssn: NodeId,
    active: NodeId,
    was_validated: bool,
    edit_id: Option<String>,
}

impl FormController {
    pub fn bind(
        doc: &mut Document,
        fragment: &Fragment,
        scope: NavScope,
    ) -> Result<Self, UiError> {
        let Some(form) = doc.element_by_id("employee-form") else {
            return Ok(Self { inner: None, scope });
        };

        let first_name = require_field(doc, form, "firstName")?;
        let last_name = require_field(doc, form, "lastName")?;
        let person_id = require_field(doc, form, "personId")?;
        let ssn = require_field(doc, form, "ssn")?;
        let active = require_field(doc, form, "active")?;
        let breadcrumb =
            doc.element_by_id("breadcrumb-employee-name")
                .ok_or(UiError::MissingSlot {
                    view: "form",
                    slot: "breadcrumb-employee-name",
                })?;

        // Baseline constraints, in case the template was not updated.
        doc.set_required(first_name, true);
        doc.set_required(last_name, true);
        doc.set_required(ssn, true);
        doc.set_max_length(ssn, SSN_MAX_LEN);

        if let Some(save) = doc.descendant_by_id(form, "save-employee") {
            doc.set_on_click(save, Action::SubmitForm);
        }

        let edit_id = fragment.id_param().map(str::to_string);
        Ok(Self {
            inner: Some(BoundForm {
                form,
                breadcrumb,
                first_name,
                last_name,
                person_id,
                ssn,
                active,
                was_validated: false,
                edit_id,
            }),
            scope,
        })
    }

    /// Edit mode loads the record and locks the identifier field; create
    /// mode leaves it editable and clears the breadcrumb.
    pub async fn init(&mut self, ctx: &mut ViewCtx<'_>) -> Effect {
        let Some(inner) = &mut self.inner else {
            return Effect::None;
        };
        match inner.edit_id.clone() {
            Some(id) => inner.load_employee(&id, ctx, &self.scope).await,
            None => {
                ctx.doc.set_read_only(inner.person_id, false);
                inner.update_breadcrumb(ctx.doc);
            }
        }
        Effect::None
    }

    /// Live-input behavior, fired on every keystroke of the four text
    /// fields.
    pub fn handle_input(&mut self, field: NodeId, doc: &mut Document) {
        let Some(inner) = &mut self.inner else {
            return;
        };
        if ![inner.first_name, inner.last_name, inner.ssn, inner.person_id].contains(&field) {
            return;
        }

        doc.set_custom_validity(field, "");
        doc.remove_class(field, "is-invalid");

        // Enforce the SSN maximum here too, so pasted values shrink.
        if field == inner.ssn {
            let value = doc.value(field).to_string();
            if value.chars().count() > SSN_MAX_LEN {
                let truncated: String = value.chars().take(SSN_MAX_LEN).collect();
                doc.set_value(field, &truncated);
            }
        }

        if inner.was_validated {
            inner.report_field_validity(doc, field);
        }

        if field == inner.first_name || field == inner.last_name {
            inner.update_breadcrumb(doc);
        }
    }

    pub async fn handle_submit(&mut self, ctx: &mut ViewCtx<'_>) -> Effect {
        let Some(inner) = &mut self.inner else {
            return Effect::None;
        };

        let valid = inner.validate(ctx.doc);
        inner.was_validated = true;
        ctx.doc.add_class(inner.form, "was-validated");
        if !valid {
            return Effect::None;
        }

        inner.save(ctx, &self.scope).await
    }
}

fn require_field(doc: &Document, form: NodeId, name: &'static str) -> Result<NodeId, UiError> {
    doc.query_by_name(form, name).ok_or(UiError::MissingSlot {
        view: "form",
        slot: name,
    })
}

impl BoundForm {
    async fn load_employee(&mut self, id: &str, ctx: &mut ViewCtx<'_>, scope: &NavScope) {
        match ctx.api.get(id).await {
            Ok(employee) => {
                if scope.is_cancelled() {
                    return;
                }
                ctx.doc.set_value(self.ssn, &employee.ssn);
                ctx.doc.set_value(self.first_name, &employee.first_name);
                ctx.doc.set_value(self.last_name, &employee.last_name);
                ctx.doc.set_value(self.person_id, &employee.person_id);
                ctx.doc.set_checked(self.active, employee.status.is_active());
                ctx.doc.set_read_only(self.person_id, true);
                self.update_breadcrumb(ctx.doc);
                self.was_validated = false;
                ctx.doc.remove_class(self.form, "was-validated");
            }
            Err(err) => {
                tracing::error!(error = %err, person_id = id, "failed to load employee");
                if !scope.is_cancelled() {
                    ctx.notices.push(Notification::new(
                        NotificationLevel::Error,
                        "Could not load employee details.",
                    ));
                }
            }
        }
    }

    /// Breadcrumb shows the trimmed full name, empty when both parts blank.
    fn update_breadcrumb(&self, doc: &mut Document) {
        let first = doc.value(self.first_name).trim().to_string();
        let last = doc.value(self.last_name).trim().to_string();
        let label = format!("{first} {last}").trim().to_string();
        doc.set_text(self.breadcrumb, label);
    }

    /// Validation message for one field under the current document state.
    fn message_for(&self, doc: &Document, field: NodeId) -> Option<&'static str> {
        let value = doc.value(field).trim().to_string();
        if field == self.first_name {
            value.is_empty().then_some("First name is required.")
        } else if field == self.last_name {
            value.is_empty().then_some("Last name is required.")
        } else if field == self.ssn {
            if value.is_empty() {
                Some("SSN is required.")
            } else if value.chars().count() > SSN_MAX_LEN {
                Some("SSN must be at most 10 characters.")
            } else {
                None
            }
        } else if field == self.person_id {
            (!value.is_empty() && !is_guid_shaped(&value))
                .then_some("Invalid GUID format (xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)")
        } else {
            None
        }
    }

    fn report_field_validity(&self, doc: &mut Document, field: NodeId) {
        let message = self.message_for(doc, field);
        apply_validity(doc, field, message);
    }

    /// Synchronous whole-form validation; runs before any network call.
    fn validate(&self, doc: &mut Document) -> bool {
        let mut valid = true;
        for field in [self.first_name, self.last_name, self.ssn, self.person_id] {
            let message = self.message_for(doc, field);
            valid &= apply_validity(doc, field, message);
        }
        valid
    }

    async fn save(&mut self, ctx: &mut ViewCtx<'_>, scope: &NavScope) -> Effect {
        // Ensure an identifier exists before building the payload. The
        // generated value is written back into the field and survives a
        // failed save.
        let mut person_id = ctx.doc.value(self.person_id).trim().to_string();
        if person_id.is_empty() {
            person_id = new_person_id();
            ctx.doc.set_value(self.person_id, &person_id);
        }

        let now = Utc::now();
        let employee = Employee {
            person_id,
            ssn: ctx.doc.value(self.ssn).trim().to_string(),
            first_name: ctx.doc.value(self.first_name).trim().to_string(),
            last_name: ctx.doc.value(self.last_name).trim().to_string(),
            status: Status::from_active(ctx.doc.is_checked(self.active)),
            last_updated_by: AUDIT_ACTOR.to_string(),
            last_updated_date: now,
            employee_no: new_employee_no(),
            employment_start_date: now,
            employment_end_date: None,
        };

        let result = match &self.edit_id {
            Some(id) => ctx.api.update(id, &employee).await.map(|_| ()),
            None => ctx.api.create(&employee).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                if scope.is_cancelled() {
                    Effect::None
                } else {
                    Effect::Navigate("list".to_string())
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save employee");
                if !scope.is_cancelled() {
                    ctx.notices.push(Notification::new(
                        NotificationLevel::Error,
                        format!("Failed to save employee: {err}"),
                    ));
                }
                Effect::None
            }
        }
    }
}

fn apply_validity(doc: &mut Document, field: NodeId, message: Option<&'static str>) -> bool {
    match message {
        Some(message) => {
            doc.set_custom_validity(field, message);
            doc.add_class(field, "is-invalid");
            false
        }
        None => {
            doc.set_custom_validity(field, "");
            doc.remove_class(field, "is-invalid");
            true
        }
    }
}
