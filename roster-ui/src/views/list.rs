//! Employee list view: fetch-and-render plus the delete-confirmation flow.

use crate::actions::{Action, Effect};
use crate::dom::{Document, Node, NodeId};
use crate::error::UiError;
use crate::nav::NavScope;
use crate::notifications::{Notification, NotificationLevel};
use crate::views::ViewCtx;
use roster_core::Employee;

/// Controller for the list route.
///
/// The delete dialog is part of the list template; when the dialog, its
/// confirm button, and modal capability are all present at bind time, the
/// confirm binding is wired once for the controller's lifetime.
#[derive(Debug)]
pub struct ListController {
    list: NodeId,
    modal: Option<ModalWiring>,
    pending: Option<PendingDelete>,
    scope: NavScope,
}

#[derive(Debug)]
struct ModalWiring {
    dialog: NodeId,
    name_slot: Option<NodeId>,
    id_slot: Option<NodeId>,
}

#[derive(Debug)]
struct PendingDelete {
    person_id: String,
    row: NodeId,
}

impl ListController {
    pub fn bind(
        doc: &mut Document,
        list_element_id: &'static str,
        scope: NavScope,
        modal_capability: bool,
    ) -> Result<Self, UiError> {
        let list = doc.element_by_id(list_element_id).ok_or(UiError::MissingSlot {
            view: "list",
            slot: list_element_id,
        })?;

        let modal = if modal_capability {
            doc.element_by_id("deleteModal").and_then(|dialog| {
                let confirm = doc.descendant_by_id(dialog, "confirm-delete")?;
                doc.set_on_click(confirm, Action::ConfirmModalDelete);
                Some(ModalWiring {
                    dialog,
                    name_slot: doc.descendant_by_id(dialog, "delete-emp-name"),
                    id_slot: doc.descendant_by_id(dialog, "delete-emp-id"),
                })
            })
        } else {
            None
        };

        Ok(Self {
            list,
            modal,
            pending: None,
            scope,
        })
    }

    /// Fetch all records and replace the rendered table body. On failure the
    /// body becomes a single error row carrying the failure detail, with
    /// nothing else wired.
    pub async fn load_employees(&mut self, ctx: &mut ViewCtx<'_>) {
        match ctx.api.list().await {
            Ok(employees) => {
                if self.scope.is_cancelled() {
                    return;
                }
                self.render(ctx.doc, &employees);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load employees");
                if self.scope.is_cancelled() {
                    return;
                }
                self.render_error(ctx.doc, &format!("Error loading employees: {err}"));
            }
        }
    }

    pub async fn handle_action(&mut self, action: Action, ctx: &mut ViewCtx<'_>) -> Effect {
        match action {
            Action::EditEmployee(person_id) => Effect::Navigate(format!("form?id={person_id}")),
            Action::RequestDelete {
                person_id,
                full_name,
                row,
            } => {
                self.open_delete_dialog(ctx.doc, person_id, full_name, row);
                Effect::None
            }
            Action::ConfirmModalDelete => self.confirm_delete(ctx).await,
            _ => Effect::None,
        }
    }

    fn render(&self, doc: &mut Document, employees: &[Employee]) {
        doc.clear_children(self.list);
        for employee in employees {
            let row = doc.create(Node::new("tr"));

            for text in [
                employee.person_id.as_str(),
                employee.first_name.as_str(),
                employee.last_name.as_str(),
            ] {
                let cell = doc.create(Node::new("td").with_text(text));
                doc.append(row, cell);
            }

            let status_cell = doc.create(Node::new("td"));
            let active = employee.status.is_active();
            let badge = doc.create(
                Node::new("span")
                    .with_class("badge")
                    .with_class("rounded-pill")
                    .with_class(if active { "bg-success" } else { "bg-danger" })
                    .with_text(if active { "ACTIVE" } else { "INACTIVE" }),
            );
            doc.append(status_cell, badge);
            doc.append(row, status_cell);

            let actions = doc.create(Node::new("td").with_class("text-end"));
            let edit = doc.create(Node::new("button").with_class("btn-edit").with_text("Edit"));
            doc.set_on_click(edit, Action::EditEmployee(employee.person_id.clone()));
            let delete = doc.create(
                Node::new("button")
                    .with_class("btn-delete")
                    .with_text("Delete"),
            );
            doc.set_on_click(
                delete,
                Action::RequestDelete {
                    person_id: employee.person_id.clone(),
                    full_name: employee.full_name(),
                    row,
                },
            );
            doc.append(actions, edit);
            doc.append(actions, delete);
            doc.append(row, actions);

            doc.append(self.list, row);
        }
    }

    fn render_error(&self, doc: &mut Document, message: &str) {
        doc.clear_children(self.list);
        let row = doc.create(Node::new("tr"));
        let cell = doc.create(Node::new("td").with_class("text-danger").with_text(message));
        doc.append(row, cell);
        doc.append(self.list, row);
    }

    fn open_delete_dialog(
        &mut self,
        doc: &mut Document,
        person_id: String,
        full_name: String,
        row: NodeId,
    ) {
        self.pending = Some(PendingDelete {
            person_id: person_id.clone(),
            row,
        });
        if let Some(modal) = &self.modal {
            if let Some(slot) = modal.name_slot {
                let label = if full_name.is_empty() {
                    person_id.clone()
                } else {
                    full_name
                };
                doc.set_text(slot, label);
            }
            if let Some(slot) = modal.id_slot {
                doc.set_text(slot, person_id);
            }
            doc.add_class(modal.dialog, "show");
        }
    }

    /// The remembered target is cleared on every outcome so a stale confirm
    /// cannot re-fire.
    async fn confirm_delete(&mut self, ctx: &mut ViewCtx<'_>) -> Effect {
        let Some(pending) = self.pending.take() else {
            return Effect::None;
        };
        match ctx.api.delete(&pending.person_id).await {
            Ok(()) => {
                if !self.scope.is_cancelled() {
                    ctx.doc.remove(pending.row);
                    self.hide_dialog(ctx.doc);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, person_id = %pending.person_id, "failed to delete employee");
                if !self.scope.is_cancelled() {
                    ctx.notices.push(Notification::new(
                        NotificationLevel::Error,
                        format!("Failed to delete employee: {err}"),
                    ));
                }
            }
        }
        Effect::None
    }

    fn hide_dialog(&self, doc: &mut Document) {
        if let Some(modal) = &self.modal {
            doc.remove_class(modal.dialog, "show");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template;
    use chrono::Utc;
    use roster_core::Status;

    const LIST_TEMPLATE: &str = include_str!("../../templates/employee-list.toml");

    fn list_doc() -> Document {
        let template = template::parse(LIST_TEMPLATE).unwrap();
        let mut doc = Document::new();
        let subtree = template.instantiate(&mut doc);
        let root = doc.root();
        doc.replace_children(root, vec![subtree]);
        doc
    }

    fn sample_employee(person_id: &str, first: &str, last: &str, status: Status) -> Employee {
        Employee {
            person_id: person_id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            last_updated_by: "admin".to_string(),
            last_updated_date: Utc::now(),
            ssn: "123456789".to_string(),
            employee_no: "EMP-123454321".to_string(),
            employment_end_date: None,
            employment_start_date: Utc::now(),
            status,
        }
    }

    #[test]
    fn bind_fails_fast_without_list_mount() {
        let mut doc = Document::new();
        let err = ListController::bind(&mut doc, "employee-list", NavScope::new(), true).unwrap_err();
        assert!(matches!(
            err,
            UiError::MissingSlot {
                view: "list",
                slot: "employee-list"
            }
        ));
    }

    #[test]
    fn bind_wires_confirm_button_when_modal_available() {
        let mut doc = list_doc();
        let controller = ListController::bind(&mut doc, "employee-list", NavScope::new(), true).unwrap();
        assert!(controller.modal.is_some());
        let confirm = doc.element_by_id("confirm-delete").unwrap();
        assert_eq!(doc.click_action(confirm), Some(&Action::ConfirmModalDelete));
    }

    #[test]
    fn bind_skips_modal_without_capability() {
        let mut doc = list_doc();
        let controller = ListController::bind(&mut doc, "employee-list", NavScope::new(), false).unwrap();
        assert!(controller.modal.is_none());
        let confirm = doc.element_by_id("confirm-delete").unwrap();
        assert!(doc.click_action(confirm).is_none());
    }

    #[test]
    fn render_produces_one_row_per_record_in_order() {
        let mut doc = list_doc();
        let controller = ListController::bind(&mut doc, "employee-list", NavScope::new(), true).unwrap();
        let employees = vec![
            sample_employee("E1", "Ada", "Lovelace", Status::Number(1)),
            sample_employee("E2", "Bob", "Babbage", Status::Text("inactive".to_string())),
        ];
        controller.render(&mut doc, &employees);

        let rows = doc.children(controller.list).to_vec();
        assert_eq!(rows.len(), 2);
        assert_eq!(doc.text(doc.children(rows[0])[0]), "E1");
        assert_eq!(doc.text(doc.children(rows[1])[0]), "E2");

        let badge = doc.children(doc.children(rows[0])[3])[0];
        assert!(doc.has_class(badge, "bg-success"));
        assert_eq!(doc.text(badge), "ACTIVE");
        let badge = doc.children(doc.children(rows[1])[3])[0];
        assert!(doc.has_class(badge, "bg-danger"));
        assert_eq!(doc.text(badge), "INACTIVE");
    }

    #[test]
    fn render_error_emits_single_unwired_row() {
        let mut doc = list_doc();
        let controller = ListController::bind(&mut doc, "employee-list", NavScope::new(), true).unwrap();
        controller.render_error(&mut doc, "Error loading employees: network down");

        let rows = doc.children(controller.list).to_vec();
        assert_eq!(rows.len(), 1);
        let cell = doc.children(rows[0])[0];
        assert!(doc.text(cell).contains("network down"));
        assert!(doc.click_action(cell).is_none());
    }

    #[test]
    fn open_dialog_remembers_target_and_fills_placeholders() {
        let mut doc = list_doc();
        let mut controller = ListController::bind(&mut doc, "employee-list", NavScope::new(), true).unwrap();
        let row = doc.create(Node::new("tr"));
        doc.append(controller.list, row);

        controller.open_delete_dialog(&mut doc, "E2".to_string(), "Bob Babbage".to_string(), row);

        let pending = controller.pending.as_ref().unwrap();
        assert_eq!(pending.person_id, "E2");
        assert_eq!(pending.row, row);

        let dialog = doc.element_by_id("deleteModal").unwrap();
        assert!(doc.has_class(dialog, "show"));
        let name_slot = doc.element_by_id("delete-emp-name").unwrap();
        assert_eq!(doc.text(name_slot), "Bob Babbage");
        let id_slot = doc.element_by_id("delete-emp-id").unwrap();
        assert_eq!(doc.text(id_slot), "E2");
    }

    #[test]
    fn open_dialog_falls_back_to_id_when_name_blank() {
        let mut doc = list_doc();
        let mut controller = ListController::bind(&mut doc, "employee-list", NavScope::new(), true).unwrap();
        let row = doc.create(Node::new("tr"));
        doc.append(controller.list, row);

        controller.open_delete_dialog(&mut doc, "E2".to_string(), String::new(), row);

        let name_slot = doc.element_by_id("delete-emp-name").unwrap();
        assert_eq!(doc.text(name_slot), "E2");
    }

    #[test]
    fn open_dialog_without_modal_still_remembers_target() {
        let mut doc = list_doc();
        let mut controller = ListController::bind(&mut doc, "employee-list", NavScope::new(), false).unwrap();
        let row = doc.create(Node::new("tr"));
        doc.append(controller.list, row);

        controller.open_delete_dialog(&mut doc, "E2".to_string(), "Bob".to_string(), row);

        assert!(controller.pending.is_some());
        let dialog = doc.element_by_id("deleteModal").unwrap();
        assert!(!doc.has_class(dialog, "show"));
    }
}
