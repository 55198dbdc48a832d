//! Standalone delete-confirmation view.
//!
//! Legacy path kept distinct from the list view's inline dialog: the route is
//! addressed directly as `delete?id=<id>`.

use crate::actions::{Action, Effect};
use crate::dom::Document;
use crate::nav::{Fragment, NavScope};
use crate::notifications::{Notification, NotificationLevel};
use crate::views::ViewCtx;

#[derive(Debug)]
pub struct DeleteController {
    target: Option<String>,
    scope: NavScope,
}

impl DeleteController {
    pub fn bind(doc: &mut Document, fragment: &Fragment, scope: NavScope) -> Self {
        let target = fragment.id_param().map(str::to_string);
        if target.is_some() {
            if let Some(confirm) = doc.element_by_id("confirm-delete") {
                doc.set_on_click(confirm, Action::ConfirmDelete);
            }
        }
        Self { target, scope }
    }

    /// Without a target there is nothing to confirm; bail back to the list.
    pub fn init(&mut self, notices: &mut Vec<Notification>) -> Effect {
        if self.target.is_none() {
            notices.push(Notification::new(
                NotificationLevel::Warning,
                "No employee ID provided.",
            ));
            return Effect::Navigate("list".to_string());
        }
        Effect::None
    }

    /// On failure the view stays in place so the user can retry.
    pub async fn confirm(&mut self, ctx: &mut ViewCtx<'_>) -> Effect {
        let Some(id) = self.target.clone() else {
            return Effect::None;
        };
        match ctx.api.delete(&id).await {
            Ok(()) => {
                if self.scope.is_cancelled() {
                    return Effect::None;
                }
                ctx.notices.push(Notification::new(
                    NotificationLevel::Success,
                    "Employee deleted successfully.",
                ));
                Effect::Navigate("list".to_string())
            }
            Err(err) => {
                tracing::error!(error = %err, person_id = %id, "failed to delete employee");
                if !self.scope.is_cancelled() {
                    ctx.notices.push(Notification::new(
                        NotificationLevel::Error,
                        format!("Failed to delete employee: {err}"),
                    ));
                }
                Effect::None
            }
        }
    }
}
