//! Per-view controllers.
//!
//! One controller owns the state and event wiring of the active view for its
//! lifetime; navigation discards it (after cancelling its scope) and
//! constructs the next one.

pub mod confirm;
pub mod form;
pub mod list;

pub use confirm::DeleteController;
pub use form::FormController;
pub use list::ListController;

use crate::api_client::EmployeeClient;
use crate::dom::Document;
use crate::notifications::Notification;

/// The mutable surfaces a controller handler may touch.
pub struct ViewCtx<'a> {
    pub doc: &'a mut Document,
    pub api: &'a EmployeeClient,
    pub notices: &'a mut Vec<Notification>,
}

/// The active controller, if the current route has one.
#[derive(Debug)]
pub enum Controller {
    List(ListController),
    Form(FormController),
    Delete(DeleteController),
}
