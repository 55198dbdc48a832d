//! The application engine: navigation resolution and view lifecycle.
//!
//! Dispatch is sequential and cooperative: each event, including any async
//! I/O it performs, runs to completion before the next event is handled. A
//! navigation fully replaces the mount subtree and constructs a fresh
//! controller before any of that controller's async work begins; no two
//! controllers are ever live at once.

use crate::actions::{Action, Effect, UiEvent};
use crate::api_client::EmployeeClient;
use crate::config::AppConfig;
use crate::dom::{Document, NodeId};
use crate::error::UiError;
use crate::nav::{Fragment, NavScope, NavigationState};
use crate::notifications::Notification;
use crate::router::{controller_for, ControllerKind, RouteTable};
use crate::template::{TemplateRef, TemplateSource};
use crate::views::{Controller, DeleteController, FormController, ListController, ViewCtx};

pub const DEFAULT_ROUTE: &str = "list";

pub struct App {
    config: AppConfig,
    api: EmployeeClient,
    templates: Box<dyn TemplateSource>,
    routes: RouteTable,
    document: Document,
    nav: NavigationState,
    scope: NavScope,
    controller: Option<Controller>,
    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: AppConfig, api: EmployeeClient, templates: Box<dyn TemplateSource>) -> Self {
        Self {
            config,
            api,
            templates,
            routes: RouteTable::new(DEFAULT_ROUTE),
            document: Document::new(),
            nav: NavigationState::new(),
            scope: NavScope::new(),
            controller: None,
            notifications: Vec::new(),
        }
    }

    /// Add a route to the table. Duplicate registration overwrites silently.
    pub fn register(&mut self, name: impl Into<String>, template: TemplateRef) {
        self.routes.register(name, template);
    }

    /// Initial navigation: falls back to the default route when the current
    /// fragment is empty.
    pub async fn start(&mut self) -> Result<(), UiError> {
        let fragment = if self.nav.current().is_empty() {
            self.routes.default_route().to_string()
        } else {
            self.nav.current().to_string()
        };
        self.navigate(&fragment).await
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn current_fragment(&self) -> &Fragment {
        self.nav.current()
    }

    pub fn node_by_id(&self, id: &str) -> Option<NodeId> {
        self.document.element_by_id(id)
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.document.query_by_name(self.document.root(), name)
    }

    pub fn render(&self) -> String {
        self.document.render()
    }

    /// Handle one event to completion.
    ///
    /// Errors escape only from navigation (an unresolvable default route or a
    /// failed template fetch — the latter deliberately uncaught, leaving the
    /// mount stale).
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<(), UiError> {
        match event {
            UiEvent::Navigate(raw) => self.navigate(&raw).await?,
            UiEvent::Click(node) => self.click(node).await?,
            UiEvent::ClickId(id) => {
                if let Some(node) = self.document.element_by_id(&id) {
                    self.click(node).await?;
                }
            }
            UiEvent::Input { field, value } => {
                if self.document.is_attached(field) {
                    self.document.set_value(field, &value);
                    if let Some(Controller::Form(form)) = self.controller.as_mut() {
                        form.handle_input(field, &mut self.document);
                    }
                }
            }
            UiEvent::SetChecked { field, checked } => {
                if self.document.is_attached(field) {
                    self.document.set_checked(field, checked);
                }
            }
            UiEvent::Submit => {
                let effect = {
                    let App {
                        ref mut document,
                        ref api,
                        ref mut notifications,
                        ref mut controller,
                        ..
                    } = *self;
                    match controller {
                        Some(Controller::Form(form)) => {
                            let mut ctx = ViewCtx {
                                doc: document,
                                api,
                                notices: notifications,
                            };
                            form.handle_submit(&mut ctx).await
                        }
                        _ => Effect::None,
                    }
                };
                self.apply_effect(effect).await?;
            }
        }
        Ok(())
    }

    /// Clicks on detached nodes are inert: their wiring went away with the
    /// subtree that carried them.
    async fn click(&mut self, node: NodeId) -> Result<(), UiError> {
        if !self.document.is_attached(node) {
            return Ok(());
        }
        let Some(action) = self.document.click_action(node).cloned() else {
            return Ok(());
        };
        let effect = self.run_action(action).await;
        self.apply_effect(effect).await
    }

    async fn run_action(&mut self, action: Action) -> Effect {
        let App {
            ref mut document,
            ref api,
            ref mut notifications,
            ref mut controller,
            ..
        } = *self;
        let mut ctx = ViewCtx {
            doc: document,
            api,
            notices: notifications,
        };
        match controller {
            Some(Controller::List(list)) => list.handle_action(action, &mut ctx).await,
            Some(Controller::Form(form)) => match action {
                Action::SubmitForm => form.handle_submit(&mut ctx).await,
                _ => Effect::None,
            },
            Some(Controller::Delete(delete)) => match action {
                Action::ConfirmDelete => delete.confirm(&mut ctx).await,
                _ => Effect::None,
            },
            None => Effect::None,
        }
    }

    async fn apply_effect(&mut self, effect: Effect) -> Result<(), UiError> {
        if let Effect::Navigate(raw) = effect {
            self.navigate(&raw).await?;
        }
        Ok(())
    }

    /// Resolve a fragment and transition to its view.
    ///
    /// An unrecognized route self-heals by redirecting to the default route;
    /// the loop is safe because the default route is always registered (an
    /// unregistered default is a bootstrap bug and fails instead of
    /// spinning). A controller may chain one further navigation through its
    /// init effect (e.g. the delete view without a target id).
    pub async fn navigate(&mut self, raw: &str) -> Result<(), UiError> {
        let mut next = raw.to_string();
        loop {
            let fragment = Fragment::parse(&next);
            let Some(template_ref) = self.routes.resolve(&fragment.route).cloned() else {
                let default = self.routes.default_route().to_string();
                if fragment.route == default {
                    return Err(UiError::MissingRoute { route: default });
                }
                next = default;
                continue;
            };

            // Template fetch failures propagate; the mount and the current
            // controller stay as they were.
            let template = self.templates.fetch(&template_ref).await?;

            self.scope.cancel();
            self.controller = None;
            let subtree = template.instantiate(&mut self.document);
            let mount = self.document.root();
            self.document.replace_children(mount, vec![subtree]);
            self.nav.set(fragment.clone());
            self.scope = NavScope::new();

            match self.construct_controller(&fragment).await? {
                Effect::Navigate(chained) => next = chained,
                Effect::None => return Ok(()),
            }
        }
    }

    async fn construct_controller(&mut self, fragment: &Fragment) -> Result<Effect, UiError> {
        match controller_for(&fragment.route) {
            Some(ControllerKind::List) => {
                let mut list = ListController::bind(
                    &mut self.document,
                    "employee-list",
                    self.scope.clone(),
                    self.config.modal_capability,
                )?;
                {
                    let App {
                        ref mut document,
                        ref api,
                        ref mut notifications,
                        ..
                    } = *self;
                    let mut ctx = ViewCtx {
                        doc: document,
                        api,
                        notices: notifications,
                    };
                    list.load_employees(&mut ctx).await;
                }
                self.controller = Some(Controller::List(list));
                Ok(Effect::None)
            }
            Some(ControllerKind::Form) => {
                let mut form =
                    FormController::bind(&mut self.document, fragment, self.scope.clone())?;
                let effect = {
                    let App {
                        ref mut document,
                        ref api,
                        ref mut notifications,
                        ..
                    } = *self;
                    let mut ctx = ViewCtx {
                        doc: document,
                        api,
                        notices: notifications,
                    };
                    form.init(&mut ctx).await
                };
                self.controller = Some(Controller::Form(form));
                Ok(effect)
            }
            Some(ControllerKind::Delete) => {
                let mut delete =
                    DeleteController::bind(&mut self.document, fragment, self.scope.clone());
                let effect = delete.init(&mut self.notifications);
                self.controller = Some(Controller::Delete(delete));
                Ok(effect)
            }
            None => Ok(Effect::None),
        }
    }
}
