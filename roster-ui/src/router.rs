//! Route table and the fixed route-to-controller mapping.

use crate::template::TemplateRef;
use std::collections::HashMap;

/// Fragment route names mapped to template references. Populated once at
/// startup; duplicate registration overwrites silently.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, TemplateRef>,
    default_route: String,
}

impl RouteTable {
    pub fn new(default_route: impl Into<String>) -> Self {
        Self {
            routes: HashMap::new(),
            default_route: default_route.into(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, template: TemplateRef) {
        self.routes.insert(name.into(), template);
    }

    pub fn resolve(&self, route: &str) -> Option<&TemplateRef> {
        self.routes.get(route)
    }

    pub fn default_route(&self) -> &str {
        &self.default_route
    }
}

/// Which controller a route constructs. Fixed: controllers are not
/// dynamically registered, unlike templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    List,
    Form,
    Delete,
}

pub fn controller_for(route: &str) -> Option<ControllerKind> {
    match route {
        "list" => Some(ControllerKind::List),
        "form" => Some(ControllerKind::Form),
        "delete" => Some(ControllerKind::Delete),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_overwrites_silently() {
        let mut table = RouteTable::new("list");
        table.register("list", TemplateRef::new("a.toml"));
        table.register("list", TemplateRef::new("b.toml"));
        assert_eq!(table.resolve("list"), Some(&TemplateRef::new("b.toml")));
    }

    #[test]
    fn unknown_route_resolves_to_none() {
        let table = RouteTable::new("list");
        assert_eq!(table.resolve("unknown"), None);
    }

    #[test]
    fn controller_mapping_is_fixed() {
        assert_eq!(controller_for("list"), Some(ControllerKind::List));
        assert_eq!(controller_for("form"), Some(ControllerKind::Form));
        assert_eq!(controller_for("delete"), Some(ControllerKind::Delete));
        assert_eq!(controller_for("stats"), None);
    }
}
