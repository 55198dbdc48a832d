//! View templates and their sources.
//!
//! Templates are declarative TOML documents describing an element tree. The
//! router fetches one per navigation through a [`TemplateSource`] and
//! instantiates it under the mount point. Fetch failures are deliberately not
//! handled during routing; they propagate to the caller and leave the mount
//! untouched.

use crate::dom::{Document, Node, NodeId};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Reference to a template resource, relative to its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef(String);

impl TemplateRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {path}")]
    NotFound { path: String },
    #[error("failed to read template: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse template TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One element of a template tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateNode {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    /// Build this tree in `doc`. The returned subtree is detached; attaching
    /// it to the mount is the router's single synchronous replace step.
    pub fn instantiate(&self, doc: &mut Document) -> NodeId {
        let mut node = Node::new(self.tag.clone());
        node.id = self.id.clone();
        node.name = self.name.clone();
        node.classes = self.classes.clone();
        node.text = self.text.clone().unwrap_or_default();
        node.value = self.value.clone().unwrap_or_default();
        node.required = self.required;
        node.max_length = self.max_length;
        let id = doc.create(node);
        for child in &self.children {
            let child_id = child.instantiate(doc);
            doc.append(id, child_id);
        }
        id
    }
}

/// Parse template TOML into a tree.
pub fn parse(source: &str) -> Result<TemplateNode, TemplateError> {
    Ok(toml::from_str(source)?)
}

/// Asynchronous template retrieval, one call per navigation.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self, template: &TemplateRef) -> Result<TemplateNode, TemplateError>;
}

/// Filesystem-backed source: resolves references against a root directory.
#[derive(Debug, Clone)]
pub struct DirTemplateSource {
    root: PathBuf,
}

impl DirTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TemplateSource for DirTemplateSource {
    async fn fetch(&self, template: &TemplateRef) -> Result<TemplateNode, TemplateError> {
        let path = self.root.join(template.path());
        let contents = tokio::fs::read_to_string(&path).await?;
        parse(&contents)
    }
}

/// In-memory source for tests and embedded shells.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateSource {
    templates: HashMap<String, TemplateNode>,
}

impl StaticTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, template: TemplateNode) {
        self.templates.insert(path.into(), template);
    }

    /// Parse and register a TOML template under `path`.
    pub fn insert_toml(&mut self, path: impl Into<String>, source: &str) -> Result<(), TemplateError> {
        self.insert(path, parse(source)?);
        Ok(())
    }
}

#[async_trait]
impl TemplateSource for StaticTemplateSource {
    async fn fetch(&self, template: &TemplateRef) -> Result<TemplateNode, TemplateError> {
        self.templates
            .get(template.path())
            .cloned()
            .ok_or_else(|| TemplateError::NotFound {
                path: template.path().to_string(),
            })
    }
}
