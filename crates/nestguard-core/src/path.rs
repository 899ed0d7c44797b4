//! Document paths and their display forms
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step from a parent value to a child value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Ordered key sequence from the document root to a value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty (root) path
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a child path with an object key appended
    pub fn child<K: Into<String>>(&self, key: K) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Create a child path for an array index
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(|s| PathSegment::Key(s.into())).collect(),
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&DotPathRenderer.render_path(self))
    }
}

/// Turns an attribute name and a path into the location text embedded in
/// error messages
pub trait PathRenderer: Send + Sync {
    fn render(&self, attribute: &str, path: &JsonPath) -> String;
}

/// Renders `settings.theme.colors[2]`
#[derive(Debug, Clone, Copy, Default)]
pub struct DotPathRenderer;

impl DotPathRenderer {
    fn render_path(&self, path: &JsonPath) -> String {
        let mut rendered = String::new();
        for segment in path.segments() {
            match segment {
                PathSegment::Key(key) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(key);
                }
                PathSegment::Index(index) => {
                    rendered.push_str(&format!("[{}]", index));
                }
            }
        }
        rendered
    }
}

impl PathRenderer for DotPathRenderer {
    fn render(&self, attribute: &str, path: &JsonPath) -> String {
        let rendered = self.render_path(path);
        match (attribute.is_empty(), rendered.is_empty()) {
            (true, _) => rendered,
            (false, true) => attribute.to_string(),
            (false, false) if rendered.starts_with('[') => format!("{}{}", attribute, rendered),
            (false, false) => format!("{}.{}", attribute, rendered),
        }
    }
}

/// Renders `settings/theme/colors/2`, escaping `~` and `/` the way JSON
/// Pointer does
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerPathRenderer;

impl PathRenderer for PointerPathRenderer {
    fn render(&self, attribute: &str, path: &JsonPath) -> String {
        let mut rendered = attribute.to_string();
        for segment in path.segments() {
            rendered.push('/');
            match segment {
                PathSegment::Key(key) => rendered.push_str(&key.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(index) => rendered.push_str(&index.to_string()),
            }
        }
        rendered
    }
}
