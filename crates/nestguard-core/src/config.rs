//! Validator configuration
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use crate::path::{DotPathRenderer, PathRenderer, PointerPathRenderer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default recursion limit for nested mappings
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Built-in path display styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `settings.theme.colors[2]`
    #[default]
    Dot,
    /// `settings/theme/colors/2`
    Pointer,
}

impl PathStyle {
    pub fn renderer(self) -> Arc<dyn PathRenderer> {
        match self {
            PathStyle::Dot => Arc::new(DotPathRenderer),
            PathStyle::Pointer => Arc::new(PointerPathRenderer),
        }
    }
}

/// Settings shared by every level of one validation run
#[derive(Clone)]
pub struct ValidatorConfig {
    /// Number of nested mappings the validator descends into
    pub max_depth: usize,
    /// Formats locations in error messages
    pub renderer: Arc<dyn PathRenderer>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            renderer: Arc::new(DotPathRenderer),
        }
    }
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recursion limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Use a custom path renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn PathRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Use one of the built-in path renderers
    pub fn with_path_style(self, style: PathStyle) -> Self {
        self.with_renderer(style.renderer())
    }
}
