//! Configuration for filter parsing and compilation.

use std::sync::Arc;

/// Default maximum nesting depth of a filter tree.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default maximum number of literals in one `in` list.
pub const DEFAULT_MAX_LIST_VALUES: usize = 1000;

/// Limits applied while parsing and compiling filter trees.
///
/// The configuration is immutable once built and shares its state through an
/// `Arc`, so a single instance can back any number of concurrent compilers.
///
/// # Examples
///
/// ```rust
/// use stac_asf::config::CompilerConfig;
///
/// let config = CompilerConfig::builder()
///     .max_depth(8)
///     .max_list_values(50)
///     .build();
/// assert_eq!(config.max_depth(), 8);
/// assert_eq!(config.max_list_values(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    inner: Arc<CompilerConfigInner>,
}

#[derive(Debug)]
struct CompilerConfigInner {
    max_depth: usize,
    max_list_values: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerConfig {
    /// Creates a configuration with default limits.
    pub fn new() -> Self {
        CompilerConfigBuilder::default().build()
    }

    /// Starts a builder initialized with default limits.
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }

    /// Maximum nesting depth; the root node is at depth 1.
    pub fn max_depth(&self) -> usize {
        self.inner.max_depth
    }

    /// Maximum number of literals accepted in one `in` list.
    pub fn max_list_values(&self) -> usize {
        self.inner.max_list_values
    }
}

/// Builder for [`CompilerConfig`].
#[derive(Debug, Clone)]
pub struct CompilerConfigBuilder {
    max_depth: usize,
    max_list_values: usize,
}

impl Default for CompilerConfigBuilder {
    fn default() -> Self {
        CompilerConfigBuilder {
            max_depth: DEFAULT_MAX_DEPTH,
            max_list_values: DEFAULT_MAX_LIST_VALUES,
        }
    }
}

impl CompilerConfigBuilder {
    /// Sets the maximum nesting depth. Values below 1 are raised to 1.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Sets the maximum `in` list length. Values below 1 are raised to 1.
    pub fn max_list_values(mut self, max_list_values: usize) -> Self {
        self.max_list_values = max_list_values.max(1);
        self
    }

    pub fn build(self) -> CompilerConfig {
        CompilerConfig {
            inner: Arc::new(CompilerConfigInner {
                max_depth: self.max_depth,
                max_list_values: self.max_list_values,
            }),
        }
    }
}
