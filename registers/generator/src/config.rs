// Licensed under the Apache-2.0 license

//! Configuration for peripheral selection and rendering.
//!
//! [`FilterConfig`] controls which peripherals are derived and generated.
//! [`RenderOptions`] controls how the generated text looks; it never
//! affects the derived model.

use std::collections::BTreeSet;

/// Selects the peripherals to generate.
///
/// An empty filter includes every peripheral. Names are compared
/// lowercased.
///
/// # Example
///
/// ```
/// use registers_generator::config::FilterConfig;
///
/// let config = FilterConfig::new()
///     .include_peripheral("UART0")
///     .include_peripheral("sio");
/// assert!(config.should_include("uart0"));
/// assert!(config.should_include("SIO"));
/// assert!(!config.should_include("UART1"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterConfig {
    /// Lowercased names of the peripherals to include.
    pub include_peripherals: BTreeSet<String>,
}

impl FilterConfig {
    /// Create a new FilterConfig with no filtering (everything included).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict generation to this peripheral (and any other included ones).
    pub fn include_peripheral(mut self, name: &str) -> Self {
        self.include_peripherals.insert(name.to_lowercase());
        self
    }

    /// Returns true if this filter has no constraints (everything passes).
    pub fn is_empty(&self) -> bool {
        self.include_peripherals.is_empty()
    }

    /// Check whether the peripheral with the given name should be generated.
    pub fn should_include(&self, name: &str) -> bool {
        self.is_empty() || self.include_peripherals.contains(&name.to_lowercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for FilterConfig {
    fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
        names
            .into_iter()
            .fold(FilterConfig::new(), |config, name| {
                config.include_peripheral(name.as_ref())
            })
    }
}

/// Options for rendering the derived model into source text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderOptions {
    /// Wraps every generated file in `pub mod <namespace>`.
    pub namespace: Option<String>,
    /// Strips comments, blank lines and indentation from the output.
    pub minify: bool,
}
