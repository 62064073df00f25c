// Licensed under the Apache-2.0 license

//! Settings for `svd-gen`, read from an optional TOML file.
//!
//! ```toml
//! svd = "hw/rp2040.svd"
//! output = "registers/generated-rp2040/src"
//! peripherals = ["uart0", "sio"]
//! namespace = "rp2040"
//! minify = false
//! ```

use anyhow::{Context, Result};
use registers_generator::{FilterConfig, RenderOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub svd: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub peripherals: Vec<String>,
    pub namespace: Option<String>,
    pub minify: bool,
}

impl GenerateConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// The file's settings, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_toml_file)
    }

    /// Settings given in `args` take precedence over `self`.
    pub fn overridden_by(self, args: GenerateConfig) -> GenerateConfig {
        GenerateConfig {
            svd: args.svd.or(self.svd),
            output: args.output.or(self.output),
            peripherals: if args.peripherals.is_empty() {
                self.peripherals
            } else {
                args.peripherals
            },
            namespace: args.namespace.or(self.namespace),
            minify: args.minify || self.minify,
        }
    }

    pub fn filter(&self) -> FilterConfig {
        self.peripherals.iter().collect()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            namespace: self.namespace.clone(),
            minify: self.minify,
        }
    }
}
