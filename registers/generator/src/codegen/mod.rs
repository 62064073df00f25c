// Licensed under the Apache-2.0 license

//! Main code generation logic for converting SVD descriptions to
//! tock-registers Rust code.
//!
//! The implementation is split across submodules:
//! - `derive`: Normalizing raw SVD records into the register model
//! - `crate::output`: Rendering the model into Rust code

mod derive;

use log::info;
use registers_svd::RawDevice;
use std::path::Path;

use crate::config::{FilterConfig, RenderOptions};
use crate::output::{minify, render_peripheral};
use crate::util::output_file_name;

pub use derive::{
    derive_field, derive_peripheral, derive_peripherals, derive_register,
    SINGLE_CYCLE_IO_PERIPHERAL,
};

/// Generated source for one peripheral.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    /// `<lowercased peripheral name>.rs`
    pub file_name: String,
    pub peripheral: String,
    pub code: String,
}

/// Generates one file per selected peripheral of an already parsed device.
pub fn generate_from_device(
    device: &RawDevice,
    filter: &FilterConfig,
    options: &RenderOptions,
) -> anyhow::Result<Vec<GeneratedFile>> {
    let peripherals = derive_peripherals(device, filter)?;

    Ok(peripherals
        .iter()
        .map(|peripheral| {
            info!(
                "Generating {} ({} registers)",
                peripheral.name,
                peripheral.registers.len()
            );
            let code = render_peripheral(peripheral, options.namespace.as_deref());
            GeneratedFile {
                file_name: output_file_name(&peripheral.name),
                peripheral: peripheral.name.clone(),
                code: if options.minify { minify(&code) } else { code },
            }
        })
        .collect())
}

/// Generates code from an SVD file.
pub fn generate_from_file(
    path: &Path,
    filter: &FilterConfig,
    options: &RenderOptions,
) -> anyhow::Result<Vec<GeneratedFile>> {
    let device = registers_svd::parse_file(path)?;
    generate_from_device(&device, filter, options)
}

/// Names of the files [`generate_from_device`] would produce, without
/// deriving anything.
pub fn output_file_names(device: &RawDevice, filter: &FilterConfig) -> Vec<String> {
    derive::selected_peripherals(device, filter)
        .map(|p| output_file_name(&p.name))
        .collect()
}

#[cfg(test)]
mod tests;
