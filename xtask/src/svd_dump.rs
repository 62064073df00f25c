// Licensed under the Apache-2.0 license

//! Print the normalized register model of an SVD file.

use anyhow::Result;
use registers_generator::{derive_peripherals, FilterConfig};
use registers_svd::RawDevice;
use std::path::Path;

pub fn dump(svd: &Path, peripherals: &[String]) -> Result<()> {
    let device = registers_svd::parse_file(svd)?;
    let filter: FilterConfig = peripherals.iter().collect();
    print!("{}", render(&device, &filter)?);
    Ok(())
}

fn render(device: &RawDevice, filter: &FilterConfig) -> Result<String> {
    let mut output = String::new();
    for peripheral in derive_peripherals(device, filter)? {
        output.push_str(&peripheral.to_string());
        output.push('\n');
    }
    Ok(output)
}
