// Licensed under the Apache-2.0 license

//! CMSIS-SVD reader.
//!
//! Turns an SVD document into the raw peripheral/register/field records
//! consumed by `registers-generator`. Only the parts of the schema the
//! generator needs are read; everything else in the document is skipped.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let device = registers_svd::parse_file(Path::new("rp2040.svd")).unwrap();
//! for peripheral in &device.peripherals {
//!     println!("{} @ 0x{:08x}", peripheral.name, peripheral.base_address);
//! }
//! ```
//!
//! Inherited properties (`access`, `resetValue`), `derivedFrom`
//! peripherals and `dim` register arrays are resolved here, so every raw
//! record is self-contained.

mod raw;
mod resolve;
mod xml;

pub use raw::{
    RawDevice, RawEnumValue, RawEnumeratedValues, RawField, RawPeripheral, RawRegister,
};
pub use resolve::parse_int;

use anyhow::Context;
use std::path::Path;

/// Parses an SVD document held in memory.
pub fn parse_str(svd: &str) -> Result<RawDevice, anyhow::Error> {
    let device: xml::DeviceXml =
        serde_xml_rs::from_str(svd).map_err(|err| anyhow::anyhow!("invalid SVD: {}", err))?;
    resolve::resolve_device(device)
}

/// Reads and parses the SVD file at `path`.
pub fn parse_file(path: &Path) -> Result<RawDevice, anyhow::Error> {
    let svd = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_str(&svd).with_context(|| format!("failed to parse {}", path.display()))
}
