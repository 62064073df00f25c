// Licensed under the Apache-2.0 license

//! Raw records as read from the SVD document.
//!
//! Numbers that describe the layout are already integers. Enumerated value
//! literals stay textual, since they may contain don't-care bits that the
//! generator interprets.

/// A whole device description.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawDevice {
    pub name: String,
    pub description: Option<String>,
    /// Peripherals in declaration order.
    pub peripherals: Vec<RawPeripheral>,
}

/// A memory-mapped peripheral block.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawPeripheral {
    pub name: String,
    pub description: Option<String>,
    pub base_address: u64,
    /// Registers in declaration order, `dim` arrays already expanded.
    pub registers: Vec<RawRegister>,
}

/// A register within a peripheral.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawRegister {
    pub name: String,
    pub description: Option<String>,
    /// Byte offset from the peripheral base address.
    pub address_offset: u64,
    /// Full-register reset value.
    pub reset_value: u64,
    pub fields: Vec<RawField>,
}

/// A bit field within a register.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawField {
    pub name: String,
    pub description: Option<String>,
    pub bit_offset: u32,
    pub bit_width: u32,
    /// SVD access marker (`read-only`, `write-only`, ...), inherited from
    /// the enclosing register when the field has none.
    pub access: String,
    /// SVD `modifiedWriteValues` marker, e.g. `oneToClear`.
    pub modified_write_values: Option<String>,
    /// Grouped enumerated value sets, in declaration order.
    pub enumerated_values: Vec<RawEnumeratedValues>,
}

/// One `<enumeratedValues>` group.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawEnumeratedValues {
    pub name: Option<String>,
    pub values: Vec<RawEnumValue>,
}

/// One `<enumeratedValue>`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawEnumValue {
    pub name: String,
    pub description: Option<String>,
    /// The literal exactly as written, e.g. `0x1`, `#1x0` or `3`.
    pub value: String,
}
