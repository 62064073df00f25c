// Licensed under the Apache-2.0 license

//! Normalized register model.
//!
//! This is what the derivation pipeline produces and what the renderer
//! consumes. The model is built once per run and only read afterwards.
//!
//! ## Ownership
//!
//! ```text
//! Peripheral
//! └── registers: Vec<Register>        # declaration order
//!     └── fields: Vec<Field>          # declaration order
//!         └── enum_values: Vec<EnumValue>
//! ```
//!
//! Every collection is owned by exactly one parent and is built fresh for
//! each entity.

use std::fmt;

use crate::access::AccessType;
use crate::error::DeriveError;
use crate::value::parse_literal;

//=============================================================================
// EnumValue
//=============================================================================

/// A named value a field may hold.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumValue {
    /// Identifier-safe name (starts with a letter or `_`).
    pub name: String,
    pub description: String,
    pub value: u64,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, description: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
        }
    }

    /// Builds an enum value from a textual literal such as `0x3` or `#1x`.
    pub fn from_literal(
        name: impl Into<String>,
        description: impl Into<String>,
        literal: &str,
    ) -> Result<Self, DeriveError> {
        Ok(Self::new(name, description, parse_literal(literal)?))
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

//=============================================================================
// Field
//=============================================================================

/// A bit range within a register.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: String,
    /// Position of the least significant bit.
    pub start_bit: u32,
    /// Width in bits, at least 1.
    pub length_in_bits: u32,
    /// Reset value shifted down to bit 0; always fits in `length_in_bits`.
    pub value_on_reset: u64,
    pub access_type: AccessType,
    pub enum_values: Vec<EnumValue>,
}

impl Field {
    /// Position of the most significant bit.
    pub fn end_bit(&self) -> u32 {
        self.start_bit + self.length_in_bits.max(1) - 1
    }

    /// Mask of the field's bits in register position.
    pub fn mask(&self) -> u64 {
        field_mask(self.start_bit, self.length_in_bits)
    }
}

/// Mask of `width` bits starting at `offset`; bits beyond 64 are dropped.
pub fn field_mask(offset: u32, width: u32) -> u64 {
    let bits = if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    bits.checked_shl(offset).unwrap_or(0)
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}:{}] = 0b{:0width$b} ({})",
            self.name,
            self.end_bit(),
            self.start_bit,
            self.value_on_reset,
            self.access_type,
            width = self.length_in_bits as usize,
        )?;
        for enum_value in &self.enum_values {
            write!(f, "\n            {enum_value}")?;
        }
        Ok(())
    }
}

//=============================================================================
// Register
//=============================================================================

/// An addressable register of a peripheral.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Register {
    pub name: String,
    pub description: String,
    /// Base address of the owning peripheral.
    pub base_address: u64,
    /// Byte offset from `base_address`.
    pub address_offset: u64,
    pub value_on_reset: u64,
    /// Whether the atomic XOR/set/clear aliases exist for this register.
    pub supports_atomic_bit_operations: bool,
    /// Composed from the fields' access types.
    pub access_type: AccessType,
    pub fields: Vec<Field>,
}

impl Register {
    /// Effective address of the register.
    pub fn address(&self) -> u64 {
        self.base_address + self.address_offset
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ 0x{:08X} = 0x{:08X} ({})",
            self.name,
            self.address(),
            self.value_on_reset,
            self.access_type,
        )?;
        if self.supports_atomic_bit_operations {
            write!(f, " ATOMIC")?;
        }
        for field in &self.fields {
            write!(f, "\n        {field}")?;
        }
        Ok(())
    }
}

//=============================================================================
// Peripheral
//=============================================================================

/// A memory-mapped peripheral block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Peripheral {
    pub name: String,
    pub description: String,
    pub base_address: u64,
    pub registers: Vec<Register>,
}

impl fmt::Display for Peripheral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ 0x{:08X}", self.name, self.base_address)?;
        for register in &self.registers {
            write!(f, "\n    {register}")?;
        }
        Ok(())
    }
}
