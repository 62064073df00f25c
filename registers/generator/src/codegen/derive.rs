// Licensed under the Apache-2.0 license

//! Derivation of the normalized model from raw SVD records.
//!
//! Every function here builds fresh entities from its input and touches no
//! shared state, so deriving the same record twice yields equal results.

use anyhow::Context;
use log::{debug, warn};
use registers_svd::{RawDevice, RawField, RawPeripheral, RawRegister};

use crate::access::AccessType;
use crate::config::FilterConfig;
use crate::types::{field_mask, EnumValue, Field, Peripheral, Register};
use crate::util::valid_name;

/// Name of the single-cycle I/O peripheral. Its registers have no atomic
/// XOR/set/clear aliases.
pub const SINGLE_CYCLE_IO_PERIPHERAL: &str = "SIO";

/// `modifiedWriteValues` marker for fields cleared by writing 1.
const ONE_TO_CLEAR: &str = "oneToClear";

/// Derives one field from its raw record and the full reset value of the
/// owning register.
pub fn derive_field(register_reset: u64, raw: &RawField) -> anyhow::Result<Field> {
    let value_on_reset = (register_reset & field_mask(raw.bit_offset, raw.bit_width))
        .checked_shr(raw.bit_offset)
        .unwrap_or(0);

    let access_type = if raw.modified_write_values.as_deref() == Some(ONE_TO_CLEAR) {
        AccessType::WriteClear
    } else {
        raw.access.parse::<AccessType>()?
    };

    let mut enum_values = Vec::new();
    for group in &raw.enumerated_values {
        for value in &group.values {
            let enum_value = EnumValue::from_literal(
                valid_name(&value.name),
                value.description.clone().unwrap_or_default(),
                &value.value,
            )
            .with_context(|| format!("enumerated value `{}`", value.name))?;
            enum_values.push(enum_value);
        }
    }

    if enum_values.is_empty() {
        enum_values = default_enum_values(access_type, raw.bit_width);
        if !enum_values.is_empty() {
            debug!(
                "{}: synthesized {} enumerated value(s)",
                raw.name,
                enum_values.len()
            );
        }
    }

    Ok(Field {
        name: raw.name.clone(),
        description: raw.description.clone().unwrap_or_default(),
        start_bit: raw.bit_offset,
        length_in_bits: raw.bit_width,
        value_on_reset,
        access_type,
        enum_values,
    })
}

/// Enumerated values for a field that declares none.
fn default_enum_values(access_type: AccessType, length_in_bits: u32) -> Vec<EnumValue> {
    match access_type {
        AccessType::SelfClearing | AccessType::WriteClear => vec![EnumValue::new("ONE", "", 1)],
        // Read-only single bits get ZERO/ONE as well.
        _ if length_in_bits == 1 => vec![
            EnumValue::new("ZERO", "", 0),
            EnumValue::new("ONE", "", 1),
        ],
        _ => vec![],
    }
}

/// Derives a register and its fields.
pub fn derive_register(
    peripheral_name: &str,
    base_address: u64,
    raw: &RawRegister,
) -> anyhow::Result<Register> {
    let fields = raw
        .fields
        .iter()
        .map(|field| {
            derive_field(raw.reset_value, field).with_context(|| format!("field `{}`", field.name))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let access_type = AccessType::from_field_access_types(fields.iter().map(|f| f.access_type))?;

    Ok(Register {
        name: raw.name.clone(),
        description: raw.description.clone().unwrap_or_default(),
        base_address,
        address_offset: raw.address_offset,
        value_on_reset: raw.reset_value,
        supports_atomic_bit_operations: peripheral_name != SINGLE_CYCLE_IO_PERIPHERAL,
        access_type,
        fields,
    })
}

/// Derives a peripheral and all of its registers.
pub fn derive_peripheral(raw: &RawPeripheral) -> anyhow::Result<Peripheral> {
    let registers = raw
        .registers
        .iter()
        .map(|register| {
            derive_register(&raw.name, raw.base_address, register)
                .with_context(|| format!("register `{}`", register.name))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Peripheral {
        name: raw.name.clone(),
        description: raw.description.clone().unwrap_or_default(),
        base_address: raw.base_address,
        registers,
    })
}

/// Derives the peripherals of `device` that pass `filter`, in declaration
/// order. The first failure aborts the whole derivation.
pub fn derive_peripherals(
    device: &RawDevice,
    filter: &FilterConfig,
) -> anyhow::Result<Vec<Peripheral>> {
    selected_peripherals(device, filter)
        .map(|raw| {
            debug!("deriving peripheral {}", raw.name);
            derive_peripheral(raw).with_context(|| format!("peripheral `{}`", raw.name))
        })
        .collect()
}

/// Raw peripherals of `device` that pass `filter`, in declaration order.
pub(crate) fn selected_peripherals<'a>(
    device: &'a RawDevice,
    filter: &'a FilterConfig,
) -> impl Iterator<Item = &'a RawPeripheral> {
    for name in &filter.include_peripherals {
        if !device
            .peripherals
            .iter()
            .any(|p| p.name.to_lowercase() == *name)
        {
            warn!("{}: no peripheral named `{}`", device.name, name);
        }
    }

    device
        .peripherals
        .iter()
        .filter(|p| filter.should_include(&p.name))
}
