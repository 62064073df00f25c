// Licensed under the Apache-2.0 license

//! Turns the deserialized SVD tree into self-contained raw records.
//!
//! `access` and `resetValue` cascade device → peripheral → register →
//! field. SVD defaults access to `read-write` and reset values to zero
//! when nothing on the path sets them.

use anyhow::{anyhow, bail, Context};
use log::debug;

use crate::raw::{
    RawDevice, RawEnumValue, RawEnumeratedValues, RawField, RawPeripheral, RawRegister,
};
use crate::xml::{DeviceXml, EnumeratedValuesXml, FieldXml, PeripheralXml, RegisterXml};

const DEFAULT_ACCESS: &str = "read-write";

/// Properties a child takes from its parent unless it overrides them.
#[derive(Clone, Debug)]
struct Inherited {
    access: String,
    reset_value: u64,
}

impl Inherited {
    fn root() -> Self {
        Self {
            access: DEFAULT_ACCESS.to_string(),
            reset_value: 0,
        }
    }

    fn with(
        &self,
        access: Option<&str>,
        reset_value: Option<&str>,
    ) -> Result<Inherited, anyhow::Error> {
        Ok(Inherited {
            access: access
                .map(|a| a.trim().to_string())
                .unwrap_or_else(|| self.access.clone()),
            reset_value: match reset_value {
                Some(value) => parse_int(value).context("resetValue")?,
                None => self.reset_value,
            },
        })
    }
}

/// Parses an SVD integer: `0x`/`0X` hexadecimal, `#` binary or decimal.
///
/// # Examples
/// ```
/// assert_eq!(registers_svd::parse_int("0x40034000").unwrap(), 0x4003_4000);
/// assert_eq!(registers_svd::parse_int("32").unwrap(), 32);
/// ```
pub fn parse_int(text: &str) -> Result<u64, anyhow::Error> {
    let text = text.trim();
    let (digits, radix) = if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        (hex, 16)
    } else if let Some(bin) = text.strip_prefix('#') {
        (bin, 2)
    } else {
        (text, 10)
    };
    u64::from_str_radix(digits, radix).map_err(|err| anyhow!("invalid integer `{}`: {}", text, err))
}

pub(crate) fn resolve_device(device: DeviceXml) -> Result<RawDevice, anyhow::Error> {
    let inherited = Inherited::root()
        .with(device.access.as_deref(), device.reset_value.as_deref())
        .with_context(|| format!("device `{}`", device.name))?;

    let mut peripherals: Vec<RawPeripheral> = Vec::new();
    for peripheral in device.peripherals.peripheral {
        let name = peripheral.name.clone();
        let resolved = resolve_peripheral(peripheral, &inherited, &peripherals)
            .with_context(|| format!("peripheral `{name}`"))?;
        peripherals.push(resolved);
    }

    Ok(RawDevice {
        name: device.name,
        description: device.description,
        peripherals,
    })
}

fn resolve_peripheral(
    peripheral: PeripheralXml,
    inherited: &Inherited,
    earlier: &[RawPeripheral],
) -> Result<RawPeripheral, anyhow::Error> {
    let inherited = inherited.with(
        peripheral.access.as_deref(),
        peripheral.reset_value.as_deref(),
    )?;
    let base_address = parse_int(&peripheral.base_address).context("baseAddress")?;

    let mut description = peripheral.description;
    let mut registers = Vec::new();
    if let Some(base_name) = &peripheral.derived_from {
        let base = earlier
            .iter()
            .find(|p| &p.name == base_name)
            .ok_or_else(|| anyhow!("derivedFrom refers to unknown peripheral `{}`", base_name))?;
        debug!("{} derives its registers from {}", peripheral.name, base.name);
        registers = base.registers.clone();
        if description.is_none() {
            description = base.description.clone();
        }
    }

    // Registers declared on a derived peripheral replace inherited ones of the same name.
    let inherited_count = registers.len();
    for register in peripheral.registers.map(|r| r.register).unwrap_or_default() {
        let name = register.name.clone();
        let resolved =
            resolve_register(register, &inherited).with_context(|| format!("register `{name}`"))?;
        for register in resolved {
            match registers[..inherited_count]
                .iter_mut()
                .find(|r| r.name == register.name)
            {
                Some(existing) => *existing = register,
                None => registers.push(register),
            }
        }
    }

    Ok(RawPeripheral {
        name: peripheral.name,
        description,
        base_address,
        registers,
    })
}

/// Resolves one `<register>`, expanding `dim` arrays into one record per element.
fn resolve_register(
    register: RegisterXml,
    inherited: &Inherited,
) -> Result<Vec<RawRegister>, anyhow::Error> {
    let inherited = inherited.with(register.access.as_deref(), register.reset_value.as_deref())?;
    let address_offset = parse_int(&register.address_offset).context("addressOffset")?;

    let fields = register
        .fields
        .map(|f| f.field)
        .unwrap_or_default()
        .into_iter()
        .map(|field| {
            let name = field.name.clone();
            resolve_field(field, &inherited.access).with_context(|| format!("field `{name}`"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some(dim) = register.dim.as_deref() else {
        return Ok(vec![RawRegister {
            name: register.name,
            description: register.description,
            address_offset,
            reset_value: inherited.reset_value,
            fields,
        }]);
    };

    let dim = parse_int(dim).context("dim")?;
    let increment = register
        .dim_increment
        .as_deref()
        .map(parse_int)
        .transpose()
        .context("dimIncrement")?
        .ok_or_else(|| anyhow!("dim without dimIncrement"))?;
    let indices = dim_indices(dim, register.dim_index.as_deref())?;

    Ok(indices
        .iter()
        .enumerate()
        .map(|(i, index)| RawRegister {
            name: dim_name(&register.name, index),
            description: register.description.clone(),
            address_offset: address_offset + i as u64 * increment,
            reset_value: inherited.reset_value,
            fields: fields.clone(),
        })
        .collect())
}

fn dim_indices(dim: u64, dim_index: Option<&str>) -> Result<Vec<String>, anyhow::Error> {
    let indices: Vec<String> = match dim_index {
        None => (0..dim).map(|i| i.to_string()).collect(),
        Some(list) => match list.split_once('-') {
            Some((start, end)) if !list.contains(',') => range_indices(start.trim(), end.trim())?,
            _ => list.split(',').map(|s| s.trim().to_string()).collect(),
        },
    };
    if indices.len() as u64 != dim {
        bail!(
            "dimIndex lists {} entries but dim is {}",
            indices.len(),
            dim
        );
    }
    Ok(indices)
}

/// Expands `0-3` or `A-D` style index ranges.
fn range_indices(start: &str, end: &str) -> Result<Vec<String>, anyhow::Error> {
    if let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) {
        return Ok((start..=end).map(|i| i.to_string()).collect());
    }
    let mut start_chars = start.chars();
    let mut end_chars = end.chars();
    match (
        start_chars.next(),
        start_chars.next(),
        end_chars.next(),
        end_chars.next(),
    ) {
        (Some(s), None, Some(e), None) if s.is_ascii_uppercase() && e.is_ascii_uppercase() => {
            Ok((s..=e).map(String::from).collect())
        }
        _ => bail!("unsupported dimIndex range `{}-{}`", start, end),
    }
}

fn dim_name(name: &str, index: &str) -> String {
    name.replace("[%s]", &format!("_{index}"))
        .replace("%s", index)
}

fn resolve_field(field: FieldXml, inherited_access: &str) -> Result<RawField, anyhow::Error> {
    let (bit_offset, bit_width) = bit_position(&field)?;
    let enumerated_values = field
        .enumerated_values
        .into_iter()
        .map(resolve_enumerated_values)
        .collect();

    Ok(RawField {
        name: field.name,
        description: field.description,
        bit_offset,
        bit_width,
        access: field
            .access
            .map(|a| a.trim().to_string())
            .unwrap_or_else(|| inherited_access.to_string()),
        modified_write_values: field.modified_write_values.map(|m| m.trim().to_string()),
        enumerated_values,
    })
}

/// Returns `(offset, width)` from whichever of the three SVD forms is present.
fn bit_position(field: &FieldXml) -> Result<(u32, u32), anyhow::Error> {
    if let Some(offset) = &field.bit_offset {
        let width = match &field.bit_width {
            Some(width) => bit_index(width).context("bitWidth")?,
            None => 1,
        };
        if width == 0 {
            bail!("bitWidth must be at least 1");
        }
        return Ok((bit_index(offset).context("bitOffset")?, width));
    }
    if let (Some(lsb), Some(msb)) = (&field.lsb, &field.msb) {
        return span(bit_index(lsb)?, bit_index(msb)?);
    }
    if let Some(range) = &field.bit_range {
        let (msb, lsb) = range
            .trim()
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .and_then(|r| r.split_once(':'))
            .ok_or_else(|| anyhow!("malformed bitRange `{}`", range))?;
        return span(bit_index(lsb)?, bit_index(msb)?);
    }
    bail!("field has no bitOffset, lsb/msb or bitRange")
}

fn span(lsb: u32, msb: u32) -> Result<(u32, u32), anyhow::Error> {
    if msb < lsb {
        bail!("msb {} is below lsb {}", msb, lsb);
    }
    Ok((lsb, msb - lsb + 1))
}

fn bit_index(text: &str) -> Result<u32, anyhow::Error> {
    let value = parse_int(text)?;
    u32::try_from(value).map_err(|_| anyhow!("bit position {} out of range", value))
}

fn resolve_enumerated_values(group: EnumeratedValuesXml) -> RawEnumeratedValues {
    let values = group
        .values
        .into_iter()
        .filter_map(|value| match value.value {
            Some(literal) => Some(RawEnumValue {
                name: value.name,
                description: value.description,
                value: literal.trim().to_string(),
            }),
            None => {
                debug!(
                    "skipping enumerated value `{}` without a literal (isDefault: {:?})",
                    value.name, value.is_default
                );
                None
            }
        })
        .collect();

    RawEnumeratedValues {
        name: group.name,
        values,
    }
}
