// Licensed under the Apache-2.0 license

//! Rendering of derived peripherals into Rust code for tock-registers.
//!
//! Rendering only reads the model; whether the text is later minified is
//! a pure formatting choice made by the caller.
//!
//! ## Generated Code Structure
//!
//! For a peripheral named "UART0", the generated code looks like:
//!
//! ```text
//! //! UART0 registers.
//! pub const UART0_ADDR: u32 = 0x4003_4000;
//!
//! pub mod consts {
//!     pub const UARTCR_ADDR: u32 = 0x4003_4030;
//!     pub const UARTCR_RESET: u32 = 0x300;
//!     pub const UARTCR_XOR_ADDR: u32 = 0x4003_5030;
//!     ...
//! }
//!
//! pub mod bits {
//!     use tock_registers::register_bitfields;
//!     register_bitfields! {
//!         u32,
//!         pub Uartcr [ ... ],
//!     }
//! }
//!
//! pub mod regs {
//!     use tock_registers::register_structs;
//!     register_structs! {
//!         pub Uart0 {
//!             (0x0 => _reserved0),
//!             (0x30 => pub uartcr: ReadWrite<u32, super::bits::Uartcr::Register>),
//!             (0x34 => @END),
//!         }
//!     }
//! }
//! ```

use std::collections::BTreeSet;
use std::fmt::Write;

use log::warn;

use crate::types::{Peripheral, Register};
use crate::util::{camel_case, hex_const, snake_case};

/// Alias offset for atomic XOR on write.
pub const ATOMIC_XOR_OFFSET: u64 = 0x1000;
/// Alias offset for atomic bitmask set on write.
pub const ATOMIC_SET_OFFSET: u64 = 0x2000;
/// Alias offset for atomic bitmask clear on write.
pub const ATOMIC_CLEAR_OFFSET: u64 = 0x3000;

const REGISTER_WIDTH: u32 = 32;
const REGISTER_BYTES: u64 = REGISTER_WIDTH as u64 / 8;

//=============================================================================
// Code Generation
//=============================================================================

/// Generate the complete Rust module for one peripheral.
///
/// # Arguments
///
/// * `peripheral` - The derived peripheral
/// * `namespace` - Optional label; when set, everything is wrapped in `pub mod <namespace>`
pub fn render_peripheral(peripheral: &Peripheral, namespace: Option<&str>) -> String {
    let mut body = String::new();

    let name_upper = snake_case(&peripheral.name).to_uppercase();
    writeln!(
        body,
        "pub const {name_upper}_ADDR: {} = {};",
        int_type(peripheral.base_address),
        hex_const(peripheral.base_address)
    )
    .unwrap();

    let constants = generate_register_constants(peripheral);
    if !constants.is_empty() {
        writeln!(body).unwrap();
        writeln!(body, "pub mod consts {{").unwrap();
        writeln!(body, "    //! Register addresses and reset values.").unwrap();
        write!(body, "{constants}").unwrap();
        writeln!(body, "}}").unwrap();
    }

    let bitfields = generate_bitfields(peripheral);
    if !bitfields.is_empty() {
        writeln!(body).unwrap();
        writeln!(body, "pub mod bits {{").unwrap();
        writeln!(
            body,
            "    //! Types that represent individual registers (bitfields)."
        )
        .unwrap();
        writeln!(body, "    use tock_registers::register_bitfields;").unwrap();
        write!(body, "{bitfields}").unwrap();
        writeln!(body, "}}").unwrap();
    }

    let reg_structs = generate_register_structs(peripheral);
    if !reg_structs.is_empty() {
        writeln!(body).unwrap();
        writeln!(body, "pub mod regs {{").unwrap();
        writeln!(body, "    //! Types that represent registers.").unwrap();
        writeln!(body, "    use tock_registers::register_structs;").unwrap();
        write!(body, "{reg_structs}").unwrap();
        writeln!(body, "}}").unwrap();
    }

    let mut output = String::new();
    writeln!(output, "//! {} registers.", peripheral.name).unwrap();
    let description = doc_lines(&peripheral.description);
    if !description.is_empty() {
        writeln!(output, "//!").unwrap();
        for line in description {
            writeln!(output, "//! {line}").unwrap();
        }
    }
    writeln!(output).unwrap();

    match namespace {
        Some(namespace) => {
            writeln!(output, "pub mod {} {{", snake_case(namespace)).unwrap();
            for line in body.lines() {
                if line.is_empty() {
                    writeln!(output).unwrap();
                } else {
                    writeln!(output, "    {line}").unwrap();
                }
            }
            writeln!(output, "}}").unwrap();
        }
        None => output.push_str(&body),
    }

    output
}

/// Strips comments, blank lines and indentation.
///
/// The result is still valid Rust; only the layout changes.
pub fn minify(code: &str) -> String {
    let mut output = String::new();
    for line in code
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
    {
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// Generate the `lib.rs` of a crate holding the given peripheral modules.
pub fn render_lib_rs(modules: &[String]) -> String {
    let mut content = String::new();
    content.push_str("#![no_std]\n\n");

    for module in modules {
        writeln!(content, "pub mod {module};").unwrap();
    }

    content
}

/// Generate address, reset value and atomic alias constants per register.
fn generate_register_constants(peripheral: &Peripheral) -> String {
    let mut output = String::new();
    for register in &peripheral.registers {
        let reg_upper = snake_case(&register.name).to_uppercase();
        let address = register.address();
        writeln!(
            output,
            "    pub const {reg_upper}_ADDR: {} = {};",
            int_type(address),
            hex_const(address)
        )
        .unwrap();
        writeln!(
            output,
            "    pub const {reg_upper}_RESET: {} = {};",
            int_type(register.value_on_reset),
            hex_const(register.value_on_reset)
        )
        .unwrap();

        if register.supports_atomic_bit_operations {
            for (suffix, offset) in [
                ("XOR", ATOMIC_XOR_OFFSET),
                ("SET", ATOMIC_SET_OFFSET),
                ("CLR", ATOMIC_CLEAR_OFFSET),
            ] {
                let alias = address + offset;
                writeln!(
                    output,
                    "    pub const {reg_upper}_{suffix}_ADDR: {} = {};",
                    int_type(alias),
                    hex_const(alias)
                )
                .unwrap();
            }
        }
    }
    output
}

/// Generate the `register_bitfields!` invocation for all registers with a
/// meaningful bitfield decomposition.
fn generate_bitfields(peripheral: &Peripheral) -> String {
    let mut tokens = String::new();
    let mut type_names = BTreeSet::new();

    for register in peripheral.registers.iter().filter(|r| has_bitfield(r)) {
        let name = camel_case(&register.name);
        // dim arrays share one layout under distinct names; identical
        // names after case conversion would clash.
        if !type_names.insert(name.clone()) {
            warn!(
                "{}: bitfield type {} already generated, skipping {}",
                peripheral.name, name, register.name
            );
            continue;
        }

        writeln!(tokens, "        pub {name} [").unwrap();
        for field in &register.fields {
            for line in doc_lines(&field.description) {
                writeln!(tokens, "            /// {line}").unwrap();
            }

            let field_name = camel_case(&field.name);
            let offset = field.start_bit;
            let width = field.length_in_bits;

            if field.enum_values.is_empty() {
                writeln!(
                    tokens,
                    "            {field_name} OFFSET({offset}) NUMBITS({width}) [],"
                )
                .unwrap();
                continue;
            }

            writeln!(
                tokens,
                "            {field_name} OFFSET({offset}) NUMBITS({width}) ["
            )
            .unwrap();
            let mut variants = BTreeSet::new();
            for enum_value in &field.enum_values {
                let variant_ident = camel_case(&enum_value.name);
                if !variants.insert(variant_ident.clone()) {
                    warn!(
                        "{}.{}.{}: duplicate value name {}, skipping",
                        peripheral.name, register.name, field.name, enum_value.name
                    );
                    continue;
                }
                let variant_val = hex_const(enum_value.value);
                writeln!(
                    tokens,
                    "                {variant_ident} = {variant_val},"
                )
                .unwrap();
            }
            writeln!(tokens, "            ],").unwrap();
        }
        writeln!(tokens, "        ],").unwrap();
    }

    if tokens.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    writeln!(output, "    register_bitfields! {{").unwrap();
    writeln!(output, "        u32,").unwrap();
    write!(output, "{tokens}").unwrap();
    writeln!(output, "    }}").unwrap();
    output
}

/// A register slot in the generated struct; registers sharing an offset
/// merge their read/write capabilities.
struct Slot<'a> {
    register: &'a Register,
    can_read: bool,
    can_write: bool,
}

/// Generate the `register_structs!` invocation for the peripheral.
///
/// Handles:
/// - Merging of registers at the same offset (e.g. a read-only RX and a
///   write-only TX data port become one ReadWrite register)
/// - Reserved padding between registers
fn generate_register_structs(peripheral: &Peripheral) -> String {
    if peripheral.registers.is_empty() {
        return String::new();
    }

    let mut sorted: Vec<&Register> = peripheral.registers.iter().collect();
    sorted.sort_by_key(|r| r.address_offset);

    let mut slots: Vec<Slot<'_>> = Vec::new();
    for register in sorted {
        if let Some(last) = slots.last_mut() {
            if last.register.address_offset == register.address_offset {
                last.can_read |= register.access_type.can_read();
                last.can_write |= register.access_type.can_write();
                continue;
            }
        }
        slots.push(Slot {
            register,
            can_read: register.access_type.can_read(),
            can_write: register.access_type.can_write(),
        });
    }

    let struct_name = camel_case(&peripheral.name);
    let mut output = String::new();
    writeln!(output, "    register_structs! {{").unwrap();
    writeln!(output, "        pub {struct_name} {{").unwrap();

    let mut next_offset: u64 = 0;
    let mut reserved_count = 0;
    for slot in &slots {
        let reg_offset = slot.register.address_offset;
        if reg_offset < next_offset {
            warn!(
                "{}.{} at 0x{:x} overlaps the previous register, skipping",
                peripheral.name, slot.register.name, reg_offset
            );
            continue;
        }

        if reg_offset > next_offset {
            writeln!(
                output,
                "            (0x{next_offset:x} => _reserved{reserved_count}),"
            )
            .unwrap();
            reserved_count += 1;
        }

        let name = snake_case(&slot.register.name);
        let reg_type = if slot.can_read && slot.can_write {
            "ReadWrite"
        } else if slot.can_read {
            "ReadOnly"
        } else {
            "WriteOnly"
        };
        let type_str = if has_bitfield(slot.register) {
            let type_name = camel_case(&slot.register.name);
            format!("tock_registers::registers::{reg_type}<u32, super::bits::{type_name}::Register>")
        } else {
            format!("tock_registers::registers::{reg_type}<u32>")
        };

        writeln!(
            output,
            "            (0x{reg_offset:x} => pub {name}: {type_str}),"
        )
        .unwrap();
        next_offset = reg_offset + REGISTER_BYTES;
    }

    writeln!(output, "            (0x{next_offset:x} => @END),").unwrap();
    writeln!(output, "        }}").unwrap();
    writeln!(output, "    }}").unwrap();
    output
}

/// Skip registers with only one field that spans the whole register
/// (no meaningful bitfield decomposition).
fn has_bitfield(register: &Register) -> bool {
    match register.fields.as_slice() {
        [] => false,
        [field] => {
            !(field.start_bit == 0
                && field.length_in_bits == REGISTER_WIDTH
                && field.enum_values.is_empty())
        }
        _ => true,
    }
}

fn doc_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn int_type(value: u64) -> &'static str {
    if value > u64::from(u32::MAX) {
        "u64"
    } else {
        "u32"
    }
}
