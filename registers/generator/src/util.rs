// Licensed under the Apache-2.0 license

//! Utility functions for name conversion and formatting.
//!
//! This module provides functions for making SVD names usable as
//! identifiers, converting between naming conventions (snake_case,
//! CamelCase) and formatting values for Rust code generation.

/// Extension of every generated peripheral file.
pub const FILE_EXTENSION: &str = ".rs";

/// Makes a name start with a letter by prefixing `_` when it does not.
///
/// # Examples
/// ```
/// use registers_generator::util::valid_name;
/// assert_eq!(valid_name("IDLE"), "IDLE");
/// assert_eq!(valid_name("1MHZ"), "_1MHZ");
/// ```
pub fn valid_name(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_alphabetic() => name.to_string(),
        _ => format!("_{name}"),
    }
}

/// Name of the file generated for a peripheral: its lowercased name plus
/// [`FILE_EXTENSION`].
///
/// # Examples
/// ```
/// use registers_generator::util::output_file_name;
/// assert_eq!(output_file_name("IO_BANK0"), "io_bank0.rs");
/// ```
pub fn output_file_name(peripheral_name: &str) -> String {
    format!("{}{FILE_EXTENSION}", peripheral_name.to_lowercase())
}

/// Converts a name to snake_case.
///
/// Handles various edge cases:
/// - Leading digits get underscore prefix
/// - Punctuation and whitespace become underscores
/// - CamelCase transitions get underscore separators
/// - Rust keywords get underscore suffix
///
/// # Examples
/// ```
/// use registers_generator::util::snake_case;
/// assert_eq!(snake_case("MyRegister"), "my_register");
/// assert_eq!(snake_case("GPIO_OE_SET"), "gpio_oe_set");
/// ```
pub fn snake_case(name: &str) -> String {
    let mut result = String::new();
    let mut prev = None;
    for c in name.chars() {
        if c.is_ascii_whitespace() || c.is_ascii_punctuation() {
            if prev.is_some() && prev != Some('_') {
                result.push('_');
            }
            prev = Some('_');
            continue;
        }
        if let Some(prev) = prev {
            if (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && c.is_ascii_uppercase() {
                result.push('_');
            }
        }
        prev = Some(c);
        result.push(c.to_ascii_lowercase());
    }
    let result = result.trim_end_matches('_');
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{result}")
    } else {
        tweak_keywords(result).to_string()
    }
}

/// Converts a name to CamelCase (PascalCase).
///
/// Handles various edge cases:
/// - Leading digits get underscore prefix
/// - Punctuation and whitespace start a new word
/// - Rust keywords get underscore suffix
///
/// # Examples
/// ```
/// use registers_generator::util::camel_case;
/// assert_eq!(camel_case("uart_cr"), "UartCr");
/// assert_eq!(camel_case("_1MHZ"), "_1mhz");
/// ```
pub fn camel_case(name: &str) -> String {
    let mut result = String::new();
    let mut upper_next = true;
    for c in name.chars() {
        if c.is_ascii_punctuation() || c.is_ascii_whitespace() {
            upper_next = true;
        } else {
            result.push(if upper_next {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            });
            upper_next = false;
        }
    }
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{result}")
    } else {
        String::from(tweak_keywords(&result))
    }
}

/// Appends underscore suffix to Rust keywords to avoid conflicts.
fn tweak_keywords(s: &str) -> &str {
    match s {
        "as" => "as_",
        "break" => "break_",
        "const" => "const_",
        "continue" => "continue_",
        "crate" => "crate_",
        "else" => "else_",
        "enum" => "enum_",
        "fn" => "fn_",
        "for" => "for_",
        "if" => "if_",
        "impl" => "impl_",
        "in" => "in_",
        "let" => "let_",
        "loop" => "loop_",
        "match" => "match_",
        "mod" => "mod_",
        "move" => "move_",
        "mut" => "mut_",
        "pub" => "pub_",
        "ref" => "ref_",
        "return" => "return_",
        "self" => "self_",
        "Self" => "Self_",
        "static" => "static_",
        "struct" => "struct_",
        "super" => "super_",
        "trait" => "trait_",
        "true" => "true_",
        "type" => "type_",
        "unsafe" => "unsafe_",
        "use" => "use_",
        "where" => "where_",
        "while" => "while_",
        "async" => "async_",
        "await" => "await_",
        "dyn" => "dyn_",
        "abstract" => "abstract_",
        "become" => "become_",
        "box" => "box_",
        "do" => "do_",
        "final" => "final_",
        "macro" => "macro_",
        "override" => "override_",
        "priv" => "priv_",
        "typeof" => "typeof_",
        "unsized" => "unsized_",
        "virtual" => "virtual_",
        "yield" => "yield_",
        s => s,
    }
}

/// Formats an integer as a hex constant with underscores for readability.
///
/// Values <= 9 are formatted as decimal; larger values use hex with
/// underscore separators every 4 digits.
///
/// # Examples
/// ```
/// use registers_generator::util::hex_const;
/// assert_eq!(hex_const(5), "5");
/// assert_eq!(hex_const(0x1234), "0x1234");
/// assert_eq!(hex_const(0x40034000), "0x4003_4000");
/// ```
pub fn hex_const(val: u64) -> String {
    if val > 9 {
        let mut x = String::new();
        for (i, c) in format!("{val:x}").chars().rev().enumerate() {
            if i % 4 == 0 && i != 0 {
                x.push('_');
            }
            x.push(c);
        }
        "0x".to_string() + &x.chars().rev().collect::<String>()
    } else {
        format!("{val}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert_eq!(valid_name("IDLE"), "IDLE");
        assert_eq!(valid_name("1"), "_1");
        assert_eq!(valid_name("_RESERVED"), "__RESERVED");
        assert_eq!(valid_name(""), "_");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("SIO"), "sio.rs");
        assert_eq!(output_file_name("uart0"), "uart0.rs");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("MyRegister"), "my_register");
        assert_eq!(snake_case("GPIO_OE_SET"), "gpio_oe_set");
        // All-uppercase sequences stay lowercase without separators
        assert_eq!(snake_case("HTTPServer"), "httpserver");
        assert_eq!(snake_case("type"), "type_");
        assert_eq!(snake_case("_1MHZ"), "_1_mhz");
        assert_eq!(snake_case("3V3"), "_3_v3");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("my_register"), "MyRegister");
        assert_eq!(camel_case("GPIO_OE_SET"), "GpioOeSet");
        assert_eq!(camel_case("_1"), "_1");
        assert_eq!(camel_case("ZERO"), "Zero");
        assert_eq!(camel_case("self"), "Self_");
    }

    #[test]
    fn test_hex_const() {
        assert_eq!(hex_const(0), "0");
        assert_eq!(hex_const(9), "9");
        assert_eq!(hex_const(10), "0xa");
        assert_eq!(hex_const(0x1234), "0x1234");
        assert_eq!(hex_const(0x12345678), "0x1234_5678");
    }
}
