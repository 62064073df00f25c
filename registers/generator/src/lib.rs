// Licensed under the Apache-2.0 license

//! SVD to tock-registers Rust code generator.
//!
//! This crate normalizes the raw records read by `registers-svd` into a
//! register model ([`Peripheral`], [`Register`], [`Field`], [`EnumValue`])
//! and renders that model into Rust code compatible with the
//! tock-registers crate.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use registers_generator::{generate_from_file, FilterConfig, RenderOptions};
//!
//! let filter = FilterConfig::new().include_peripheral("uart0");
//! let files = generate_from_file(
//!     Path::new("rp2040.svd"),
//!     &filter,
//!     &RenderOptions::default(),
//! ).unwrap();
//! for file in &files {
//!     println!("{}:\n{}", file.file_name, file.code);
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`value`]: Numeric literal parsing
//! - [`access`]: Access types and how fields compose into registers
//! - [`types`]: The normalized register model
//! - [`config`]: Peripheral filtering ([`FilterConfig`]) and [`RenderOptions`]
//! - [`output`]: Rendering the model into Rust code
//! - [`util`]: Name conversion utilities (snake_case, camel_case, hex formatting)
//! - `codegen`: Derivation pipeline and public API

pub mod access;
pub mod config;
pub mod error;
pub mod output;
pub mod types;
pub mod util;
pub mod value;

mod codegen;

// Re-export main public API
pub use access::AccessType;
pub use codegen::{
    derive_field, derive_peripheral, derive_peripherals, derive_register, generate_from_device,
    generate_from_file, output_file_names, GeneratedFile, SINGLE_CYCLE_IO_PERIPHERAL,
};
pub use config::{FilterConfig, RenderOptions};
pub use error::DeriveError;
pub use output::{minify, render_lib_rs, render_peripheral};
pub use types::{EnumValue, Field, Peripheral, Register};
