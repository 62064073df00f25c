// Licensed under the Apache-2.0 license

//! Serde mirror of the subset of the CMSIS-SVD schema we read.
//!
//! Every numeric property is kept as text here; [`crate::resolve`] turns
//! it into numbers once inheritance is known.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeviceXml {
    pub name: String,
    pub description: Option<String>,
    pub access: Option<String>,
    pub reset_value: Option<String>,
    pub peripherals: PeripheralsXml,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PeripheralsXml {
    #[serde(rename = "peripheral", default)]
    pub peripheral: Vec<PeripheralXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PeripheralXml {
    /// Attribute naming an earlier peripheral to copy registers from.
    pub derived_from: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub base_address: String,
    pub access: Option<String>,
    pub reset_value: Option<String>,
    pub registers: Option<RegistersXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegistersXml {
    #[serde(rename = "register", default)]
    pub register: Vec<RegisterXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterXml {
    pub name: String,
    pub description: Option<String>,
    pub address_offset: String,
    pub access: Option<String>,
    pub reset_value: Option<String>,
    pub dim: Option<String>,
    pub dim_increment: Option<String>,
    pub dim_index: Option<String>,
    pub fields: Option<FieldsXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldsXml {
    #[serde(rename = "field", default)]
    pub field: Vec<FieldXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldXml {
    pub name: String,
    pub description: Option<String>,
    pub bit_offset: Option<String>,
    pub bit_width: Option<String>,
    pub lsb: Option<String>,
    pub msb: Option<String>,
    pub bit_range: Option<String>,
    pub access: Option<String>,
    pub modified_write_values: Option<String>,
    #[serde(rename = "enumeratedValues", default)]
    pub enumerated_values: Vec<EnumeratedValuesXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnumeratedValuesXml {
    pub name: Option<String>,
    #[serde(rename = "enumeratedValue", default)]
    pub values: Vec<EnumeratedValueXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnumeratedValueXml {
    pub name: String,
    pub description: Option<String>,
    pub value: Option<String>,
    pub is_default: Option<String>,
}
