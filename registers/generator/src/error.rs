// Licensed under the Apache-2.0 license

use thiserror::Error;

use crate::access::AccessType;

/// Errors raised while normalizing raw register records.
///
/// All of them are fatal: generation stops at the first one. The
/// derivation functions attach the peripheral/register/field path as
/// [`anyhow`] context, so callers that need the kind should look at
/// `err.root_cause().downcast_ref::<DeriveError>()`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DeriveError {
    /// A numeric literal has an unknown prefix or digits invalid for its base.
    #[error("malformed literal `{0}`")]
    MalformedLiteral(String),

    /// A register has no fields, so no access type can be derived for it.
    #[error("register has no fields, cannot derive its access type")]
    EmptyFieldSet,

    #[error("field access types {0:?} do not compose into a register access type")]
    InvalidAccessComposition(Vec<AccessType>),

    /// A raw access marker is none of the known access types.
    #[error("unknown access marker `{0}`")]
    UnknownAccessMarker(String),
}
