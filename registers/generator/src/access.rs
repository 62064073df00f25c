// Licensed under the Apache-2.0 license

//! Read/write semantics of fields and registers.
//!
//! A register's access type is not declared, it is composed from the
//! access types of its fields:
//!
//! | field access types present                 | register access |
//! |--------------------------------------------|-----------------|
//! | any `read-write`                           | `read-write`    |
//! | write-only-like and `read-only`            | `read-write`    |
//! | write-only-like only                       | `write-only`    |
//! | `read-only` only                           | `read-only`     |
//!
//! Rows are checked top to bottom. `self-clearing` and `write-clear` count
//! as write-only-like (see [`AccessType::is_write_only_like`]).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::DeriveError;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AccessType {
    ReadOnly,
    WriteOnly,
    ReadWrite,
    /// Hardware clears the bit one cycle after it is written.
    SelfClearing,
    /// Writing 1 clears the bit.
    WriteClear,
}

impl AccessType {
    pub const ALL: [AccessType; 5] = [
        AccessType::ReadOnly,
        AccessType::WriteOnly,
        AccessType::ReadWrite,
        AccessType::SelfClearing,
        AccessType::WriteClear,
    ];

    /// The textual marker used in raw records, e.g. `read-only`.
    pub fn marker(self) -> &'static str {
        match self {
            AccessType::ReadOnly => "read-only",
            AccessType::WriteOnly => "write-only",
            AccessType::ReadWrite => "read-write",
            AccessType::SelfClearing => "self-clearing",
            AccessType::WriteClear => "write-clear",
        }
    }

    /// True for kinds that behave as write-only when composing a register.
    pub fn is_write_only_like(self) -> bool {
        matches!(
            self,
            AccessType::WriteOnly | AccessType::SelfClearing | AccessType::WriteClear
        )
    }

    /// Whether software can read a register of this access type.
    pub fn can_read(self) -> bool {
        matches!(self, AccessType::ReadOnly | AccessType::ReadWrite)
    }

    /// Whether software can write a register of this access type.
    pub fn can_write(self) -> bool {
        self != AccessType::ReadOnly
    }

    /// Composes field access types into the access type of their register.
    ///
    /// Duplicates are irrelevant; only the set of distinct kinds matters.
    pub fn from_field_access_types(
        access_types: impl IntoIterator<Item = AccessType>,
    ) -> Result<AccessType, DeriveError> {
        let present: BTreeSet<AccessType> = access_types.into_iter().collect();
        if present.is_empty() {
            return Err(DeriveError::EmptyFieldSet);
        }

        let any_write_only_like = present.iter().any(|a| a.is_write_only_like());
        let any_read_only = present.contains(&AccessType::ReadOnly);

        // Readable and writable fields side by side make a read-write
        // register even when no single field is read-write.
        if present.contains(&AccessType::ReadWrite) || (any_write_only_like && any_read_only) {
            Ok(AccessType::ReadWrite)
        } else if any_write_only_like {
            Ok(AccessType::WriteOnly)
        } else if present.len() == 1 && any_read_only {
            Ok(AccessType::ReadOnly)
        } else {
            Err(DeriveError::InvalidAccessComposition(
                present.into_iter().collect(),
            ))
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl FromStr for AccessType {
    type Err = DeriveError;

    fn from_str(marker: &str) -> Result<Self, Self::Err> {
        AccessType::ALL
            .into_iter()
            .find(|a| a.marker() == marker)
            .ok_or_else(|| DeriveError::UnknownAccessMarker(marker.to_string()))
    }
}
