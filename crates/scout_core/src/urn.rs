use std::fmt;

use serde::{Serialize, Serializer};

use crate::{ErrorKind, ScoutError};

const SCHEME: &str = "urn:li:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrnKind {
    Profile,
    MiniProfile,
}

impl UrnKind {
    fn as_str(self) -> &'static str {
        match self {
            UrnKind::Profile => "profile",
            UrnKind::MiniProfile => "miniProfile",
        }
    }
}

/// A member identifier accepted by the write API: `urn:li:(profile|miniProfile):<id>`.
///
/// Only constructible through [`Urn::parse`], so holding one means the grammar held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urn {
    kind: UrnKind,
    id: String,
}

impl Urn {
    pub fn parse(value: &str) -> Result<Self, ScoutError> {
        let invalid = || {
            ScoutError::new(
                ErrorKind::InvalidUrn {
                    value: value.to_string(),
                },
                "expected urn:li:profile:<id> or urn:li:miniProfile:<id>",
            )
        };

        let rest = value.strip_prefix(SCHEME).ok_or_else(invalid)?;
        let (kind, id) = rest.split_once(':').ok_or_else(invalid)?;
        let kind = match kind {
            "profile" => UrnKind::Profile,
            "miniProfile" => UrnKind::MiniProfile,
            _ => return Err(invalid()),
        };
        if id.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }

    pub fn kind(&self) -> UrnKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}:{}", self.kind.as_str(), self.id)
    }
}

impl Serialize for Urn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
