// ABOUTME: Caller-chosen container name validation.
// ABOUTME: Enforces the character set the Docker and Podman daemons accept for names.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MAX_LEN: usize = 128;

#[derive(Debug, Error)]
pub enum ContainerNameError {
    #[error("container name cannot be empty")]
    Empty,

    #[error("container name exceeds maximum length of 128 characters")]
    TooLong,

    #[error("container name must start with a letter or digit")]
    InvalidStart,

    #[error("invalid character in container name: '{0}'")]
    InvalidChar(char),
}

/// Stable, caller-chosen name of a server container.
///
/// Daemons accept `[a-zA-Z0-9][a-zA-Z0-9_.-]*`; a leading `/` as returned by
/// inspect is stripped before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContainerName(String);

impl ContainerName {
    pub fn new(value: &str) -> Result<Self, ContainerNameError> {
        let value = value.strip_prefix('/').unwrap_or(value);

        let mut chars = value.chars();
        match chars.next() {
            None => return Err(ContainerNameError::Empty),
            Some(c) if !c.is_ascii_alphanumeric() => return Err(ContainerNameError::InvalidStart),
            Some(_) => {}
        }

        if value.len() > MAX_LEN {
            return Err(ContainerNameError::TooLong);
        }

        if let Some(c) = chars.find(|c| !c.is_ascii_alphanumeric() && !"_.-".contains(*c)) {
            return Err(ContainerNameError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContainerName {
    type Err = ContainerNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for ContainerName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
