// ABOUTME: Image reference parsing for server images.
// ABOUTME: Accepts name, name:tag, registry[:port]/path:tag and @digest forms.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0}")]
    InvalidChar(char),

    #[error("invalid image reference format: {0}")]
    InvalidFormat(String),
}

/// Reference to the image a server container is created from.
///
/// A bare name gets the `latest` tag, matching what the daemon would pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    registry: Option<String>,
    name: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        if let Some(c) = input
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !"/:.-_@".contains(*c))
        {
            return Err(ParseImageRefError::InvalidChar(c));
        }

        let (reference, digest) = match input.split_once('@') {
            Some((_, "")) => return Err(ParseImageRefError::InvalidFormat(input.to_string())),
            Some((before, after)) => (before, Some(after.to_string())),
            None => (input, None),
        };

        // A colon followed by a slash belongs to a registry port, not a tag.
        let (path, tag) = match reference.rsplit_once(':') {
            Some((before, after)) if !after.contains('/') => (before, Some(after.to_string())),
            _ => (reference, None),
        };

        if path.is_empty() || path.starts_with('/') || path.ends_with('/') || path.contains("//")
        {
            return Err(ParseImageRefError::InvalidFormat(input.to_string()));
        }

        let (registry, name) = match path.split_once('/') {
            Some((first, rest))
                if first.contains('.') || first.contains(':') || first == "localhost" =>
            {
                (Some(first.to_string()), rest.to_string())
            }
            _ => (None, path.to_string()),
        };

        let tag = match (tag, &digest) {
            (None, None) => Some("latest".to_string()),
            (tag, _) => tag,
        };

        Ok(Self {
            registry,
            name,
            tag,
            digest,
        })
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

impl FromStr for ImageRef {
    type Err = ParseImageRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref registry) = self.registry {
            write!(f, "{}/", registry)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(ref tag) = self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(ref digest) = self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_port_is_not_a_tag() {
        let img = ImageRef::parse("localhost:5000/cloudunit/tomcat-8").unwrap();
        assert_eq!(img.registry(), Some("localhost:5000"));
        assert_eq!(img.name(), "cloudunit/tomcat-8");
        assert_eq!(img.tag(), Some("latest"));
    }

    #[test]
    fn dangling_digest_is_rejected() {
        assert!(matches!(
            ImageRef::parse("tomcat@"),
            Err(ParseImageRefError::InvalidFormat(_))
        ));
    }

    #[test]
    fn double_slash_is_rejected() {
        assert!(ImageRef::parse("cloudunit//tomcat").is_err());
    }
}
