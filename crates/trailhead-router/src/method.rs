//! HTTP methods understood by the route table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Route methods.
///
/// `Mount` is the sentinel under which delegated sub-routers are stored; it
/// never selects ordinary routes for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// DELETE method
    Delete,
    /// HEAD method
    Head,
    /// LINK method
    Link,
    /// UNLINK method
    Unlink,
    /// Mounted sub-router sentinel
    Mount,
}

impl Method {
    /// Every HTTP method a request can carry, in table order.
    pub const HTTP: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Head,
        Self::Link,
        Self::Unlink,
    ];

    /// Returns the method as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Link => "LINK",
            Self::Unlink => "UNLINK",
            Self::Mount => "MOUNT",
        }
    }

    /// Returns true for the mount sentinel.
    #[must_use]
    pub const fn is_mount(self) -> bool {
        matches!(self, Self::Mount)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "LINK" => Ok(Self::Link),
            "UNLINK" => Ok(Self::Unlink),
            "MOUNT" => Ok(Self::Mount),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("GET".parse::<Method>(), Ok(Method::Get));
        assert_eq!("unlink".parse::<Method>(), Ok(Method::Unlink));
        assert_eq!("Mount".parse::<Method>(), Ok(Method::Mount));
        assert_eq!(
            "PATCH".parse::<Method>(),
            Err(UnknownMethod("PATCH".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for method in Method::HTTP {
            assert_eq!(method.to_string().parse::<Method>(), Ok(method));
        }
        assert!(!Method::HTTP.contains(&Method::Mount));
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&Method::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let back: Method = serde_json::from_str("\"LINK\"").unwrap();
        assert_eq!(back, Method::Link);
    }
}
