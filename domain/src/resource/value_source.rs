//! Literal-or-reference value shapes
//!
//! Several resources carry values that are either written inline or point
//! at a key in a secret / config map (or, for addresses, at a service).
//! These types only describe the shape; resolution lives in the
//! application layer (`ValueSourceResolver`).

use serde::{Deserialize, Serialize};

/// Selects a key within a secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    pub name: String,
    pub key: String,
}

/// Selects a key within a config map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapKeySelector {
    pub name: String,
    pub key: String,
}

/// Points at an in-cluster service; resolves to its HTTP address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The reference half of a [`ValueSource`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueFromSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeySelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_key_ref: Option<ConfigMapKeySelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ref: Option<ServiceReference>,
}

impl ValueFromSource {
    pub fn secret(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            secret_key_ref: Some(SecretKeySelector {
                name: name.into(),
                key: key.into(),
            }),
            ..Default::default()
        }
    }

    pub fn config_map(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            config_map_key_ref: Some(ConfigMapKeySelector {
                name: name.into(),
                key: key.into(),
            }),
            ..Default::default()
        }
    }

    pub fn service(service: ServiceReference) -> Self {
        Self {
            service_ref: Some(service),
            ..Default::default()
        }
    }

    /// True when no reference kind is populated
    pub fn is_empty(&self) -> bool {
        self.secret_key_ref.is_none()
            && self.config_map_key_ref.is_none()
            && self.service_ref.is_none()
    }
}

/// A value written inline or loaded from a reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFromSource>,
}

impl ValueSource {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            value_from: None,
        }
    }

    pub fn from_ref(value_from: ValueFromSource) -> Self {
        Self {
            value: None,
            value_from: Some(value_from),
        }
    }
}

/// The reference half of a [`HeaderValue`] (secrets only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderValueSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeySelector>,
}

/// Value of an outgoing HTTP header: a literal or a secret key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<HeaderValueSource>,
}

impl HeaderValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            value_from: None,
        }
    }

    pub fn secret(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            value: None,
            value_from: Some(HeaderValueSource {
                secret_key_ref: Some(SecretKeySelector {
                    name: name.into(),
                    key: key.into(),
                }),
            }),
        }
    }

    /// The literal value, if present and non-empty
    pub fn literal_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn secret_key_ref(&self) -> Option<&SecretKeySelector> {
        self.value_from.as_ref()?.secret_key_ref.as_ref()
    }
}

/// A named HTTP header declared on a tool or MCP server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub name: String,
    pub value: HeaderValue,
}

impl Header {
    pub fn new(name: impl Into<String>, value: HeaderValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A named template parameter declared on an agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFromSource>,
}

impl Parameter {
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from: None,
        }
    }

    pub fn from_ref(name: impl Into<String>, value_from: ValueFromSource) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from: Some(value_from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value_wire_shape() {
        let header: Header = serde_json::from_value(serde_json::json!({
            "name": "Authorization",
            "value": {"valueFrom": {"secretKeyRef": {"name": "api", "key": "token"}}}
        }))
        .unwrap();

        assert_eq!(header.name, "Authorization");
        assert!(header.value.literal_value().is_none());
        let selector = header.value.secret_key_ref().unwrap();
        assert_eq!(selector.name, "api");
        assert_eq!(selector.key, "token");
    }

    #[test]
    fn test_empty_literal_is_not_a_value() {
        let value = HeaderValue::literal("");
        assert!(value.literal_value().is_none());
        assert!(value.secret_key_ref().is_none());
    }

    #[test]
    fn test_value_from_is_empty() {
        assert!(ValueFromSource::default().is_empty());
        assert!(!ValueFromSource::secret("s", "k").is_empty());
        assert!(!ValueFromSource::config_map("c", "k").is_empty());
    }
}
