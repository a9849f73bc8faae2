//! Users, profiles and profile properties.

use crate::id::{offline_uuid, UnsignedUuid};
use crate::textures::Textures;
use serde::{Deserialize, Serialize};

/// A single user property, e.g. `preferredLanguage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: String,
}

/// An account as seen by the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UnsignedUuid,
    /// User properties.
    #[serde(default)]
    pub properties: Vec<UserProperty>,
}

impl User {
    /// Creates a user with no properties.
    pub fn new(id: impl Into<UnsignedUuid>) -> Self {
        Self {
            id: id.into(),
            properties: Vec::new(),
        }
    }

    /// Adds a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(UserProperty {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// Names a profile property may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyName {
    /// Skin and cape metadata.
    Textures,
    /// Texture types the profile may upload.
    UploadableTextures,
}

/// The value of a profile property.
///
/// Data stores may hand back either the final encoded string or a structured
/// JSON document. Only [`PropertyValue::Encoded`] ever leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Already in its wire form.
    Encoded(String),
    /// Structured value still to be serialized.
    Structured(serde_json::Value),
}

impl PropertyValue {
    /// Returns the wire string if the value is already encoded.
    pub fn as_encoded(&self) -> Option<&str> {
        match self {
            PropertyValue::Encoded(s) => Some(s),
            PropertyValue::Structured(serde_json::Value::String(s)) => Some(s),
            PropertyValue::Structured(_) => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Encoded(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Encoded(value.to_string())
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        PropertyValue::Structured(value)
    }
}

/// A named, optionally signed, profile property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileProperty {
    /// Property name.
    pub name: PropertyName,
    /// Property value.
    pub value: PropertyValue,
    /// Base64 SHA1withRSA signature over the encoded value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl ProfileProperty {
    /// Creates an unsigned property.
    pub fn new(name: PropertyName, value: impl Into<PropertyValue>) -> Self {
        Self {
            name,
            value: value.into(),
            signature: None,
        }
    }

    /// Creates a structured `textures` property.
    pub fn textures(textures: &Textures) -> serde_json::Result<Self> {
        Ok(Self::new(
            PropertyName::Textures,
            serde_json::to_value(textures)?,
        ))
    }
}

/// A game profile owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile UUID (unsigned).
    pub id: UnsignedUuid,
    /// Profile name.
    pub name: String,
    /// Properties, only included where the endpoint calls for texture data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<ProfileProperty>>,
}

impl Profile {
    /// Creates a profile without properties.
    pub fn new(id: impl Into<UnsignedUuid>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            properties: None,
        }
    }

    /// Creates a profile whose ID is the offline UUID of `name`.
    pub fn offline(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(offline_uuid(&name), name)
    }

    /// Appends a property.
    pub fn with_property(mut self, property: ProfileProperty) -> Self {
        self.properties.get_or_insert_with(Vec::new).push(property);
        self
    }

    /// Returns a copy carrying only the ID and name.
    pub fn summary(&self) -> Profile {
        Profile::new(self.id.clone(), self.name.clone())
    }
}
