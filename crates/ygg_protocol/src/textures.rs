//! Texture payloads carried by the `textures` profile property.

use crate::id::UnsignedUuid;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Arm width of a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinModel {
    /// Classic 4px arms.
    Default,
    /// Slim 3px arms.
    Slim,
}

/// Texture slot addressed by the upload endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureType {
    /// Player skin.
    Skin,
    /// Player cape.
    Cape,
}

impl std::str::FromStr for TextureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skin" => Ok(TextureType::Skin),
            "cape" => Ok(TextureType::Cape),
            other => Err(format!("unknown texture type: {other}")),
        }
    }
}

/// Metadata attached to a texture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureMetadata {
    /// Skin model; absent means the default model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<SkinModel>,
    /// Any other metadata.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    /// Texture URL.
    pub url: String,
    /// Metadata, omitted when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TextureMetadata>,
}

impl Texture {
    /// Creates a texture without metadata.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            metadata: None,
        }
    }

    /// Creates a skin texture with the slim model.
    pub fn slim(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            metadata: Some(TextureMetadata {
                model: Some(SkinModel::Slim),
                extra: serde_json::Map::new(),
            }),
        }
    }
}

/// The slots of a `textures` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureSet {
    /// Skin.
    #[serde(rename = "SKIN", default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<Texture>,
    /// Cape.
    #[serde(rename = "CAPE", default, skip_serializing_if = "Option::is_none")]
    pub cape: Option<Texture>,
}

/// Decoded value of the `textures` property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Textures {
    /// Generation time, Unix milliseconds.
    pub timestamp: u64,
    /// Owning profile ID.
    pub profile_id: UnsignedUuid,
    /// Owning profile name.
    pub profile_name: String,
    /// Texture slots.
    pub textures: TextureSet,
}

impl Textures {
    /// Creates an empty payload for `profile` stamped with the current time.
    pub fn for_profile(profile: &Profile) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            timestamp,
            profile_id: profile.id.clone(),
            profile_name: profile.name.clone(),
            textures: TextureSet::default(),
        }
    }

    /// Sets the skin.
    pub fn with_skin(mut self, skin: Texture) -> Self {
        self.textures.skin = Some(skin);
        self
    }

    /// Sets the cape.
    pub fn with_cape(mut self, cape: Texture) -> Self {
        self.textures.cape = Some(cape);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn textures_wire_shape() {
        let profile = Profile::new("0123456789abcdef0123456789abcdef", "alice");
        let mut textures = Textures::for_profile(&profile)
            .with_skin(Texture::slim("http://textures.example/skin"));
        textures.timestamp = 1;

        let value = serde_json::to_value(&textures).unwrap();
        assert_eq!(
            value,
            json!({
                "timestamp": 1,
                "profileId": "0123456789abcdef0123456789abcdef",
                "profileName": "alice",
                "textures": {
                    "SKIN": {
                        "url": "http://textures.example/skin",
                        "metadata": {"model": "slim"}
                    }
                }
            })
        );
    }

    #[test]
    fn texture_type_parses_path_segment() {
        assert_eq!("skin".parse::<TextureType>(), Ok(TextureType::Skin));
        assert_eq!("cape".parse::<TextureType>(), Ok(TextureType::Cape));
        assert!("elytra".parse::<TextureType>().is_err());
    }
}
