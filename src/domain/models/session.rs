#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Map;
use serde_json::Value;

// Token segments are URL-safe base64 and usually unpadded. They are mapped to
// the standard alphabet before decoding, so padding has to be optional.
const JWT_SEGMENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Claims decoded from the identity provider's signed credential.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl Profile {
    /// Decodes the payload segment of a JWT without verifying its signature.
    /// Anything malformed yields `None`.
    pub fn from_jwt(token: &str) -> Option<Profile> {
        let payload = token.split('.').nth(1)?;
        let normalized = payload.replace('-', "+").replace('_', "/");
        let decoded = JWT_SEGMENT.decode(normalized).ok()?;

        return serde_json::from_slice::<Profile>(&decoded).ok();
    }

    pub fn initial(&self) -> String {
        return self
            .name
            .as_deref()
            .and_then(|name| return name.trim().chars().next())
            .map(|initial| return initial.to_uppercase().to_string())
            .unwrap_or_else(|| return "U".to_string());
    }
}

/// The signed-in session, persisted and cleared as a single unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub credential: Option<String>,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        return self.credential.is_none() && self.profile.is_none() && self.user_id.is_none();
    }

    /// Treats empty strings the same as absent fields.
    pub fn normalized(self) -> Session {
        return Session {
            credential: self.credential.filter(|credential| return !credential.is_empty()),
            profile: self.profile,
            user_id: self.user_id.filter(|user_id| return !user_id.is_empty()),
        };
    }
}
