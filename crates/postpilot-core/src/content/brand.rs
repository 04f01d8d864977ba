//! Brand domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::string_or_number;

/// A tenant-like profile that scopes which posts belong together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub name: String,
    pub product_description: String,
    pub brand_voice: String,
    pub created_at: DateTime<Utc>,
}

/// The user-entered part of a brand.
///
/// The content store turns a draft into a [`Brand`] by assigning an id,
/// owner and creation timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDraft {
    pub name: String,
    pub product_description: String,
    pub brand_voice: String,
}

/// Partial update of a brand; only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_voice: Option<String>,
}

impl Brand {
    /// Builds a brand from a draft with a freshly generated `brand_<uuid>` id.
    pub fn from_draft(user_id: impl Into<String>, draft: BrandDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("brand_{}", Uuid::new_v4().simple()),
            user_id: user_id.into(),
            name: draft.name,
            product_description: draft.product_description,
            brand_voice: draft.brand_voice,
            created_at: now,
        }
    }

    /// Applies every field present in `patch`.
    pub fn apply(&mut self, patch: BrandPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(product_description) = patch.product_description {
            self.product_description = product_description;
        }
        if let Some(brand_voice) = patch.brand_voice {
            self.brand_voice = brand_voice;
        }
    }
}

impl From<BrandDraft> for BrandPatch {
    fn from(draft: BrandDraft) -> Self {
        Self {
            name: Some(draft.name),
            product_description: Some(draft.product_description),
            brand_voice: Some(draft.brand_voice),
        }
    }
}
