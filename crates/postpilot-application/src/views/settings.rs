//! Settings: brand list and brand form.

use crate::content_store::ContentSnapshot;
use postpilot_core::content::{Brand, BrandDraft};
use postpilot_core::{PostPilotError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct BrandRow {
    pub brand: Brand,
    pub selected: bool,
}

pub fn settings_view(snapshot: &ContentSnapshot) -> Vec<BrandRow> {
    snapshot
        .brands
        .iter()
        .map(|brand| BrandRow {
            brand: brand.clone(),
            selected: snapshot.selected_brand_id.as_deref() == Some(brand.id.as_str()),
        })
        .collect()
}

/// Create/edit form for a brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandForm {
    pub name: String,
    pub product_description: String,
    pub brand_voice: String,
}

impl BrandForm {
    /// Pre-fills the form for editing.
    pub fn from_brand(brand: &Brand) -> Self {
        Self {
            name: brand.name.clone(),
            product_description: brand.product_description.clone(),
            brand_voice: brand.brand_voice.clone(),
        }
    }

    /// Checks that every field is filled in and returns the trimmed draft.
    pub fn validate(&self) -> Result<BrandDraft> {
        let missing: Vec<&str> = [
            ("brand name", &self.name),
            ("product description", &self.product_description),
            ("brand voice", &self.brand_voice),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(PostPilotError::validation(format!(
                "Please fill in: {}.",
                missing.join(", ")
            )));
        }

        Ok(BrandDraft {
            name: self.name.trim().to_string(),
            product_description: self.product_description.trim().to_string(),
            brand_voice: self.brand_voice.trim().to_string(),
        })
    }
}
