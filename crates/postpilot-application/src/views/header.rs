//! Header: brand selector and user avatar.

use crate::content_store::ContentSnapshot;
use postpilot_core::user::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderModel {
    pub brands: Vec<BrandOption>,
    pub user_name: Option<String>,
    pub user_initial: Option<char>,
}

pub fn header_view(snapshot: &ContentSnapshot, user: Option<&User>) -> HeaderModel {
    let selected = snapshot.selected_brand_id.as_deref();
    HeaderModel {
        brands: snapshot
            .brands
            .iter()
            .map(|brand| BrandOption {
                id: brand.id.clone(),
                name: brand.name.clone(),
                selected: selected == Some(brand.id.as_str()),
            })
            .collect(),
        user_name: user.map(|user| user.name.clone()),
        user_initial: user.and_then(User::initial),
    }
}
