//! Content domain module: brands and the posts scoped to them.
//!
//! # Module Structure
//!
//! - `brand`: Brand profile, draft and partial update
//! - `ids`: string-or-number id deserialization
//! - `post`: Post, platform and status enumerations, partial update

mod brand;
pub(crate) mod ids;
mod post;

pub use brand::{Brand, BrandDraft, BrandPatch};
pub use post::{Platform, Post, PostPatch, PostStatus};
