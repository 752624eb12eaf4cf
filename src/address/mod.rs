//! Resource addressing: turns a request path into what it targets.
//!
//! ## Grammar
//!
//! Segments are counted after the API prefix is stripped:
//!
//! | Path | Collection | Filter | Singular |
//! |---|---|---|---|
//! | `widgets` | `widgets` | all | no |
//! | `widgets/3` | `widgets` | `id == 3` | yes |
//! | `parents/5/widgets` | `widgets` | `parent_id == 5` | no |
//! | `parents/5/widgets/3` | `widgets` | `parent_id == 5 && id == 3` | yes |
//!
//! The parent's foreign-key field is the parent segment with its final
//! character dropped, plus `_id`. `people/1/pets` therefore filters on
//! `peopl_id`, not `person_id`.

mod error;
mod filter;
mod key;
mod resolver;

pub use error::AddressError;
pub use filter::Filter;
pub use key::CollectionKey;
pub use resolver::{resolve, ParentScope, ResourceAddress};
