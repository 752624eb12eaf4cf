use super::{AddressError, CollectionKey, Filter};

/// Parent scoping of a nested address, e.g. `parents/5/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentScope {
    /// Foreign-key field on the child records, e.g. `parent_id`.
    pub field: String,
    /// The parent's id taken from the path.
    pub id: i64,
}

/// What a request path targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress {
    /// Collection whose data file is read or modified.
    pub collection: CollectionKey,
    /// The record id named by the path, if any.
    pub target_id: Option<i64>,
    /// Selection applied to the collection's records.
    pub filter: Filter,
    /// `true` when exactly one record is addressed.
    pub singular: bool,
    /// Set for nested addresses.
    pub parent: Option<ParentScope>,
}

/// Resolve a URL path (without query string) under `prefix`.
pub fn resolve(path: &str, prefix: &str) -> Result<ResourceAddress, AddressError> {
    let rest = path
        .strip_prefix(prefix)
        .ok_or_else(|| AddressError::invalid(path))?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Err(AddressError::invalid(path));
    }

    let segments: Vec<&str> = rest.split('/').collect();
    let invalid = || AddressError::invalid(path);

    match segments.as_slice() {
        [collection] => Ok(ResourceAddress {
            collection: CollectionKey::parse(collection)?,
            target_id: None,
            filter: Filter::All,
            singular: false,
            parent: None,
        }),
        [collection, id] => {
            let id = parse_id(id).ok_or_else(invalid)?;
            Ok(ResourceAddress {
                collection: CollectionKey::parse(collection)?,
                target_id: Some(id),
                filter: Filter::by_id(id),
                singular: true,
                parent: None,
            })
        }
        [parent, parent_id, collection] => {
            let scope = parent_scope(parent, parent_id).ok_or_else(invalid)?;
            Ok(ResourceAddress {
                collection: CollectionKey::parse(collection)?,
                target_id: None,
                filter: Filter::by_field(scope.field.clone(), scope.id),
                singular: false,
                parent: Some(scope),
            })
        }
        [parent, parent_id, collection, id] => {
            let scope = parent_scope(parent, parent_id).ok_or_else(invalid)?;
            let id = parse_id(id).ok_or_else(invalid)?;
            Ok(ResourceAddress {
                collection: CollectionKey::parse(collection)?,
                target_id: Some(id),
                filter: Filter::by_field(scope.field.clone(), scope.id).and(Filter::by_id(id)),
                singular: true,
                parent: Some(scope),
            })
        }
        _ => Err(invalid()),
    }
}

fn parse_id(segment: &str) -> Option<i64> {
    segment.parse().ok()
}

/// The parent segment loses its last character to become singular:
/// `parents` -> `parent_id`, `people` -> `peopl_id`.
fn parent_scope(parent: &str, parent_id: &str) -> Option<ParentScope> {
    // Validated as a collection name so an empty or dotted segment is refused.
    CollectionKey::parse(parent).ok()?;
    let id = parse_id(parent_id)?;

    let mut singular = parent.chars();
    singular.next_back();

    Some(ParentScope {
        field: format!("{}_id", singular.as_str()),
        id,
    })
}
