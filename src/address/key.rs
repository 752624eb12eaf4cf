use std::fmt;

use super::AddressError;

/// A sanitized collection name, safe to turn into a file name.
///
/// The name is always a single normal path component: it never contains a
/// separator, never starts with `.` and is never empty, so joining it onto
/// the data directory cannot escape that directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionKey(String);

impl CollectionKey {
    pub fn parse(name: &str) -> Result<Self, AddressError> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.chars().any(|c| matches!(c, '/' | '\\') || c.is_control());

        if valid {
            Ok(CollectionKey(name.to_string()))
        } else {
            Err(AddressError::invalid(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for this collection under the given codec extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CollectionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
