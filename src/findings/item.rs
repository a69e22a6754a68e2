use std::fmt;

/// The kind of contact signal a finding represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Email,
    Phone,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding: a normalized contact value and where it was first seen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingItem {
    pub kind: ItemKind,
    pub value: String,
    pub source_url: Option<String>,
}

impl TrackingItem {
    pub fn new(kind: ItemKind, value: impl Into<String>, source_url: Option<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            source_url,
        }
    }

    pub fn email(value: impl Into<String>, source_url: &str) -> Self {
        Self::new(ItemKind::Email, value, Some(source_url.to_string()))
    }

    pub fn phone(value: impl Into<String>, source_url: &str) -> Self {
        Self::new(ItemKind::Phone, value, Some(source_url.to_string()))
    }

    /// Dedup key of the finding; provenance is not part of it
    pub fn key(&self) -> (ItemKind, &str) {
        (self.kind, self.value.as_str())
    }
}
