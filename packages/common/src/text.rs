use serde::{Deserialize, Serialize};

/// A bilingual (Arabic/English) text value.
///
/// Both sides are always populated: construction fills a blank side from the
/// other, so lookups never need a fallback chain of their own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LocalizedText {
    pub ar: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
        }
    }

    /// Build from optional form input, trimming whitespace and filling each
    /// blank side from the other.
    ///
    /// Returns `None` when both sides are blank; callers decide whether that
    /// is a validation error (required pair) or an absent optional field.
    pub fn from_parts(ar: Option<&str>, en: Option<&str>) -> Option<Self> {
        let ar = ar.map(str::trim).filter(|s| !s.is_empty());
        let en = en.map(str::trim).filter(|s| !s.is_empty());
        match (ar, en) {
            (None, None) => None,
            (ar, en) => {
                let a = ar.or(en).unwrap_or_default();
                let e = en.or(ar).unwrap_or_default();
                Some(Self::new(a, e))
            }
        }
    }
}
