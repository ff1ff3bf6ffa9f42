use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of string tokens that can narrow a listing.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn token(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_token(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.token() == raw)
    }
}

pub const ALL_TOKEN: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<C> {
    All,
    Only(C),
}

impl<C> Default for CategoryFilter<C> {
    fn default() -> Self {
        Self::All
    }
}

impl<C: Category> CategoryFilter<C> {
    /// Absent, empty and `all` map to `All`; unknown tokens fall back to `All`
    /// with a warning instead of failing.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::All;
        };
        if raw == ALL_TOKEN {
            return Self::All;
        }
        match C::from_token(raw) {
            Some(category) => Self::Only(category),
            None => {
                tracing::warn!(token = raw, "unknown category token, showing all");
                Self::All
            }
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::All => ALL_TOKEN,
            Self::Only(c) => c.token(),
        }
    }

    pub fn is_default(self) -> bool {
        matches!(self, Self::All)
    }

    pub fn admits(self, category: Option<C>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted),
        }
    }

    /// `All` followed by every declared member, in declaration order.
    pub fn choices() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(C::ALL.iter().copied().map(Self::Only))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Documents",
            Self::Only(c) => c.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Ordinance,
    Resolution,
    ExecutiveOrder,
}

impl Category for DocumentType {
    const ALL: &'static [Self] = &[Self::Ordinance, Self::Resolution, Self::ExecutiveOrder];

    fn token(self) -> &'static str {
        match self {
            Self::Ordinance => "ordinance",
            Self::Resolution => "resolution",
            Self::ExecutiveOrder => "executive_order",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ordinance => "Ordinances",
            Self::Resolution => "Resolutions",
            Self::ExecutiveOrder => "Executive Orders",
        }
    }
}

/// Record kinds that carry no category at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uncategorized {}

impl Category for Uncategorized {
    const ALL: &'static [Self] = &[];

    fn token(self) -> &'static str {
        match self {}
    }

    fn label(self) -> &'static str {
        match self {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficeIcon {
    Building,
    Agriculture,
    Treasury,
    Health,
    Engineering,
    SocialWelfare,
    Planning,
    DisasterRisk,
    Environment,
    CivilRegistry,
}

impl OfficeIcon {
    pub fn for_slug(slug: &str) -> Self {
        match slug {
            "agriculture" | "municipal-agriculture-office" => Self::Agriculture,
            "treasury" | "municipal-treasurers-office" | "assessor" => Self::Treasury,
            "health" | "municipal-health-office" => Self::Health,
            "engineering" | "municipal-engineering-office" => Self::Engineering,
            "social-welfare" | "mswdo" => Self::SocialWelfare,
            "planning" | "mpdo" => Self::Planning,
            "mdrrmo" | "disaster-risk-reduction" => Self::DisasterRisk,
            "menro" | "environment" => Self::Environment,
            "civil-registrar" | "municipal-civil-registrar" => Self::CivilRegistry,
            _ => Self::Building,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Building => "🏢",
            Self::Agriculture => "🌾",
            Self::Treasury => "💰",
            Self::Health => "⚕",
            Self::Engineering => "🛠",
            Self::SocialWelfare => "🤝",
            Self::Planning => "📐",
            Self::DisasterRisk => "⚠",
            Self::Environment => "🌳",
            Self::CivilRegistry => "📜",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_token_parses_to_member() {
        let f = CategoryFilter::<DocumentType>::parse_lenient(Some("executive_order"));
        assert_eq!(f, CategoryFilter::Only(DocumentType::ExecutiveOrder));
        assert_eq!(f.token(), "executive_order");
    }

    #[test]
    fn unknown_or_missing_token_falls_back_to_all() {
        for raw in [None, Some(""), Some("all"), Some("budget"), Some("Ordinance")] {
            assert_eq!(
                CategoryFilter::<DocumentType>::parse_lenient(raw),
                CategoryFilter::All,
                "{raw:?}"
            );
        }
    }

    #[test]
    fn uncategorized_only_accepts_all() {
        assert!(CategoryFilter::<Uncategorized>::choices().len() == 1);
        assert_eq!(
            CategoryFilter::<Uncategorized>::parse_lenient(Some("ordinance")),
            CategoryFilter::All
        );
    }

    #[test]
    fn all_admits_records_without_category() {
        assert!(CategoryFilter::<DocumentType>::All.admits(None));
        assert!(!CategoryFilter::Only(DocumentType::Resolution).admits(None));
        assert!(!CategoryFilter::Only(DocumentType::Resolution).admits(Some(DocumentType::Ordinance)));
    }

    #[test]
    fn office_icon_lookup_has_default() {
        assert_eq!(OfficeIcon::for_slug("mdrrmo"), OfficeIcon::DisasterRisk);
        assert_eq!(OfficeIcon::for_slug("no-such-office"), OfficeIcon::Building);
    }
}
