use crate::category::{Category, DocumentType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    ElectedOfficials,
    ExecutiveBranch,
    MunicipalCommittees,
    Chamber(String),
    Departments,
    Department(String),
    Barangays,
    Barangay(String),
    Legislation,
    Document(DocumentType, String),
    Transparency,
    Financial,
    NotFound(String),
}

/// Pages listed in the navigation sidebar.
pub const NAV_PAGES: &[(&str, &str)] = &[
    ("Elected Officials", "/government/elected-officials"),
    ("Executive Branch", "/government/elected-officials/executive-branch"),
    ("Committees", "/government/elected-officials/municipal-committees"),
    ("Departments", "/government/departments"),
    ("Barangays", "/government/barangays"),
    ("Legislation", "/legislation"),
    ("Financial", "/transparency/financial"),
];

pub fn resolve(path: &str) -> Page {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["government"] | ["government", "elected-officials"] => Page::ElectedOfficials,
        ["government", "elected-officials", "executive-branch"]
        | ["government", "elected-officials", "office-of-the-mayor"]
        | ["government", "elected-officials", "office-of-the-vice-mayor"] => {
            Page::ExecutiveBranch
        }
        ["government", "elected-officials", "municipal-committees"] => Page::MunicipalCommittees,
        ["government", "elected-officials", chamber] => Page::Chamber(chamber.to_string()),
        ["government", "departments"] => Page::Departments,
        ["government", "departments", slug] => Page::Department(slug.to_string()),
        ["government", "barangays"] => Page::Barangays,
        ["government", "barangays", slug] => Page::Barangay(slug.to_string()),
        ["legislation"] => Page::Legislation,
        ["legislation", doc_type, id] => {
            match DocumentType::from_token(doc_type) {
                Some(t) => Page::Document(t, id.to_string()),
                None => Page::NotFound(path.to_string()),
            }
        }
        ["transparency"] => Page::Transparency,
        ["transparency", "financial"] => Page::Financial,
        _ => Page::NotFound(path.to_string()),
    }
}

impl Page {
    pub fn path(&self) -> String {
        match self {
            Self::ElectedOfficials => "/government/elected-officials".to_string(),
            Self::ExecutiveBranch => "/government/elected-officials/executive-branch".to_string(),
            Self::MunicipalCommittees => {
                "/government/elected-officials/municipal-committees".to_string()
            }
            Self::Chamber(slug) => format!("/government/elected-officials/{slug}"),
            Self::Departments => "/government/departments".to_string(),
            Self::Department(slug) => format!("/government/departments/{slug}"),
            Self::Barangays => "/government/barangays".to_string(),
            Self::Barangay(slug) => format!("/government/barangays/{slug}"),
            Self::Legislation => "/legislation".to_string(),
            Self::Document(t, id) => format!("/legislation/{}/{id}", t.token()),
            Self::Transparency => "/transparency".to_string(),
            Self::Financial => "/transparency/financial".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ElectedOfficials => "Elected Officials",
            Self::ExecutiveBranch => "Executive Branch",
            Self::MunicipalCommittees => "Municipal Committees",
            Self::Chamber(_) => "Legislative Chamber",
            Self::Departments => "Municipal Departments",
            Self::Department(_) => "Department Profile",
            Self::Barangays => "Local Barangays",
            Self::Barangay(_) => "Barangay Profile",
            Self::Legislation => "Municipal Legislation",
            Self::Document(..) => "Legislative Document",
            Self::Transparency => "Transparency & Oversight",
            Self::Financial => "Public Funds",
            Self::NotFound(_) => "Page Not Found",
        }
    }

    /// Whether the page hosts a search box.
    pub fn searchable(&self) -> bool {
        matches!(
            self,
            Self::Barangays | Self::Departments | Self::MunicipalCommittees | Self::Legislation
        )
    }

    /// Whether the page also filters by document type.
    pub fn typed(&self) -> bool {
        matches!(self, Self::Legislation)
    }
}
