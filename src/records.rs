use crate::category::{Category, DocumentType, Uncategorized};
use crate::text::{collation_key, strip_gov_prefixes};
use serde::{Deserialize, Serialize};

/// One entry of a directory listing. Records are loaded once and never mutated.
pub trait Record {
    type Kind: Category;

    fn slug(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Fields the free-text search looks at, including nested member names.
    fn search_fields(&self) -> Vec<&str>;

    fn category(&self) -> Option<Self::Kind> {
        None
    }

    /// Text the listing is ordered by, before case and accent folding.
    fn sort_text(&self) -> String {
        self.display_name().to_string()
    }

    fn sort_key(&self) -> String {
        collation_key(&self.sort_text())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn first(&self) -> Option<&str> {
        let first = match self {
            Self::One(s) => Some(s.as_str()),
            Self::Many(v) => v.first().map(String::as_str),
        };
        first.filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barangay {
    pub slug: String,
    pub barangay_name: String,
    #[serde(default)]
    pub officials: Vec<Person>,
    #[serde(default)]
    pub trunkline: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Barangay {
    pub fn punong_barangay(&self) -> Option<&Person> {
        self.officials
            .iter()
            .find(|o| o.role.contains("Punong Barangay"))
    }

    pub fn primary_trunkline(&self) -> Option<&str> {
        self.trunkline.first().map(String::as_str)
    }
}

impl Record for Barangay {
    type Kind = Uncategorized;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.barangay_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.barangay_name.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentHead {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub slug: String,
    pub office_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_head: Option<DepartmentHead>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trunkline: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Department {
    pub fn head_name(&self) -> Option<&str> {
        self.department_head
            .as_ref()
            .and_then(|h| h.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }

    pub fn primary_trunkline(&self) -> Option<&str> {
        self.trunkline.as_ref().and_then(OneOrMany::first)
    }
}

impl Record for Department {
    type Kind = Uncategorized;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.office_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.office_name.as_str()]
    }

    fn sort_text(&self) -> String {
        strip_gov_prefixes(&self.office_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveOfficial {
    pub slug: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(rename = "isElected", default)]
    pub is_elected: bool,
}

impl ExecutiveOfficial {
    pub fn is_mayor(&self) -> bool {
        self.slug.contains("mayor") && !self.slug.contains("vice")
    }
}

impl Record for ExecutiveOfficial {
    type Kind = Uncategorized;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.role.as_str()];
        fields.extend(self.office.as_deref());
        fields
    }
}

/// Elected leaders and the appointed management team, each in input order.
pub fn split_executive(
    officials: &[ExecutiveOfficial],
) -> (Vec<&ExecutiveOfficial>, Vec<&ExecutiveOfficial>) {
    officials.iter().partition(|o| o.is_elected)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Committee {
    pub committee: String,
    #[serde(default)]
    pub chairperson: String,
    #[serde(default)]
    pub members: Vec<Person>,
}

impl Record for Committee {
    type Kind = Uncategorized;

    fn slug(&self) -> &str {
        &self.committee
    }

    fn display_name(&self) -> &str {
        &self.committee
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.committee.as_str(), self.chairperson.as_str()];
        fields.extend(self.members.iter().map(|m| m.name.as_str()));
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChamberMember {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chamber {
    pub slug: String,
    pub chamber: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub officials: Vec<ChamberMember>,
    #[serde(default)]
    pub permanent_committees: Vec<Committee>,
}

impl Chamber {
    pub fn chaired_committees(&self, member_name: &str) -> Vec<&Committee> {
        let wanted = member_name.to_lowercase();
        self.permanent_committees
            .iter()
            .filter(|c| c.chairperson.to_lowercase() == wanted)
            .collect()
    }

    pub fn website_url(&self) -> Option<String> {
        let site = self.website.as_deref()?.trim();
        if site.is_empty() {
            return None;
        }
        if site.starts_with("http") {
            Some(site.to_string())
        } else {
            Some(format!("https://{site}"))
        }
    }
}

impl Record for Chamber {
    type Kind = Uncategorized;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.chamber
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.chamber.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegislativeDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl LegislativeDocument {
    pub fn path(&self) -> String {
        format!("/legislation/{}/{}", self.doc_type.token(), self.id)
    }
}

impl Record for LegislativeDocument {
    type Kind = DocumentType;

    fn slug(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.number.as_str()];
        fields.extend(self.authors.iter().map(String::as_str));
        fields
    }

    fn category(&self) -> Option<DocumentType> {
        Some(self.doc_type)
    }
}
