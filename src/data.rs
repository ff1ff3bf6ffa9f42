use crate::budget::BudgetYear;
use crate::records::{
    Barangay, Chamber, Committee, Department, ExecutiveOfficial, LegislativeDocument, Record,
};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const SITTING_COUNCIL_SLUG: &str = "12th-sangguniang-bayan";

/// Every record set the site shows, loaded once from a data directory.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub barangays: Vec<Barangay>,
    pub departments: Vec<Department>,
    pub executive: Vec<ExecutiveOfficial>,
    pub chambers: Vec<Chamber>,
    pub legislation: Vec<LegislativeDocument>,
    pub budget: Vec<BudgetYear>,
    pub source: Option<PathBuf>,
}

fn load_list<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>> {
    let path = dir.join(file_name);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "data file missing, using empty set");
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let items: Vec<T> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = items.len(), "loaded data file");
    Ok(items)
}

impl Directory {
    pub fn load(dir: &Path) -> Result<Self> {
        let dir = dir
            .canonicalize()
            .with_context(|| format!("failed to open data directory {}", dir.display()))?;
        if !dir.is_dir() {
            anyhow::bail!("data path {} is not a directory", dir.display());
        }

        let mut budget: Vec<BudgetYear> = load_list(&dir, "budget.json")?;
        budget.sort_by_key(|y| y.year);

        Ok(Self {
            barangays: load_list(&dir, "barangays.json")?,
            departments: load_list(&dir, "departments.json")?,
            executive: load_list(&dir, "executive.json")?,
            chambers: load_list(&dir, "legislative.json")?,
            legislation: load_list(&dir, "legislation.json")?,
            budget,
            source: Some(dir),
        })
    }

    pub fn barangay(&self, slug: &str) -> Option<&Barangay> {
        find_by_slug(&self.barangays, slug)
    }

    pub fn department(&self, slug: &str) -> Option<&Department> {
        find_by_slug(&self.departments, slug)
    }

    pub fn chamber(&self, slug: &str) -> Option<&Chamber> {
        find_by_slug(&self.chambers, slug)
    }

    pub fn document(&self, id: &str) -> Option<&LegislativeDocument> {
        find_by_slug(&self.legislation, id)
    }

    /// Permanent committees of the sitting council, or of the first chamber that
    /// lists any when the sitting council is absent.
    pub fn committees(&self) -> &[Committee] {
        self.chamber(SITTING_COUNCIL_SLUG)
            .filter(|c| !c.permanent_committees.is_empty())
            .or_else(|| {
                self.chambers
                    .iter()
                    .find(|c| !c.permanent_committees.is_empty())
            })
            .map(|c| c.permanent_committees.as_slice())
            .unwrap_or_default()
    }

    /// Latest fiscal year and the one before it, when present.
    pub fn latest_budget(&self) -> Option<(&BudgetYear, Option<&BudgetYear>)> {
        let (latest, earlier) = self.budget.split_last()?;
        Some((latest, earlier.last()))
    }
}

fn find_by_slug<'a, R: Record>(records: &'a [R], slug: &str) -> Option<&'a R> {
    records.iter().find(|r| r.slug() == slug)
}
