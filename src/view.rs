use crate::filter_state::FilterState;
use crate::records::Record;
use crate::text::{contains_ignore_case, secondary_key};
use std::cmp::Ordering;

/// Records passing a filter, in display order. Borrowed from the source set.
#[derive(Debug)]
pub struct DerivedView<'a, R> {
    items: Vec<&'a R>,
    total: usize,
}

impl<'a, R: Record> DerivedView<'a, R> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Size of the record set the view was computed from.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a R] {
        &self.items
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.items.iter().copied().map(|r| r.display_name()).collect()
    }

    /// "14 barangays" when nothing is filtered out, "3 of 14 barangays" otherwise.
    pub fn summary(&self, noun: &str) -> String {
        if self.items.len() == self.total {
            format!("{} {noun}", self.total)
        } else {
            format!("{} of {} {noun}", self.items.len(), self.total)
        }
    }
}

impl<'a, R> IntoIterator for DerivedView<'a, R> {
    type Item = &'a R;
    type IntoIter = std::vec::IntoIter<&'a R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

pub fn matches<R: Record>(record: &R, state: &FilterState<R::Kind>) -> bool {
    if !state.category.admits(record.category()) {
        return false;
    }
    if state.search_text.is_empty() {
        return true;
    }
    record
        .search_fields()
        .into_iter()
        .any(|field| contains_ignore_case(field, &state.search_text))
}

/// Filters and sorts `records`. Sorting is stable, so records with equal keys
/// keep their input order.
pub fn compute<'a, R: Record>(
    records: &'a [R],
    state: &FilterState<R::Kind>,
) -> DerivedView<'a, R> {
    let mut keyed: Vec<(String, String, &'a R)> = records
        .iter()
        .filter(|r| matches(*r, state))
        .map(|r| {
            (r.sort_key(), secondary_key(&r.sort_text()), r)
        })
        .collect();

    keyed.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });

    DerivedView {
        items: keyed.into_iter().map(|(_, _, r)| r).collect(),
        total: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CategoryFilter, DocumentType};
    use crate::records::{Barangay, Committee, Department, LegislativeDocument};

    fn barangays(names: &[&str]) -> Vec<Barangay> {
        names
            .iter()
            .map(|name| Barangay {
                slug: name.to_lowercase().replace(' ', "-"),
                barangay_name: name.to_string(),
                officials: Vec::new(),
                trunkline: Vec::new(),
                address: None,
                email: None,
            })
            .collect()
    }

    fn department(name: &str) -> Department {
        serde_json::from_value(serde_json::json!({"slug": name, "office_name": name}))
            .expect("department")
    }

    fn document(id: &str, doc_type: DocumentType, title: &str) -> LegislativeDocument {
        LegislativeDocument {
            id: id.to_string(),
            doc_type,
            number: id.to_uppercase(),
            title: title.to_string(),
            date: None,
            authors: vec!["Hon. Ana Reyes".to_string()],
            session_id: None,
        }
    }

    #[test]
    fn default_filter_sorts_alphabetically() {
        let records = barangays(&["Batong Malake", "Anos", "Bambang"]);
        let view = compute(&records, &FilterState::default());
        assert_eq!(view.names(), ["Anos", "Bambang", "Batong Malake"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = barangays(&["Batong Malake", "Anos", "Bambang"]);
        let view = compute(&records, &FilterState::search("bam"));
        assert_eq!(view.names(), ["Bambang"]);
        assert_eq!(view.summary("records"), "1 of 3 records");
        let all = compute(&records, &FilterState::default());
        assert_eq!(all.summary("barangays"), "3 barangays");
    }

    #[test]
    fn whitespace_in_search_is_matched_literally() {
        let records = barangays(&["Batong Malake", "Anos", "Bambang"]);
        assert!(compute(&records, &FilterState::search("bam ")).is_empty());
        assert!(compute(&records, &FilterState::search("   ")).is_empty());
        assert_eq!(
            compute(&records, &FilterState::search("g m")).names(),
            ["Batong Malake"]
        );
    }

    #[test]
    fn no_match_and_empty_input_give_empty_view() {
        let records = barangays(&["Batong Malake", "Anos", "Bambang"]);
        assert!(compute(&records, &FilterState::search("zzz")).is_empty());
        let none: Vec<Barangay> = Vec::new();
        let view = compute(&none, &FilterState::default());
        assert!(view.is_empty());
        assert_eq!(view.total(), 0);
    }

    #[test]
    fn department_prefixes_do_not_affect_order() {
        let records = vec![
            department("MUNICIPAL TREASURER'S OFFICE"),
            department("DEPARTMENT OF AGRICULTURE"),
        ];
        let view = compute(&records, &FilterState::default());
        assert_eq!(
            view.names(),
            ["DEPARTMENT OF AGRICULTURE", "MUNICIPAL TREASURER'S OFFICE"]
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let records = vec![
            department("MUNICIPAL HEALTH OFFICE"),
            department("LOCAL HEALTH OFFICE"),
            department("DEPARTMENT OF HEALTH OFFICE"),
        ];
        let view = compute(&records, &FilterState::default());
        let slugs: Vec<&str> = view.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(
            slugs,
            [
                "MUNICIPAL HEALTH OFFICE",
                "LOCAL HEALTH OFFICE",
                "DEPARTMENT OF HEALTH OFFICE"
            ]
        );
    }

    #[test]
    fn accented_names_sort_with_their_base_letters() {
        let records = barangays(&["Bayog", "Baños Norte", "Bambang"]);
        let view = compute(&records, &FilterState::default());
        assert_eq!(view.names(), ["Bambang", "Baños Norte", "Bayog"]);
    }

    #[test]
    fn category_and_search_combine() {
        let records = vec![
            document("ord-1", DocumentType::Ordinance, "Traffic Code"),
            document("res-1", DocumentType::Resolution, "Traffic Study Request"),
            document("ord-2", DocumentType::Ordinance, "Revenue Code"),
        ];
        let state = FilterState {
            search_text: "traffic".to_string(),
            category: CategoryFilter::Only(DocumentType::Ordinance),
        };
        assert_eq!(compute(&records, &state).names(), ["Traffic Code"]);

        let by_author = FilterState::<DocumentType>::search("reyes");
        assert_eq!(compute(&records, &by_author).len(), 3);
        let by_number = FilterState::<DocumentType>::search("RES-1");
        assert_eq!(compute(&records, &by_number).names(), ["Traffic Study Request"]);
    }

    #[test]
    fn committee_search_reaches_nested_members() {
        let committees: Vec<Committee> = serde_json::from_str(
            r#"[{"committee":"HEALTH","chairperson":"ANA REYES","members":[{"name":"BEN CRUZ"}]},
                {"committee":"FINANCE","chairperson":"CARLO LIM","members":[{"name":"DINA GO"}]}]"#,
        )
        .expect("committees");
        let view = compute(&committees, &FilterState::search("cruz"));
        assert_eq!(view.names(), ["HEALTH"]);
    }

    #[test]
    fn compute_is_idempotent_and_deterministic() {
        let records = barangays(&["Timugan", "Anos", "Tadlac", "Bayog", "Bambang"]);
        let state = FilterState::search("a");
        let first = compute(&records, &state);
        let again = compute(&records, &state);
        assert_eq!(first.names(), again.names());

        let owned: Vec<Barangay> = first.iter().cloned().collect();
        let reapplied = compute(&owned, &state);
        assert_eq!(reapplied.names(), first.names());
        assert!(first
            .iter()
            .all(|b| records.iter().any(|r| std::ptr::eq(r, b))));
    }
}
