use crate::budget::{format_peso, format_peso_adaptive, summary_cards, BudgetYear};
use crate::category::{Category, CategoryFilter, DocumentType, OfficeIcon, Uncategorized};
use crate::data::Directory;
use crate::filter_state::{FilterState, FilterStateManager};
use crate::history::Location;
use crate::records::{
    split_executive, Barangay, Chamber, Committee, Department, ExecutiveOfficial,
    LegislativeDocument,
};
use crate::route::{resolve, Page};
use crate::text::{format_gov_name, to_title_case, GovKind};
use crate::view::{compute, DerivedView};
use serde_json::{json, Value};

/// Everything a page shows, derived from the directory and the location.
#[derive(Debug)]
pub enum PageData<'a> {
    ElectedOfficials {
        elected: Vec<&'a ExecutiveOfficial>,
        chambers: &'a [Chamber],
    },
    ExecutiveBranch {
        elected: Vec<&'a ExecutiveOfficial>,
        management: Vec<&'a ExecutiveOfficial>,
    },
    Committees(DerivedView<'a, Committee>),
    Chamber(&'a Chamber),
    Departments(DerivedView<'a, Department>),
    Department(&'a Department),
    Barangays(DerivedView<'a, Barangay>),
    Barangay(&'a Barangay),
    Legislation {
        view: DerivedView<'a, LegislativeDocument>,
        category: CategoryFilter<DocumentType>,
    },
    Document(&'a LegislativeDocument),
    Transparency,
    Financial(Option<(&'a BudgetYear, Option<&'a BudgetYear>)>),
    NotFound(String),
}

pub fn build_page<'a>(dir: &'a Directory, location: &Location) -> (Page, PageData<'a>) {
    let page = resolve(&location.path);
    let plain = FilterStateManager::<Uncategorized>::new();
    let data = match &page {
        Page::ElectedOfficials => PageData::ElectedOfficials {
            elected: split_executive(&dir.executive).0,
            chambers: &dir.chambers,
        },
        Page::ExecutiveBranch => {
            let (elected, management) = split_executive(&dir.executive);
            PageData::ExecutiveBranch {
                elected,
                management,
            }
        }
        Page::MunicipalCommittees => {
            PageData::Committees(compute(dir.committees(), &plain.get_state(location)))
        }
        Page::Chamber(slug) => dir
            .chamber(slug)
            .map(PageData::Chamber)
            .unwrap_or_else(|| PageData::NotFound(format!("Chamber not found: {slug}"))),
        Page::Departments => {
            PageData::Departments(compute(&dir.departments, &plain.get_state(location)))
        }
        Page::Department(slug) => dir
            .department(slug)
            .map(PageData::Department)
            .unwrap_or_else(|| PageData::NotFound(format!("Department not found: {slug}"))),
        Page::Barangays => PageData::Barangays(compute(&dir.barangays, &plain.get_state(location))),
        Page::Barangay(slug) => dir
            .barangay(slug)
            .map(PageData::Barangay)
            .unwrap_or_else(|| PageData::NotFound(format!("Barangay not found: {slug}"))),
        Page::Legislation => {
            let state = FilterStateManager::<DocumentType>::new().get_state(location);
            PageData::Legislation {
                view: compute(&dir.legislation, &state),
                category: state.category,
            }
        }
        Page::Document(doc_type, id) => dir
            .document(id)
            .filter(|d| d.doc_type == *doc_type)
            .map(PageData::Document)
            .unwrap_or_else(|| PageData::NotFound(format!("Document not found: {id}"))),
        Page::Transparency => PageData::Transparency,
        Page::Financial => PageData::Financial(dir.latest_budget()),
        Page::NotFound(path) => PageData::NotFound(format!("No page at {path}")),
    };
    (page, data)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub title: String,
    pub summary: String,
    pub lines: Vec<String>,
}

const EMPTY_STATE: &str = "No results found. Try a different search term.";

fn clip(lines: Vec<String>, limit: usize) -> Vec<String> {
    if lines.len() <= limit {
        return lines;
    }
    let total = lines.len();
    let mut out: Vec<String> = lines.into_iter().take(limit).collect();
    out.push(format!("... ({} more)", total - limit));
    out
}

fn or_empty(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![EMPTY_STATE.to_string()]
    } else {
        lines
    }
}

fn official_line(o: &ExecutiveOfficial) -> String {
    let mut line = format!("Hon. {} | {}", to_title_case(&o.name), o.role);
    for contact in [o.email.as_deref(), o.phone.as_deref()].into_iter().flatten() {
        line.push_str(" | ");
        line.push_str(contact);
    }
    line
}

pub fn render_text(page: &Page, data: &PageData<'_>, limit: usize) -> Rendered {
    let limit = limit.max(1);
    let (summary, lines) = match data {
        PageData::ElectedOfficials { elected, chambers } => {
            let mut lines: Vec<String> = elected.iter().map(|o| official_line(o)).collect();
            lines.extend(chambers.iter().map(|c| {
                format!(
                    "{} | {} members | {}",
                    c.chamber,
                    c.officials.len(),
                    Page::Chamber(c.slug.clone()).path()
                )
            }));
            (
                "Executive leadership and legislative chambers".to_string(),
                or_empty(lines),
            )
        }
        PageData::ExecutiveBranch {
            elected,
            management,
        } => {
            let mut lines = vec!["Elected Leadership".to_string()];
            lines.extend(elected.iter().map(|o| {
                let marker = if o.is_mayor() { "*" } else { "-" };
                format!("{marker} {}", official_line(o))
            }));
            if !management.is_empty() {
                lines.push("Municipal Management".to_string());
                lines.extend(management.iter().map(|o| format!("- {}", official_line(o))));
            }
            (
                format!("{} officials", elected.len() + management.len()),
                lines,
            )
        }
        PageData::Committees(view) => {
            let lines = view
                .iter()
                .map(|c| {
                    format!(
                        "{} | Chair: {} | {} members",
                        to_title_case(&c.committee),
                        to_title_case(&c.chairperson),
                        c.members.len()
                    )
                })
                .collect();
            (view.summary("committees"), or_empty(clip(lines, limit)))
        }
        PageData::Chamber(chamber) => {
            let mut lines = Vec::new();
            lines.extend(chamber.address.iter().map(|a| format!("Office Location: {a}")));
            lines.extend(chamber.website_url().map(|w| format!("Official Portal: {w}")));
            for member in &chamber.officials {
                let chaired: Vec<String> = chamber
                    .chaired_committees(&member.name)
                    .iter()
                    .map(|c| to_title_case(&c.committee))
                    .collect();
                let mut line = format!("{} | {}", member.role, to_title_case(&member.name));
                if !chaired.is_empty() {
                    line.push_str(&format!(" | Chair: {}", chaired.join(", ")));
                }
                lines.push(line);
            }
            (chamber.chamber.clone(), lines)
        }
        PageData::Departments(view) => {
            let lines = view
                .iter()
                .map(|d| {
                    let mut line = format!(
                        "{} {}",
                        OfficeIcon::for_slug(&d.slug).glyph(),
                        to_title_case(&format_gov_name(&d.office_name, GovKind::Department))
                    );
                    if let Some(head) = d.head_name() {
                        line.push_str(&format!(" | {}", to_title_case(head)));
                    }
                    if let Some(phone) = d.primary_trunkline() {
                        line.push_str(&format!(" | {phone}"));
                    }
                    line
                })
                .collect();
            (view.summary("active offices"), or_empty(clip(lines, limit)))
        }
        PageData::Department(d) => {
            let mut lines = vec![d.office_name.clone()];
            lines.extend(d.head_name().map(|h| format!("Department Head: {}", to_title_case(h))));
            lines.extend(d.primary_trunkline().map(|t| format!("Trunkline: {t}")));
            lines.extend(d.email.iter().map(|e| format!("Email: {e}")));
            lines.extend(d.address.iter().map(|a| format!("Address: {a}")));
            lines.extend(d.website.iter().map(|w| format!("Website: {w}")));
            (
                to_title_case(&format_gov_name(&d.office_name, GovKind::Department)),
                lines,
            )
        }
        PageData::Barangays(view) => {
            let lines = view
                .iter()
                .map(|b| {
                    let punong = b
                        .punong_barangay()
                        .map(|p| to_title_case(&p.name))
                        .unwrap_or_else(|| "Awaiting Data".to_string());
                    let phone = b.primary_trunkline().unwrap_or("No contact listed");
                    format!(
                        "{} | Punong Barangay: {punong} | {phone}",
                        to_title_case(&format_gov_name(&b.barangay_name, GovKind::Barangay))
                    )
                })
                .collect();
            (
                view.summary("component barangays"),
                or_empty(clip(lines, limit)),
            )
        }
        PageData::Barangay(b) => {
            let mut lines: Vec<String> = b
                .officials
                .iter()
                .map(|o| format!("{} | {}", o.role, to_title_case(&o.name)))
                .collect();
            lines.extend(b.trunkline.iter().map(|t| format!("Trunkline: {t}")));
            lines.extend(b.email.iter().map(|e| format!("Email: {e}")));
            (
                to_title_case(&format_gov_name(&b.barangay_name, GovKind::Barangay)),
                lines,
            )
        }
        PageData::Legislation { view, category } => {
            let lines = view
                .iter()
                .map(|d| {
                    format!(
                        "[{}] {} | {}{}",
                        d.doc_type.token(),
                        d.number,
                        d.title,
                        d.date.as_deref().map(|x| format!(" | {x}")).unwrap_or_default()
                    )
                })
                .collect();
            (
                format!("{} | {}", category.label(), view.summary("documents")),
                or_empty(clip(lines, limit)),
            )
        }
        PageData::Document(d) => {
            let mut lines = vec![format!("{} {}", d.doc_type.label(), d.number), d.title.clone()];
            lines.extend(d.date.iter().map(|x| format!("Date: {x}")));
            if !d.authors.is_empty() {
                lines.push(format!("Authors: {}", d.authors.join(", ")));
            }
            (d.number.clone(), lines)
        }
        PageData::Transparency => (
            "Public funds, public works and procurement".to_string(),
            vec![
                format!("Public Funds | {}", Page::Financial.path()),
                "Public Works | https://bisto.ph/projects".to_string(),
                "Procurement | https://transparency.bettergov.ph".to_string(),
            ],
        ),
        PageData::Financial(None) => (
            "No budget data".to_string(),
            vec![EMPTY_STATE.to_string()],
        ),
        PageData::Financial(Some((current, previous))) => {
            let lines = summary_cards(current, *previous)
                .into_iter()
                .map(|card| {
                    let trend = card
                        .yoy
                        .map(|y| {
                            let arrow = if y.is_positive() { "▲" } else { "▼" };
                            format!(" | {arrow} {:.1}% vs last year", y.pct.abs())
                        })
                        .unwrap_or_default();
                    format!(
                        "{}: {} ({}){trend}",
                        card.title,
                        format_peso_adaptive(card.value, 2).full_string,
                        format_peso(card.value, 2)
                    )
                })
                .collect();
            (format!("Fiscal year {}", current.year), lines)
        }
        PageData::NotFound(message) => (message.clone(), Vec::new()),
    };

    Rendered {
        title: page.title().to_string(),
        summary,
        lines,
    }
}

pub fn render_page(dir: &Directory, location: &Location, limit: usize) -> Rendered {
    let (page, data) = build_page(dir, location);
    render_text(&page, &data, limit)
}

/// Machine-readable form of a page: the derived records, in display order.
pub fn render_json(page: &Page, data: &PageData<'_>, state: &FilterState<DocumentType>) -> Value {
    let items = match data {
        PageData::ElectedOfficials { elected, chambers } => {
            json!({ "elected": elected, "chambers": chambers })
        }
        PageData::ExecutiveBranch {
            elected,
            management,
        } => json!({ "elected": elected, "management": management }),
        PageData::Committees(view) => json!(view.as_slice()),
        PageData::Chamber(c) => json!(c),
        PageData::Departments(view) => json!(view.as_slice()),
        PageData::Department(d) => json!(d),
        PageData::Barangays(view) => json!(view.as_slice()),
        PageData::Barangay(b) => json!(b),
        PageData::Legislation { view, .. } => json!(view.as_slice()),
        PageData::Document(d) => json!(d),
        PageData::Transparency => Value::Null,
        PageData::Financial(budget) => json!(budget.map(|(current, _)| current)),
        PageData::NotFound(message) => json!({ "error": message }),
    };
    json!({
        "page": page.path(),
        "title": page.title(),
        "search": state.search_text,
        "type": page.typed().then(|| state.category.token()),
        "items": items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Directory {
        let barangays: Vec<Barangay> = serde_json::from_str(
            r#"[{"slug":"batong-malake","barangay_name":"BATONG MALAKE","trunkline":["536-0001"],
                 "officials":[{"name":"JOSE RIZAL","role":"Punong Barangay"}]},
                {"slug":"anos","barangay_name":"ANOS"},
                {"slug":"bambang","barangay_name":"BAMBANG"}]"#,
        )
        .expect("barangays");
        let legislation: Vec<LegislativeDocument> = serde_json::from_str(
            r#"[{"id":"ord-1","type":"ordinance","number":"Ord. 2024-01","title":"Traffic Code"},
                {"id":"res-7","type":"resolution","number":"Res. 2024-07","title":"Tree Planting Drive"}]"#,
        )
        .expect("legislation");
        Directory {
            barangays,
            legislation,
            ..Directory::default()
        }
    }

    fn render(href: &str) -> Rendered {
        render_page(&directory(), &Location::parse(href), 50)
    }

    #[test]
    fn barangay_listing_is_sorted_and_titled() {
        let out = render("/government/barangays");
        assert_eq!(out.title, "Local Barangays");
        assert_eq!(out.summary, "3 component barangays");
        assert!(out.lines[0].starts_with("Anos"));
        assert!(out.lines[1].starts_with("Bambang"));
        assert!(out.lines[2].starts_with("Batong Malake | Punong Barangay: Jose Rizal | 536-0001"));
    }

    #[test]
    fn search_param_narrows_listing() {
        let out = render("/government/barangays?search=bam");
        assert_eq!(out.summary, "1 of 3 component barangays");
        assert_eq!(out.lines.len(), 1);
    }

    #[test]
    fn no_match_renders_empty_state() {
        let out = render("/government/barangays?search=zzz");
        assert_eq!(out.lines, [EMPTY_STATE]);
    }

    #[test]
    fn legislation_respects_type_param() {
        let out = render("/legislation?type=resolution");
        assert_eq!(out.summary, "Resolutions | 1 of 2 documents");
        assert!(out.lines[0].contains("Tree Planting Drive"));

        let fallback = render("/legislation?type=memo");
        assert_eq!(fallback.summary, "All Documents | 2 documents");
    }

    #[test]
    fn limit_clips_with_remainder_line() {
        let dir = directory();
        let (page, data) = build_page(&dir, &Location::parse("/government/barangays"));
        let out = render_text(&page, &data, 2);
        assert_eq!(out.lines.len(), 3);
        assert_eq!(out.lines[2], "... (1 more)");
    }

    #[test]
    fn unknown_detail_is_not_found() {
        let dir = directory();
        let (_, data) = build_page(&dir, &Location::parse("/government/barangays/nowhere"));
        assert!(matches!(data, PageData::NotFound(ref m) if m.contains("nowhere")));
    }

    #[test]
    fn document_path_must_carry_its_own_type() {
        let dir = directory();
        let (_, data) = build_page(&dir, &Location::parse("/legislation/ordinance/ord-1"));
        assert!(matches!(data, PageData::Document(d) if d.id == "ord-1"));

        let (_, data) = build_page(&dir, &Location::parse("/legislation/resolution/ord-1"));
        assert!(matches!(data, PageData::NotFound(ref m) if m.contains("ord-1")));
    }

    #[test]
    fn json_lists_derived_records_in_order() {
        let dir = directory();
        let location = Location::parse("/legislation?search=tr");
        let (page, data) = build_page(&dir, &location);
        let state = FilterStateManager::<DocumentType>::new().get_state(&location);
        let value = render_json(&page, &data, &state);
        assert_eq!(value["type"], "all");
        assert_eq!(value["search"], "tr");
        let titles: Vec<&str> = value["items"]
            .as_array()
            .expect("items")
            .iter()
            .filter_map(|d| d["title"].as_str())
            .collect();
        assert_eq!(titles, ["Traffic Code", "Tree Planting Drive"]);
    }

    #[test]
    fn json_reports_type_only_on_typed_pages() {
        let dir = directory();
        let location = Location::parse("/government/barangays?type=ordinance");
        let (page, data) = build_page(&dir, &location);
        let state = FilterStateManager::<DocumentType>::new().get_state(&location);
        let value = render_json(&page, &data, &state);
        assert!(value["type"].is_null());
        assert_eq!(value["items"].as_array().map(Vec::len), Some(3));
    }
}
