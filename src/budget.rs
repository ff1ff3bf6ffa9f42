use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: f64,
}

fn sum(items: &[LineItem]) -> f64 {
    items.iter().map(|i| i.amount).sum()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    #[serde(default)]
    pub local_sources: Vec<LineItem>,
    #[serde(default)]
    pub external_sources: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureStatement {
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    #[serde(default)]
    pub fund_cash_balance_end: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetYear {
    pub year: i32,
    #[serde(default)]
    pub income: IncomeStatement,
    #[serde(default)]
    pub expenditure: ExpenditureStatement,
    #[serde(default)]
    pub fund_summary: FundSummary,
}

impl BudgetYear {
    pub fn total_income(&self) -> f64 {
        sum(&self.income.local_sources) + sum(&self.income.external_sources)
    }

    pub fn total_expenditure(&self) -> f64 {
        sum(&self.expenditure.items)
    }

    pub fn net_income(&self) -> f64 {
        self.total_income() - self.total_expenditure()
    }

    pub fn fund_balance(&self) -> f64 {
        self.fund_summary.fund_cash_balance_end.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoY {
    pub diff: f64,
    pub pct: f64,
}

impl YoY {
    pub fn is_positive(&self) -> bool {
        self.diff >= 0.0
    }
}

/// Year-over-year change; `None` without a usable previous value.
pub fn calculate_yoy(current: f64, previous: Option<f64>) -> Option<YoY> {
    let previous = previous.filter(|p| *p != 0.0 && p.is_finite())?;
    let diff = current - previous;
    Some(YoY {
        diff,
        pct: diff / previous.abs() * 100.0,
    })
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_peso(value: f64, decimals: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (fixed, None),
    };
    match frac_part {
        Some(frac) => format!("{sign}₱{}.{frac}", group_thousands(&int_part)),
        None => format!("{sign}₱{}", group_thousands(&int_part)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PesoAmount {
    pub value: f64,
    pub unit: &'static str,
    pub full_string: String,
}

const PESO_UNITS: [(f64, &str); 4] = [(1e9, "B"), (1e6, "M"), (1e3, "K"), (1.0, "")];

/// Scales to K/M/B so large figures stay readable on a summary card. The unit
/// is chosen after rounding, so 999,999 at zero decimals reads as 1M.
pub fn format_peso_adaptive(value: f64, decimals: usize) -> PesoAmount {
    let factor = 10f64.powi(decimals as i32);
    let round = |v: f64| (v * factor).round() / factor;
    let abs = value.abs();
    let mut idx = PESO_UNITS
        .iter()
        .position(|(scale, _)| abs >= *scale)
        .unwrap_or(PESO_UNITS.len() - 1);
    let mut scaled = round(value / PESO_UNITS[idx].0);
    while idx > 0 && scaled.abs() >= 1000.0 {
        idx -= 1;
        scaled = round(value / PESO_UNITS[idx].0);
    }
    let unit = PESO_UNITS[idx].1;
    let full_string = format!("{}{unit}", format_peso(scaled, decimals));
    PesoAmount {
        value: scaled,
        unit,
        full_string,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: f64,
    pub yoy: Option<YoY>,
}

pub fn summary_cards(current: &BudgetYear, previous: Option<&BudgetYear>) -> Vec<SummaryCard> {
    let card = |title, value: f64, prev: Option<f64>| SummaryCard {
        title,
        value,
        yoy: calculate_yoy(value, prev),
    };
    vec![
        card(
            "Total Revenue",
            current.total_income(),
            previous.map(BudgetYear::total_income),
        ),
        card(
            "Total Expenditure",
            current.total_expenditure(),
            previous.map(BudgetYear::total_expenditure),
        ),
        card(
            "Net Operating Income",
            current.net_income(),
            previous.map(BudgetYear::net_income),
        ),
        card(
            "Treasury Balance",
            current.fund_balance(),
            previous.map(BudgetYear::fund_balance),
        ),
    ]
}
