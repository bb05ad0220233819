//! Pure text rendering of screen view state.
//!
//! Every table is a title, a header line and one line per row, with cells
//! joined by ` | `.

use std::collections::HashMap;
use std::fmt;

use crate::domain::{AggregateTotals, Person, PersonId, Transaction};

/// Label shown when a transaction references a person that is not loaded.
pub const UNKNOWN_PERSON_LABEL: &str = "person not found";

const CELL_SEPARATOR: &str = " | ";

/// Render an amount with two decimals, rounding the exact binary value.
///
/// Values that sit exactly halfway between two hundredths round away from
/// zero. Such ties are the odd multiples of one eighth; anything else is
/// rounded to the nearest hundredth of its exact binary expansion.
///
/// ```
/// use ledger_client::inbound::render::format_amount;
///
/// assert_eq!(format_amount(500.0), "500.00");
/// assert_eq!(format_amount(100.005), "100.00");
/// assert_eq!(format_amount(1.125), "1.13");
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "ties are found by scaling by a power of two")]
pub fn format_amount(amount: f64) -> String {
    let magnitude = amount.abs();
    let eighths = magnitude * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths.rem_euclid(2.0).total_cmp(&1.0).is_eq();
    if !is_tie {
        return format!("{amount:.2}");
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let whole = magnitude.trunc();
    let odd_eighth = eighths.rem_euclid(8.0);
    let cents = if odd_eighth < 2.0 {
        "13"
    } else if odd_eighth < 4.0 {
        "38"
    } else if odd_eighth < 6.0 {
        "63"
    } else {
        "88"
    };
    format!("{sign}{whole:.0}.{cents}")
}

/// A titled text table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    title: &'static str,
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    const fn new(title: &'static str, headers: Vec<&'static str>) -> Self {
        Self {
            title,
            headers,
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Table title.
    #[must_use]
    pub const fn title(&self) -> &str {
        self.title
    }

    /// Header line.
    #[must_use]
    pub fn header_line(&self) -> String {
        self.headers.join(CELL_SEPARATOR)
    }

    /// Body lines, one per row.
    #[must_use]
    pub fn row_lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.join(CELL_SEPARATOR)).collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.header_line())?;
        for line in self.row_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// People registry table.
#[must_use]
pub fn people_table(people: &[Person]) -> Table {
    let mut table = Table::new("People", vec!["Name", "Age", "Created", "Id"]);
    for person in people {
        table.push_row(vec![
            person.name.clone(),
            person.age.to_string(),
            person.created_at.format("%Y-%m-%d").to_string(),
            person.id.to_string(),
        ]);
    }
    table
}

/// Transactions table with owner names resolved against `people`.
#[must_use]
pub fn transactions_table(people: &[Person], transactions: &[Transaction]) -> Table {
    let names: HashMap<&PersonId, &str> = people
        .iter()
        .map(|person| (&person.id, person.name.as_str()))
        .collect();

    let mut table = Table::new(
        "Transactions",
        vec!["Name", "Type", "Description", "Amount"],
    );
    for transaction in transactions {
        let name = names
            .get(&transaction.person_id)
            .copied()
            .unwrap_or(UNKNOWN_PERSON_LABEL);
        table.push_row(vec![
            name.to_owned(),
            transaction.kind.to_string(),
            transaction.description.clone(),
            format_amount(transaction.amount),
        ]);
    }
    table
}

/// Per-person totals table.
#[must_use]
pub fn totals_table(totals: &AggregateTotals) -> Table {
    let mut table = Table::new("Totals", vec!["Name", "Income", "Expenses", "Balance"]);
    for row in &totals.people {
        table.push_row(vec![
            row.person_name.clone(),
            format_amount(row.income),
            format_amount(row.expense),
            format_amount(row.balance),
        ]);
    }
    table
}

/// Single-row general total table.
#[must_use]
pub fn general_total_table(totals: &AggregateTotals) -> Table {
    let mut table = Table::new("General total", vec!["Income", "Expenses", "Balance"]);
    table.push_row(vec![
        format_amount(totals.total_income),
        format_amount(totals.total_expense),
        format_amount(totals.total_balance),
    ]);
    table
}
