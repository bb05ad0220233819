//! Gateway-computed income and expense aggregates.
//!
//! The client never derives these figures itself. It only checks that the
//! figures it receives hang together so that a misbehaving gateway shows up
//! in the logs.

use super::person::PersonId;

/// Largest absolute difference treated as equal when checking totals.
pub const TOTALS_TOLERANCE: f64 = 0.005;

/// Income, expense and balance of one person.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonTotals {
    /// Person the figures belong to.
    pub person_id: PersonId,
    /// Person name as resolved by the gateway.
    pub person_name: String,
    /// Sum of income transactions.
    pub income: f64,
    /// Sum of expense transactions.
    pub expense: f64,
    /// Income minus expense.
    pub balance: f64,
}

/// Per-person and overall totals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateTotals {
    /// One entry per person with at least one transaction.
    pub people: Vec<PersonTotals>,
    /// Sum of all income.
    pub total_income: f64,
    /// Sum of all expenses.
    pub total_expense: f64,
    /// Overall income minus expense.
    pub total_balance: f64,
}

/// One broken arithmetic invariant in an [`AggregateTotals`] payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TotalsInconsistency {
    /// A person's balance differs from income minus expense.
    PersonBalance {
        /// Offending person.
        person_id: PersonId,
        /// Income minus expense.
        expected: f64,
        /// Reported balance.
        actual: f64,
    },
    /// The overall balance differs from overall income minus expense.
    OverallBalance {
        /// Income minus expense.
        expected: f64,
        /// Reported balance.
        actual: f64,
    },
    /// An overall sum differs from the sum over people.
    OverallSum {
        /// `income` or `expense`.
        field: &'static str,
        /// Sum over people.
        expected: f64,
        /// Reported overall value.
        actual: f64,
    },
}

#[expect(clippy::float_arithmetic, reason = "totals are compared within a tolerance")]
fn differs(expected: f64, actual: f64) -> bool {
    (expected - actual).abs() > TOTALS_TOLERANCE
}

impl AggregateTotals {
    /// Return every invariant the payload breaks; empty when consistent.
    ///
    /// # Examples
    /// ```
    /// use ledger_client::domain::{AggregateTotals, PersonId, PersonTotals};
    ///
    /// let totals = AggregateTotals {
    ///     people: vec![PersonTotals {
    ///         person_id: PersonId::new("p1").expect("valid id"),
    ///         person_name: "Ana".to_owned(),
    ///         income: 500.0,
    ///         expense: 200.0,
    ///         balance: 300.0,
    ///     }],
    ///     total_income: 500.0,
    ///     total_expense: 200.0,
    ///     total_balance: 300.0,
    /// };
    /// assert!(totals.inconsistencies().is_empty());
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "balances are recomputed from gateway figures")]
    pub fn inconsistencies(&self) -> Vec<TotalsInconsistency> {
        let mut found = Vec::new();

        for person in &self.people {
            let expected = person.income - person.expense;
            if differs(expected, person.balance) {
                found.push(TotalsInconsistency::PersonBalance {
                    person_id: person.person_id.clone(),
                    expected,
                    actual: person.balance,
                });
            }
        }

        let expected_balance = self.total_income - self.total_expense;
        if differs(expected_balance, self.total_balance) {
            found.push(TotalsInconsistency::OverallBalance {
                expected: expected_balance,
                actual: self.total_balance,
            });
        }

        let income_sum: f64 = self.people.iter().map(|person| person.income).sum();
        if differs(income_sum, self.total_income) {
            found.push(TotalsInconsistency::OverallSum {
                field: "income",
                expected: income_sum,
                actual: self.total_income,
            });
        }
        let expense_sum: f64 = self.people.iter().map(|person| person.expense).sum();
        if differs(expense_sum, self.total_expense) {
            found.push(TotalsInconsistency::OverallSum {
                field: "expense",
                expected: expense_sum,
                actual: self.total_expense,
            });
        }

        found
    }
}
