//! Transaction model
//!
//! A transaction is a single income or expense entry. The amount is always a
//! non-negative magnitude; whether it adds to or subtracts from the balance
//! is carried by [`TransactionType`].

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::{TrackerError, TrackerResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Sign prefix used when showing the amount
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Income => "+",
            Self::Expense => "-",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown transaction type '{other}' (expected income or expense)"
            ))),
        }
    }
}

/// A calendar date as the user entered it
///
/// The raw text is kept verbatim so that dates written in a locale form
/// survive a load/save round trip. Parsing only happens for ordering and
/// range filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDate(String);

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

impl TransactionDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the stored text as a date, if it looks like one
    pub fn parse(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for TransactionDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive(date)
    }
}

impl From<&str> for TransactionDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// The editable fields of a transaction
///
/// Used both to create a transaction and as the patch for an edit; every
/// field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub category: String,
    pub date: TransactionDate,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        kind: TransactionType,
        category: impl Into<String>,
        date: impl Into<TransactionDate>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            date: date.into(),
        }
    }

    /// Reject values the repository must never store
    pub fn validate(&self) -> TrackerResult<()> {
        if self.amount.is_negative() {
            return Err(TrackerError::InvalidInput(format!(
                "amount must not be negative (got {})",
                self.amount
            )));
        }
        if !self.amount.is_within_limit() {
            return Err(TrackerError::InvalidInput(format!(
                "amount must not exceed {} (got {})",
                Money::MAX_AMOUNT,
                self.amount
            )));
        }
        Ok(())
    }
}

/// A recorded income or expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: TransactionDate,
}

impl Transaction {
    /// Build a transaction from a draft and an already-allocated id
    pub fn from_draft(id: TransactionId, draft: TransactionDraft) -> Self {
        Self {
            id,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category,
            date: draft.date,
        }
    }

    /// Overwrite every editable field; the id never changes
    pub fn apply(&mut self, draft: TransactionDraft) {
        self.description = draft.description;
        self.amount = draft.amount;
        self.kind = draft.kind;
        self.category = draft.category;
        self.date = draft.date;
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// The amount as it affects the balance (negative for expenses)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.date,
            self.description,
            self.kind.sign(),
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary() -> Transaction {
        Transaction::from_draft(
            TransactionId::new(1),
            TransactionDraft::new(
                "Salary",
                Money::from_units(1000),
                TransactionType::Income,
                "Job",
                "2024-01-01",
            ),
        )
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&salary()).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"description":"Salary","amount":1000,"type":"income","category":"Job","date":"2024-01-01"}"#
        );
    }

    #[test]
    fn test_reads_browser_written_record() {
        let json = r#"{"id":4,"description":"Coffee","amount":3.75,"type":"expense","category":"Food","date":"2024-02-10"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.id, TransactionId::new(4));
        assert_eq!(txn.amount.cents(), 375);
        assert!(txn.is_expense());
        assert_eq!(txn.date.as_str(), "2024-02-10");
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut txn = salary();
        txn.apply(TransactionDraft::new(
            "Bonus",
            Money::from_units(50),
            TransactionType::Income,
            "Job",
            "2024-01-05",
        ));
        assert_eq!(txn.id, TransactionId::new(1));
        assert_eq!(txn.description, "Bonus");
        assert_eq!(txn.amount, Money::from_units(50));
    }

    #[test]
    fn test_signed_amount() {
        let mut txn = salary();
        assert_eq!(txn.signed_amount(), Money::from_units(1000));
        txn.kind = TransactionType::Expense;
        assert_eq!(txn.signed_amount(), Money::from_units(-1000));
    }

    #[test]
    fn test_draft_rejects_negative_amount() {
        let draft = TransactionDraft::new(
            "Refund",
            Money::from_cents(-100),
            TransactionType::Income,
            "Misc",
            "2024-01-01",
        );
        assert!(draft.validate().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_draft_rejects_amount_over_limit() {
        let mut draft = TransactionDraft::new(
            "Lottery",
            Money::from_cents(i64::MAX),
            TransactionType::Income,
            "Misc",
            "2024-01-01",
        );
        assert!(draft.validate().unwrap_err().is_invalid_input());

        draft.amount = Money::MAX_AMOUNT;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_date_parsing() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(TransactionDate::new("2024-03-01").parse(), Some(expected));
        assert_eq!(TransactionDate::new("3/1/2024").parse(), Some(expected));
        assert_eq!(TransactionDate::new("2024/03/01").parse(), Some(expected));
        assert_eq!(TransactionDate::new("March 1, 2024").parse(), Some(expected));
        assert_eq!(
            TransactionDate::new("2024-03-01T10:00:00Z").parse(),
            Some(expected)
        );
        assert_eq!(TransactionDate::new("sometime").parse(), None);
        assert_eq!(TransactionDate::new("").parse(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(salary().to_string(), "2024-01-01 Salary +$1000.00");
    }
}
