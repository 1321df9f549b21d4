//! Transaction CLI commands
//!
//! Add, edit, delete and list transactions, and wipe them all.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};
use clap::Args;

use super::{ensure_rendered, mount_page, Page};
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, TransactionDate, TransactionDraft, TransactionId, TransactionType};
use crate::reports::TransactionFilter;
use crate::sync::Tracker;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// What the money was for
    pub description: String,
    /// Amount (e.g., "12.50"); never negative
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    /// income or expense
    #[arg(short = 't', long = "type", default_value = "expense")]
    pub kind: String,
    /// Category label
    #[arg(short, long)]
    pub category: String,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Transaction ID
    pub id: TransactionId,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    /// income or expense
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only income or only expenses
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,
    /// Filter by category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Start date (inclusive)
    #[arg(long)]
    pub from: Option<String>,
    /// End date (inclusive)
    #[arg(long)]
    pub to: Option<String>,
    /// Search descriptions
    #[arg(short, long)]
    pub search: Option<String>,
    /// Number of transactions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    pub fn to_filter(&self) -> TrackerResult<TransactionFilter> {
        let mut filter = TransactionFilter::new().date_range(
            self.from.as_deref().map(parse_date).transpose()?,
            self.to.as_deref().map(parse_date).transpose()?,
        );
        if let Some(ref kind) = self.kind {
            filter = filter.kind(kind.parse()?);
        }
        if let Some(ref category) = self.category {
            filter = filter.category(category.clone());
        }
        if let Some(ref search) = self.search {
            filter = filter.search(search.clone());
        }
        if let Some(limit) = self.limit {
            filter = filter.limit(limit);
        }
        Ok(filter)
    }
}

pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| TrackerError::InvalidInput(format!("Invalid amount: {}", e)))?;
    if amount.is_negative() {
        return Err(TrackerError::InvalidInput(
            "Amount must not be negative; use --type expense instead".into(),
        ));
    }
    if !amount.is_within_limit() {
        return Err(TrackerError::InvalidInput(format!(
            "Amount must not exceed {}",
            Money::MAX_AMOUNT
        )));
    }
    Ok(amount)
}

pub fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    TransactionDate::new(input)
        .parse()
        .ok_or_else(|| TrackerError::InvalidInput(format!("Invalid date: '{}'", input)))
}

fn parse_kind(input: &str) -> TrackerResult<TransactionType> {
    input.parse()
}

fn required(field: &str, value: &str) -> TrackerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TrackerError::InvalidInput(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Handle `add`
pub fn handle_add_command(tracker: &mut Tracker, settings: &Settings, args: AddArgs) -> TrackerResult<()> {
    let date = match args.date {
        Some(ref raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let draft = TransactionDraft::new(
        required("Description", &args.description)?,
        parse_amount(&args.amount)?,
        parse_kind(&args.kind)?,
        required("Category", &args.category)?,
        date,
    );

    mount_page(tracker, Page::Status, settings, TransactionFilter::default());
    let txn = tracker.add(draft)?;
    println!("Added transaction #{}: {}", txn.id, txn);
    ensure_rendered(tracker)
}

/// Handle `edit`; fields not given keep their current value
pub fn handle_edit_command(tracker: &mut Tracker, settings: &Settings, args: EditArgs) -> TrackerResult<()> {
    let current = tracker
        .repository()
        .get(args.id)
        .cloned()
        .ok_or_else(|| TrackerError::transaction_not_found(args.id))?;

    let patch = TransactionDraft {
        description: match args.description {
            Some(ref d) => required("Description", d)?,
            None => current.description,
        },
        amount: match args.amount {
            Some(ref a) => parse_amount(a)?,
            None => current.amount,
        },
        kind: match args.kind {
            Some(ref k) => parse_kind(k)?,
            None => current.kind,
        },
        category: match args.category {
            Some(ref c) => required("Category", c)?,
            None => current.category,
        },
        date: match args.date {
            Some(ref d) => parse_date(d)?.into(),
            None => current.date,
        },
    };

    mount_page(tracker, Page::Status, settings, TransactionFilter::default());
    let txn = tracker.edit(args.id, patch)?;
    println!("Updated transaction #{}: {}", txn.id, txn);
    ensure_rendered(tracker)
}

/// Handle `delete`
pub fn handle_delete_command(tracker: &mut Tracker, settings: &Settings, id: TransactionId) -> TrackerResult<()> {
    mount_page(tracker, Page::Status, settings, TransactionFilter::default());
    match tracker.remove(id)? {
        Some(txn) => println!("Deleted transaction #{}: {}", txn.id, txn.description),
        None => println!("No transaction #{}; nothing deleted.", id),
    }
    ensure_rendered(tracker)
}

/// Handle `list`
pub fn handle_list_command(tracker: &mut Tracker, settings: &Settings, args: ListArgs) -> TrackerResult<()> {
    let filter = args.to_filter()?;
    mount_page(tracker, Page::Transactions, settings, filter);
    tracker.refresh_views().into_result()?;
    Ok(())
}

/// Ask a yes/no question; anything but "y"/"yes" is a no
pub fn confirm<R: BufRead>(prompt: &str, input: &mut R) -> TrackerResult<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Handle `reset`
pub fn handle_reset_command<R: BufRead>(
    tracker: &mut Tracker,
    settings: &Settings,
    force: bool,
    input: &mut R,
) -> TrackerResult<()> {
    if !force
        && !confirm(
            "This will permanently delete all your transactions. Are you sure?",
            input,
        )?
    {
        println!("Reset cancelled.");
        return Ok(());
    }

    mount_page(tracker, Page::Status, settings, TransactionFilter::default());
    tracker.reset_all()?;
    println!("All transactions have been deleted.");
    ensure_rendered(tracker)
}
