//! Command-line front end driving the two screens.
//!
//! Each command mounts its screen, performs the action (whose refresh supplies
//! the updated snapshot) and prints the screen's tables.

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use super::render::{general_total_table, people_table, totals_table, transactions_table};
use crate::domain::ports::{LedgerGateway, Notification, Notifier};
use crate::domain::{
    DomainError, PeopleScreen, PersonForm, PersonId, TransactionForm, TransactionsScreen,
};

/// `ledger` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ledger",
    about = "Manage the household people registry and transactions ledger",
    version
)]
pub struct Cli {
    /// Gateway base URL. Falls back to `LEDGER_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// Request timeout in seconds. Falls back to `LEDGER_TIMEOUT_SECONDS`.
    #[arg(long = "timeout-seconds", value_name = "n", global = true)]
    pub timeout_seconds: Option<u64>,
    /// Screen to drive.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level screens.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// People registry.
    #[command(subcommand)]
    People(PeopleCommand),
    /// Transactions ledger.
    #[command(subcommand)]
    Transactions(TransactionsCommand),
}

/// People screen actions.
#[derive(Debug, Clone, Subcommand)]
pub enum PeopleCommand {
    /// Show every person.
    List,
    /// Register a person.
    Add(AddPersonArgs),
    /// Delete a person by identifier.
    Delete {
        /// Identifier of the person to delete.
        id: String,
    },
}

/// Raw person form input; validated by the screen.
#[derive(Debug, Clone, Args)]
pub struct AddPersonArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Age in whole years.
    #[arg(long)]
    pub age: String,
}

/// Transactions screen actions.
#[derive(Debug, Clone, Subcommand)]
pub enum TransactionsCommand {
    /// Show transactions, per-person totals and the general total.
    List,
    /// Record a transaction.
    Add(AddTransactionArgs),
}

/// Raw transaction form input; validated by the screen.
#[derive(Debug, Clone, Args)]
pub struct AddTransactionArgs {
    /// Identifier of the owning person.
    #[arg(long)]
    pub person: String,
    /// `income` or `expense`.
    #[arg(long)]
    pub kind: String,
    /// Free-text description.
    #[arg(long)]
    pub description: String,
    /// Positive amount.
    #[arg(long)]
    pub amount: String,
}

impl From<&AddPersonArgs> for PersonForm {
    fn from(args: &AddPersonArgs) -> Self {
        PersonForm::new(args.name.as_str(), args.age.as_str())
    }
}

impl From<&AddTransactionArgs> for TransactionForm {
    fn from(args: &AddTransactionArgs) -> Self {
        TransactionForm {
            person_id: args.person.clone(),
            kind: args.kind.clone(),
            description: args.description.clone(),
            amount: args.amount.clone(),
        }
    }
}

/// Failures of one command run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A screen operation failed; the notifier has already told the user.
    #[error(transparent)]
    Sync(#[from] DomainError),
    /// Writing the tables failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Execute one command against the injected gateway and notifier.
///
/// # Errors
///
/// Returns [`RunError::Sync`] when a screen operation fails and
/// [`RunError::Output`] when the tables cannot be written.
pub async fn run<G, N, W>(
    command: &Command,
    gateway: Arc<G>,
    notifier: Arc<N>,
    out: &mut W,
) -> Result<(), RunError>
where
    G: LedgerGateway,
    N: Notifier,
    W: Write,
{
    match command {
        Command::People(action) => run_people(action, gateway, notifier, out).await,
        Command::Transactions(action) => run_transactions(action, gateway, notifier, out).await,
    }
}

async fn run_people<G, N, W>(
    action: &PeopleCommand,
    gateway: Arc<G>,
    notifier: Arc<N>,
    out: &mut W,
) -> Result<(), RunError>
where
    G: LedgerGateway,
    N: Notifier,
    W: Write,
{
    let delete_target = match action {
        PeopleCommand::Delete { id } => Some(parse_person_id(id, notifier.as_ref())?),
        PeopleCommand::List | PeopleCommand::Add(_) => None,
    };

    let mut screen = PeopleScreen::new(gateway, notifier);
    screen.mount().await?;
    if let PeopleCommand::Add(args) = action {
        screen.submit_person(&PersonForm::from(args)).await?;
    }
    if let Some(id) = delete_target {
        screen.delete_person(&id).await?;
    }

    write!(out, "{}", people_table(screen.view().people()))?;
    Ok(())
}

async fn run_transactions<G, N, W>(
    action: &TransactionsCommand,
    gateway: Arc<G>,
    notifier: Arc<N>,
    out: &mut W,
) -> Result<(), RunError>
where
    G: LedgerGateway,
    N: Notifier,
    W: Write,
{
    let mut screen = TransactionsScreen::new(gateway, notifier);
    screen.mount().await?;
    if let TransactionsCommand::Add(args) = action {
        screen
            .submit_transaction(&TransactionForm::from(args))
            .await?;
    }

    let view = screen.view();
    write!(out, "{}", transactions_table(view.people(), view.transactions()))?;
    if let Some(totals) = view.totals() {
        writeln!(out)?;
        write!(out, "{}", totals_table(totals))?;
        writeln!(out)?;
        write!(out, "{}", general_total_table(totals))?;
    }
    Ok(())
}

fn parse_person_id<N>(raw: &str, notifier: &N) -> Result<PersonId, DomainError>
where
    N: Notifier + ?Sized,
{
    PersonId::new(raw).map_err(|failure| {
        let error = DomainError::invalid_request(failure.to_string());
        notifier.notify(Notification::Validation {
            message: error.message().to_owned(),
        });
        error
    })
}
