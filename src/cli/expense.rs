//! Expense CLI commands
//!
//! Everything under `tracker expense ...`, including the monthly budget
//! subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use super::{open_output, parse_amount, resolve_period};
use crate::config::Settings;
use crate::display::{
    format_budget_check, format_budget_warning, format_category_totals, format_expense_list,
    format_summary,
};
use crate::error::{TrackerError, TrackerResult};
use crate::export::export_expenses_csv;
use crate::models::{Expense, ExpensePatch, Money, MonthPeriod, RecordId};
use crate::query::{
    budget_check, category_totals, list_by_category, list_by_month, summary_by_month,
    summary_total,
};
use crate::storage::{BudgetBook, Storage, Store};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Create the expense store
    Init {
        /// Replace an existing store with an empty one
        #[arg(short, long)]
        force: bool,
    },
    /// Record an expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g., "12.50" or "$12.50")
        amount: String,
        /// Category (defaults to the configured default category)
        #[arg(short, long)]
        category: Option<String>,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change an expense
    Update {
        /// Expense ID
        id: RecordId,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: RecordId,
    },
    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Only expenses in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only expenses from this month (1-12)
        #[arg(short, long)]
        month: Option<u32>,
        /// Year for --month (defaults to the current year)
        #[arg(short, long, requires = "month")]
        year: Option<i32>,
    },
    /// Show total spending
    Summary {
        /// Only this month (1-12)
        #[arg(short, long)]
        month: Option<u32>,
        /// Year for --month (defaults to the current year)
        #[arg(short, long, requires = "month")]
        year: Option<i32>,
        /// Break the total down by category
        #[arg(long)]
        by_category: bool,
    },
    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),
    /// Export expenses to CSV
    Export {
        /// Only expenses in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only expenses from this month (1-12)
        #[arg(short, long)]
        month: Option<u32>,
        /// Year for --month (defaults to the current year)
        #[arg(short, long, requires = "month")]
        year: Option<i32>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a month
    Set {
        /// Budget amount
        amount: String,
        /// Month (1-12)
        #[arg(short, long)]
        month: u32,
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Compare a month's spending against its budget
    Check {
        /// Month (1-12)
        #[arg(short, long)]
        month: u32,
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Budget to check against instead of the saved one
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// Remove the budget for a month
    Remove {
        /// Month (1-12)
        #[arg(short, long)]
        month: u32,
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// List saved budgets
    List,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Init { force } => {
            let expenses = storage.init_expenses(force)?;
            println!("Initialized expense store at {}", expenses.path().display());
        }

        ExpenseCommands::Add {
            title,
            amount,
            category,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let category = category.unwrap_or_else(|| settings.default_category.clone());

            let mut expenses = storage.expenses()?;
            let id = expenses.add_expense(title, amount, category, description)?;
            println!("Expense added successfully (ID: {})", id);

            let period = MonthPeriod::of(&expenses.get(id)?.created_at);
            warn_if_over_budget(storage, expenses.snapshot(), period, symbol);
        }

        ExpenseCommands::Update {
            id,
            title,
            amount,
            category,
            description,
            clear_description,
        } => {
            let mut patch = ExpensePatch::new();
            if let Some(title) = title {
                patch = patch.title(title);
            }
            if let Some(amount) = amount {
                patch = patch.amount(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                patch = patch.category(category);
            }
            if let Some(description) = description {
                patch = patch.description(Some(description));
            } else if clear_description {
                patch = patch.description(None);
            }

            if patch == ExpensePatch::new() {
                return Err(TrackerError::Usage(
                    "No changes specified. Use --title, --amount, --category, --description or --clear-description."
                        .into(),
                ));
            }

            let mut expenses = storage.expenses()?;
            let expense = expenses.update(id, patch)?;
            println!("Expense updated successfully (ID: {})", expense.id);
        }

        ExpenseCommands::Delete { id } => {
            let mut expenses = storage.expenses()?;
            let removed = expenses.delete(id)?;
            println!("Expense deleted successfully (ID: {})", removed.id);
        }

        ExpenseCommands::List {
            category,
            month,
            year,
        } => {
            let period = resolve_period(month, year)?;
            let expenses = storage.expenses()?;
            let selected = select(expenses.snapshot(), category.as_deref(), period);
            println!("{}", format_expense_list(selected, symbol));
        }

        ExpenseCommands::Summary {
            month,
            year,
            by_category,
        } => {
            let period = resolve_period(month, year)?;
            let expenses = storage.expenses()?;
            let snapshot = expenses.snapshot();

            if by_category {
                let totals = category_totals(select(snapshot, None, period));
                println!("{}", format_category_totals(&totals, symbol));
            } else {
                let total = match month {
                    Some(month) => summary_by_month(snapshot, month, year)?,
                    None => summary_total(snapshot),
                };
                println!("{}", format_summary(total, period, symbol));
            }
        }

        ExpenseCommands::Budget(cmd) => handle_budget_command(storage, symbol, cmd)?,

        ExpenseCommands::Export {
            category,
            month,
            year,
            output,
        } => {
            let period = resolve_period(month, year)?;
            let expenses = storage.expenses()?;
            let selected = select(expenses.snapshot(), category.as_deref(), period);

            let writer = open_output(output.as_deref())?;
            let rows = export_expenses_csv(selected, writer)?;

            if let Some(path) = output {
                println!("Exported {} expenses to {}", rows, path.display());
            }
        }
    }

    Ok(())
}

fn handle_budget_command(storage: &Storage, symbol: &str, cmd: BudgetCommands) -> TrackerResult<()> {
    match cmd {
        BudgetCommands::Set {
            amount,
            month,
            year,
        } => {
            let period = MonthPeriod::for_month(month, year)?;
            let amount = parse_amount(&amount)?;

            let mut budgets = storage.budgets()?;
            budgets.set(period, amount)?;
            println!(
                "Budget for {} set to {}",
                period.long_name(),
                amount.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Check {
            month,
            year,
            amount,
        } => {
            let period = MonthPeriod::for_month(month, year)?;
            let budget = match amount {
                Some(amount) => parse_amount(&amount)?,
                None => saved_budget(&storage.budgets()?, period)?,
            };

            let expenses = storage.expenses()?;
            let check = budget_check(expenses.snapshot(), period, budget);
            println!("{}", format_budget_check(&check, symbol));
        }

        BudgetCommands::Remove { month, year } => {
            let period = MonthPeriod::for_month(month, year)?;
            let mut budgets = storage.budgets()?;
            let removed = budgets.remove(period)?;
            println!(
                "Removed {} budget for {}",
                removed.format_with_symbol(symbol),
                period.long_name()
            );
        }

        BudgetCommands::List => {
            let budgets = storage.budgets()?;
            if budgets.is_empty() {
                println!("No budgets set.");
            }
            for budget in budgets.iter() {
                println!(
                    "{}-{:02}  {:>12}",
                    budget.year,
                    budget.month,
                    budget.amount.format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}

/// Apply the optional category and month filters through the query layer
fn select<'a>(
    store: &'a Store<Expense>,
    category: Option<&'a str>,
    period: Option<MonthPeriod>,
) -> Vec<&'a Expense> {
    match (category, period) {
        (Some(category), Some(period)) => list_by_category(store, category)
            .filter(|e| period.contains(&e.created_at))
            .collect(),
        (Some(category), None) => list_by_category(store, category).collect(),
        (None, Some(period)) => list_by_month(store, period).collect(),
        (None, None) => store.iter().collect(),
    }
}

fn saved_budget(budgets: &BudgetBook, period: MonthPeriod) -> TrackerResult<Money> {
    budgets.get(period).ok_or_else(|| TrackerError::NotFound {
        entity_type: "Budget",
        identifier: period.to_string(),
    })
}

/// Print a warning when a saved budget for `period` is now exceeded
///
/// The expense is already stored at this point, so problems reading the
/// budget book are only logged.
fn warn_if_over_budget(storage: &Storage, store: &Store<Expense>, period: MonthPeriod, symbol: &str) {
    let budget = match storage.budgets() {
        Ok(budgets) => budgets.get(period),
        Err(e) => {
            log::warn!("could not read budgets: {}", e);
            None
        }
    };

    if let Some(budget) = budget {
        let check = budget_check(store, period, budget);
        if check.exceeded() {
            println!("{}", format_budget_warning(&check, symbol));
        }
    }
}
