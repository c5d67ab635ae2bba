//! Finanza360 CLI
//!
//! Loads a snapshot of the entity set and prints the derived views the
//! dashboard would show: net worth, monthly personal flow, the work pot,
//! custody pots, credit usage and budget statuses.
//!
//! # Usage
//!
//! ```bash
//! finanza360 state.json
//! finanza360 state.json --month 2024-05 --rate 36.25
//! finanza360 state.json --output accounts-csv > accounts.csv
//! ```
//!
//! A missing or malformed snapshot is not fatal: the report runs over
//! default (empty) state, matching the application's first-run behavior.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid rate, output write failure)

use finanza360::cli::{self, OutputMode};
use finanza360::core::pools::WorkPotStatus;
use finanza360::core::{BudgetHealth, FinanceEngine};
use finanza360::io::{self, write_accounts_csv};
use finanza360::types::ExchangeRate;
use std::process;

fn main() {
    let args = cli::parse_args();

    let rate = match args.exchange_rate() {
        Ok(rate) => rate,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let engine = io::load_or_default(&args.snapshot).into_engine();

    match args.output {
        OutputMode::AccountsCsv => {
            let mut stdout = std::io::stdout();
            if let Err(e) = write_accounts_csv(engine.accounts(), rate, &mut stdout) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        OutputMode::Summary => {
            let month = args.month.clone().or_else(|| latest_month(&engine));
            print_summary(&engine, month.as_deref(), rate);
        }
    }
}

/// Latest month with recorded activity, falling back to budget months
fn latest_month(engine: &FinanceEngine) -> Option<String> {
    engine
        .transactions()
        .iter()
        .map(|t| t.month().to_string())
        .max()
        .or_else(|| engine.budgets().iter().map(|b| b.month.clone()).max())
}

fn print_summary(engine: &FinanceEngine, month: Option<&str>, rate: ExchangeRate) {
    println!("Exchange rate: 1 USD = {} VES", rate.value());

    let net = engine.net_worth(rate);
    println!();
    println!("Net worth (USD)");
    println!("  Liquid funds:       {:.2}", net.liquid_usd);
    println!("  Custody liability:  -{:.2}", net.custody_liability_usd);
    println!("  Investments:        {:.2}", net.investment_value_usd);
    println!("  Total:              {:.2}", net.net_worth_usd);

    if !engine.accounts().is_empty() {
        println!();
        println!("Accounts");
        for account in engine.accounts() {
            println!(
                "  {:<24} {:>14.2} {}",
                account.name,
                account.balance,
                account.currency.symbol()
            );
        }
    }

    let credit = engine.credit_summaries();
    if !credit.is_empty() {
        println!();
        println!("Credit cards");
        for (account, summary) in credit {
            let alert = if summary.high_usage() { "  HIGH USAGE" } else { "" };
            println!(
                "  {:<24} debt {:.2}  available {:.2}  utilization {:.0}%{}",
                account.name, summary.debt, summary.available, summary.utilization_pct, alert
            );
        }
    }

    if let Some(month) = month {
        let flow = engine.monthly_flow(month, rate);
        println!();
        println!("Personal flow for {month} (USD)");
        println!("  Income:   {:.2}", flow.total_income_usd);
        println!("  Expenses: {:.2}", flow.total_expense_usd);
        println!("  Net:      {:.2}", flow.net_usd());
    }

    let pot = engine.work_pot(rate);
    if !pot.transaction_ids.is_empty() {
        println!();
        println!("Work pot (pending)");
        println!("  Advances received: {:.2}", pot.total_advances);
        println!("  Expenses laid out: {:.2}", pot.total_expenses);
        let status = match pot.status {
            WorkPotStatus::Funded => "company money in hand",
            WorkPotStatus::Owed => "owed by the company",
        };
        println!("  Balance:           {:.2} ({status})", pot.balance.abs());
    }

    let pots = engine.custody_pots(rate);
    if !pots.is_empty() {
        println!();
        println!("Money held for others (USD)");
        for (owner, pot) in &pots {
            println!("  {:<24} {:>14.2}", owner, pot.balance);
        }
    }

    if let Some(month) = month {
        let statuses = engine.budget_statuses(month, rate);
        if !statuses.is_empty() {
            println!();
            println!("Budgets for {month}");
            for status in statuses {
                let band = match status.health {
                    BudgetHealth::Exceeded => "EXCEEDED",
                    BudgetHealth::NearLimit => "near limit",
                    BudgetHealth::OnTrack => "on track",
                };
                let inherited = if status.inherited { " (carried forward)" } else { "" };
                println!(
                    "  {:<16} {:.2} / {:.2} {} | {:.0}% {band}{inherited}",
                    status.budget.category,
                    status.spent,
                    status.budget.limit,
                    status.budget.currency.symbol(),
                    status.percentage,
                );
            }
        }
    }
}
