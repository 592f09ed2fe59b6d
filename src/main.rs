mod budgets;
mod categories;
mod cli;
mod db;
mod error;
mod fmt;
mod logging;
mod models;
mod period;
mod reports;
mod settings;
mod transactions;
mod users;

use clap::Parser;

use cli::{BudgetsCommands, CategoriesCommands, Cli, Commands, ReportCommands, TransactionsCommands, UsersCommands};

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();
    let user = cli.user.as_deref();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Users { command } => match command {
            UsersCommands::Add { email, name, currency } => cli::users::add(&email, &name, currency.as_deref()),
            UsersCommands::List => cli::users::list(),
            UsersCommands::Use { email } => cli::users::use_user(&email),
            UsersCommands::Currency { currency } => cli::users::set_currency(user, &currency),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::Add {
                name,
                category_type,
                color,
                icon,
            } => cli::categories::add(user, &name, &category_type, &color, icon.as_deref()),
            CategoriesCommands::List { page, json } => cli::categories::list(user, page, json),
            CategoriesCommands::Update {
                id,
                name,
                category_type,
                color,
                icon,
            } => cli::categories::update(
                user,
                id,
                name.as_deref(),
                category_type.as_deref(),
                color.as_deref(),
                icon.as_deref(),
            ),
            CategoriesCommands::Delete { id } => cli::categories::delete(user, id),
        },
        Commands::Transactions { command } => match command {
            TransactionsCommands::Add {
                amount,
                category,
                txn_type,
                currency,
                date,
                description,
            } => cli::transactions::add(
                user,
                &cli::transactions::AddArgs {
                    amount,
                    category,
                    txn_type: &txn_type,
                    currency: &currency,
                    date: &date,
                    description: &description,
                },
            ),
            TransactionsCommands::List {
                date_from,
                date_to,
                category,
                txn_type,
                amount_min,
                amount_max,
                page,
                json,
            } => cli::transactions::list(
                user,
                &cli::transactions::ListArgs {
                    date_from,
                    date_to,
                    category,
                    txn_type,
                    amount_min,
                    amount_max,
                    page,
                    json,
                },
            ),
            TransactionsCommands::Update {
                id,
                amount,
                category,
                txn_type,
                currency,
                date,
                description,
            } => cli::transactions::update(
                user,
                id,
                &cli::transactions::UpdateArgs {
                    amount,
                    category,
                    txn_type,
                    currency,
                    date,
                    description,
                },
            ),
            TransactionsCommands::Delete { id } => cli::transactions::delete(user, id),
        },
        Commands::Budgets { command } => match command {
            BudgetsCommands::Add {
                category,
                amount,
                month,
                currency,
            } => cli::budgets::add(user, category, amount, &month, &currency),
            BudgetsCommands::List { page, json } => cli::budgets::list(user, page, json),
            BudgetsCommands::Update {
                id,
                category,
                amount,
                month,
                currency,
            } => cli::budgets::update(user, id, category, amount, month.as_deref(), currency.as_deref()),
            BudgetsCommands::Delete { id } => cli::budgets::delete(user, id),
        },
        Commands::Report { command } => match command {
            ReportCommands::Summary { month, json } => cli::report::summary(user, month.as_deref(), json),
            ReportCommands::Categories { month, json } => cli::report::categories(user, month.as_deref(), json),
            ReportCommands::Trend { year, json } => cli::report::trend(user, year.as_deref(), json),
            ReportCommands::Budgets { month, json } => cli::report::budgets(user, month.as_deref(), json),
        },
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
