use std::{env, path::PathBuf, process};

use financy_core::{
    cli::{output, report},
    config::{Config, ConfigManager},
    core::{
        query::TransactionQuery,
        services::{SummaryService, TransactionService},
    },
    domain::Snapshot,
    init,
    period::{recent_periods, PeriodKey},
    utils::persistence,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (path, command) = match (args.next(), args.next()) {
        (Some(path), Some(command)) => (PathBuf::from(path), command),
        _ => {
            print_usage();
            process::exit(1);
        }
    };
    let options = parse_options(args)?;

    let config = ConfigManager::new().load()?;
    let snapshot = persistence::load_snapshot_from_file(&path)?;
    let (transactions, rejected) =
        TransactionService::partition_batch(&snapshot.transactions, config.amount_policy);
    for err in &rejected {
        output::warning(format!("skipping record: {err}"));
    }
    let categories = snapshot.categories;

    match command.as_str() {
        "dashboard" => {
            let period = current_period(&options)?;
            let summary = SummaryService::dashboard(
                &transactions,
                &categories,
                period,
                &config.dashboard_options(),
            );
            print!(
                "{}",
                report::render_dashboard(
                    &summary,
                    &categories,
                    &config.locale_config(),
                    config.month_names()
                )
            );
        }
        "list" => {
            let query = build_query(&config, &options)?;
            let page = query.apply(&transactions, &categories)?;
            print!(
                "{}",
                report::render_transaction_page(&page, &categories, &config.locale_config())
            );
        }
        "categories" => {
            let usages = SummaryService::category_usage(&transactions, &categories);
            let stats = SummaryService::category_stats(&transactions, &categories);
            print!("{}", report::render_categories(&usages, &stats));
        }
        "export" => {
            let normalized = Snapshot {
                categories: categories.clone(),
                transactions: transactions
                    .iter()
                    .map(|txn| TransactionService::to_raw(txn, config.write_vocabulary))
                    .collect(),
            };
            println!("{}", normalized.to_json()?);
        }
        "periods" => {
            let periods = recent_periods(current_period(&options)?, config.period_options);
            print!("{}", report::render_periods(&periods, config.month_names()));
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    if !rejected.is_empty() {
        output::info(format!(
            "{} of {} records skipped",
            rejected.len(),
            rejected.len() + transactions.len()
        ));
    }
    Ok(())
}

/// `--page-size 20` becomes `("page_size", "20")`.
fn parse_options(
    mut args: impl Iterator<Item = String>,
) -> Result<Vec<(String, String)>, Box<dyn std::error::Error>> {
    let mut options = Vec::new();
    while let Some(flag) = args.next() {
        let key = flag
            .strip_prefix("--")
            .ok_or_else(|| format!("unexpected argument `{flag}`"))?
            .replace('-', "_");
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for `{flag}`"))?;
        options.push((key, value));
    }
    Ok(options)
}

fn current_period(options: &[(String, String)]) -> Result<PeriodKey, Box<dyn std::error::Error>> {
    match options.iter().rev().find(|(key, _)| key == "period") {
        Some((_, value)) => Ok(value.parse()?),
        None => Ok(PeriodKey::from_date(chrono::Local::now().date_naive())),
    }
}

fn build_query(
    config: &Config,
    options: &[(String, String)],
) -> Result<TransactionQuery, Box<dyn std::error::Error>> {
    let mut params = vec![("page_size".to_string(), config.page_size.to_string())];
    params.extend(options.iter().cloned());
    Ok(TransactionQuery::from_params(params.as_slice())?)
}

fn print_usage() {
    eprintln!(
        "Usage: financy_report <snapshot.json> <command> [options]\n\
         Commands:\n  \
         dashboard [--period YYYY-MM]\n  \
         list [--q TEXT] [--type TYPE] [--category ID] [--period YYYY-MM] [--from DATE] [--to DATE] [--sort ORDER] [--page N] [--page-size N]\n  \
         categories\n  \
         export\n  \
         periods [--period YYYY-MM]"
    );
}
