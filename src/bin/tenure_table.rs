//! Print the repayment quote for every tenure option of each catalog product

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use loan_estimator::format::format_currency;
use loan_estimator::product::{find_product, load_products};
use loan_estimator::{compute_repayment, EstimatorConfig, LoanProduct};

#[derive(Parser)]
#[command(name = "tenure_table")]
#[command(author, version, about = "Repayment quotes across all tenure options", long_about = None)]
struct Args {
    /// Product catalog (.json or .csv)
    #[arg(long)]
    products: PathBuf,

    /// Principal requested
    #[arg(long)]
    amount: f64,

    /// Only show this product
    #[arg(long)]
    product: Option<u64>,

    /// Currency symbol for amounts
    #[arg(long)]
    currency: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let products = load_products(&args.products)
        .with_context(|| format!("failed to load products from {}", args.products.display()))?;
    let selected: Vec<&LoanProduct> = match args.product {
        Some(id) => vec![find_product(&products, id)?],
        None => products.iter().collect(),
    };

    let symbol = args
        .currency
        .unwrap_or_else(|| EstimatorConfig::default().currency_symbol);

    for product in selected {
        println!("\n{} (#{}, {} @ {}%)", product.name, product.id, product.interest_type, product.interest_rate);
        if product.check_amount(args.amount).is_err() {
            println!("  amount outside {}..={}", product.min_amount, product.max_amount);
        }
        println!("{:<8} {:>20} {:>20} {:>20}", "Months", "Monthly", "Total", "Interest");

        for months in product.tenure_options() {
            let quote = compute_repayment(Some(product), args.amount, months);
            println!(
                "{:<8} {:>20} {:>20} {:>20}",
                months,
                format_currency(quote.monthly, &symbol),
                format_currency(quote.total, &symbol),
                format_currency(quote.interest, &symbol),
            );
        }
    }

    Ok(())
}
