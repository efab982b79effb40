//! Quote a loan repayment from a product catalog
//!
//! Example:
//! ```bash
//! loan_quote --products demos/products.json --product 1 --amount 1000000 --tenure 12 --net-pay 450000
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use loan_estimator::format::{format_currency, format_rate};
use loan_estimator::product::{find_product, load_products};
use loan_estimator::{
    compute_repayment, Eligibility, EstimatorConfig, EstimatorError, RepaymentSchedule,
};

#[derive(Parser)]
#[command(name = "loan_quote")]
#[command(author, version, about = "Estimate loan repayments for a cooperative loan product", long_about = None)]
struct Args {
    /// Product catalog (.json or .csv)
    #[arg(long)]
    products: PathBuf,

    /// Loan product id
    #[arg(long)]
    product: u64,

    /// Principal requested
    #[arg(long)]
    amount: f64,

    /// Tenure in months
    #[arg(long)]
    tenure: u32,

    /// Stated monthly net pay, to check eligibility
    #[arg(long)]
    net_pay: Option<f64>,

    /// Estimator config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the net pay multiple from the config
    #[arg(long)]
    income_multiple: Option<f64>,

    /// Write the month-by-month schedule to this CSV file
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Print the quote as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EstimatorConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EstimatorConfig::default(),
    };
    if let Some(multiple) = args.income_multiple {
        config.income_multiple = multiple;
    }

    let products = load_products(&args.products)
        .with_context(|| format!("failed to load products from {}", args.products.display()))?;
    let product = find_product(&products, args.product)?;
    product.check_amount(args.amount)?;
    product.check_tenure(args.tenure)?;

    let quote = compute_repayment(Some(product), args.amount, args.tenure);
    if !quote.is_finite() {
        return Err(EstimatorError::NonFiniteQuote { months: args.tenure }.into());
    }

    let eligibility = args
        .net_pay
        .map(|net_pay| Eligibility::assess(&quote, net_pay, config.income_multiple));

    if args.json {
        let output = serde_json::json!({
            "product_id": product.id,
            "amount": args.amount,
            "tenure_months": args.tenure,
            "quote": quote,
            "processing_fee": product.processing_fee(args.amount),
            "eligibility": eligibility,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let symbol = config.currency_symbol.as_str();
        println!("{} ({} interest, {} per month)", product.name, product.interest_type, format_rate(product.interest_rate));
        println!("  Principal:        {}", format_currency(args.amount, symbol));
        println!("  Tenure:           {} months", args.tenure);
        println!("  Monthly:          {}", format_currency(quote.monthly, symbol));
        println!("  Total repayment:  {}", format_currency(quote.total, symbol));
        println!("  Total interest:   {}", format_currency(quote.interest, symbol));
        println!("  Processing fee:   {}", format_currency(product.processing_fee(args.amount), symbol));

        if let Some(e) = &eligibility {
            println!("  Required income:  {}", format_currency(e.required_income, symbol));
            if e.qualifies {
                println!("  Eligible:         yes");
            } else {
                println!("  Eligible:         no (short by {})", format_currency(e.shortfall, symbol));
            }
        }
    }

    if let Some(path) = &args.schedule {
        let schedule = RepaymentSchedule::from_quote(&quote, args.tenure, config.tolerance);
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        schedule.write_csv(BufWriter::new(file))?;
        info!("Schedule with {} rows written to {}", schedule.len(), path.display());
    }

    Ok(())
}
