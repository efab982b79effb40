//! Loan product catalog: product terms and catalog loading

mod data;
pub mod loader;

pub use data::{LoanProduct, InterestType};
pub use loader::{
    load_products, load_products_from_json_reader, load_products_from_csv_reader, find_product,
};
