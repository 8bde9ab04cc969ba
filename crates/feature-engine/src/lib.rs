//! Feature Engineering for the Retail Recommendation Pipeline
//!
//! Batch transforms for the articles, customers and transactions datasets.

mod articles;
mod customers;
mod error;
mod frame;
mod transactions;

pub use articles::prepare_articles;
pub use customers::{prepare_customers, AgeGroup, ABSENT_MEMBER_STATUS};
pub use error::FeatureError;
pub use transactions::{
    article_ids_as_str, month_cyclical, prepare_transactions, TransactionDates, MONTH_CYCLE,
};
