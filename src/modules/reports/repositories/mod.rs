mod sales_store;

pub use sales_store::{MySqlSalesStore, RangeTotals, SalesStore, TopProductRow};
