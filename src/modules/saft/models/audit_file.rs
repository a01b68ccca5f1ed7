// SAF-T (AO) document model.
//
// A pragmatic subset of the Angolan tax authority schema, version 1.01_01:
// header with the company identity, master files (chart-of-accounts stub,
// customers, products) and the period's sales represented as payment
// documents. Field mapping only; the schema itself is an external contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::modules::pos::models::PaymentMethod;

/// Schema version stamped into the header
pub const AUDIT_FILE_VERSION: &str = "1.01_01";

/// Placeholder identity for sales without a customer record
pub const FINAL_CONSUMER_ID: &str = "CF";
pub const FINAL_CONSUMER_TAX_ID: &str = "999999999";

#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub address_detail: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub audit_file_version: String,
    pub company_id: String,
    pub tax_registration_number: String,
    /// "F" — invoicing data issued by the taxpayer
    pub tax_accounting_basis: String,
    pub company_name: String,
    pub company_address: Address,
    pub fiscal_year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub currency_code: String,
    pub date_created: NaiveDate,
    pub product_id: String,
    pub product_version: String,
}

/// Chart-of-accounts stub entry
#[derive(Debug, Clone, Serialize)]
pub struct LedgerAccount {
    pub account_id: String,
    pub account_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaftCustomer {
    pub customer_id: String,
    pub account_id: String,
    pub customer_tax_id: String,
    pub company_name: String,
    pub billing_address: Address,
    pub self_billing_indicator: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaftProduct {
    /// "P" — product (not service)
    pub product_type: String,
    pub product_code: String,
    pub product_description: String,
    pub product_number_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MasterFiles {
    pub general_ledger_accounts: Vec<LedgerAccount>,
    pub customers: Vec<SaftCustomer>,
    pub products: Vec<SaftProduct>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentLine {
    pub line_number: usize,
    pub credit_amount: Decimal,
    pub tax_type: String,
    pub tax_code: String,
    pub tax_percentage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDocument {
    /// "RC <sale number>"
    pub payment_ref_no: String,
    pub transaction_date: NaiveDate,
    /// "RC" — receipt
    pub payment_type: String,
    pub customer_id: String,
    pub payment_mechanism: String,
    pub lines: Vec<PaymentLine>,
    pub tax_payable: Decimal,
    pub net_total: Decimal,
    pub gross_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Payments {
    pub number_of_entries: usize,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub payments: Vec<PaymentDocument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditFile {
    pub header: Header,
    pub master_files: MasterFiles,
    pub payments: Payments,
}

/// SAF-T payment mechanism code for a tender type
pub fn payment_mechanism(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "NU",
        PaymentMethod::Card => "CC",
        PaymentMethod::Transfer => "TB",
        PaymentMethod::MobileMoney => "OU",
    }
}
