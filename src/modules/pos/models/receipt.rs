// Receipt document model.
//
// The POS hands this fully-populated structure to the print/render
// collaborator; no HTML or layout is produced here. Amounts arrive both raw
// (for any downstream arithmetic) and formatted in the Kwanza locale.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::CompanyConfig;
use crate::core::currency::format_kz;
use crate::modules::pos::models::sale::Sale;

/// Label used when a sale has no customer attached
pub const COUNTER_SALE_LABEL: &str = "Venda ao balcão";

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptLine {
    pub product_code: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub unit_price_display: String,
    pub line_total: Decimal,
    pub line_total_display: String,
}

/// Everything the renderer needs to lay out one receipt
#[derive(Debug, Clone, Serialize)]
pub struct SaleReceipt {
    pub company_name: String,
    pub company_nif: String,
    pub company_address: String,
    pub company_city: String,

    pub sale_number: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub cashier_name: String,
    pub customer_name: String,

    pub lines: Vec<ReceiptLine>,

    pub subtotal: Decimal,
    pub subtotal_display: String,
    pub tax: Decimal,
    pub tax_display: String,
    pub total: Decimal,
    pub total_display: String,

    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub amount_received_display: Option<String>,
    pub change_display: Option<String>,
}

impl SaleReceipt {
    /// Pure mapping from a recorded sale to its receipt document. Safe to
    /// call repeatedly; the sale is read, never mutated.
    pub fn build(sale: &Sale, company: &CompanyConfig) -> Self {
        let lines = sale
            .lines
            .iter()
            .map(|line| ReceiptLine {
                product_code: line.product_code.clone(),
                description: line.product_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                unit_price_display: format_kz(line.unit_price),
                line_total: line.line_total,
                line_total_display: format_kz(line.line_total),
            })
            .collect();

        SaleReceipt {
            company_name: company.name.clone(),
            company_nif: company.tax_registration_number.clone(),
            company_address: company.address.clone(),
            company_city: company.city.clone(),
            sale_number: sale.number.clone(),
            issued_at: sale.created_at,
            cashier_name: sale.cashier_name.clone(),
            customer_name: sale
                .customer_name
                .clone()
                .unwrap_or_else(|| COUNTER_SALE_LABEL.to_string()),
            lines,
            subtotal: sale.subtotal,
            subtotal_display: format_kz(sale.subtotal),
            tax: sale.tax,
            tax_display: format_kz(sale.tax),
            total: sale.total,
            total_display: format_kz(sale.total),
            payment_method: sale.payment_method.label().to_string(),
            payment_reference: sale.payment_reference.clone(),
            amount_received_display: sale.amount_received.map(format_kz),
            change_display: sale.change_amount.map(format_kz),
        }
    }
}
