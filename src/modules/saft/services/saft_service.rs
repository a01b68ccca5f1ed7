// SAF-T (AO) export: builds the audit-file document for a period and
// serializes it to XML. The mapping is mechanical; what each field means is
// defined by the tax authority schema, not here.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::CompanyConfig;
use crate::core::{AppError, Result};
use crate::modules::saft::models::{
    payment_mechanism, Address, AuditFile, Header, LedgerAccount, MasterFiles, PaymentDocument,
    PaymentLine, Payments, SaftCustomer, SaftProduct, AUDIT_FILE_VERSION, FINAL_CONSUMER_ID,
    FINAL_CONSUMER_TAX_ID,
};
use crate::modules::saft::repositories::ExportRepository;

const XML_NAMESPACE: &str = "urn:OECD:StandardAuditFile-Tax:AO_1.01_01";

pub struct SaftService {
    export_repo: ExportRepository,
    company: CompanyConfig,
    max_range_days: i64,
}

impl SaftService {
    pub fn new(
        export_repo: ExportRepository,
        company: CompanyConfig,
        max_range_days: i64,
    ) -> Self {
        Self {
            export_repo,
            company,
            max_range_days,
        }
    }

    /// Build and serialize the export for an inclusive date range
    pub async fn export(&self, start: NaiveDate, end: NaiveDate) -> Result<String> {
        self.validate_range(start, end)?;

        let audit_file = self.build(start, end).await?;
        let xml = render_xml(&audit_file);

        info!(
            start = %start,
            end = %end,
            payments = audit_file.payments.number_of_entries,
            "SAF-T export generated"
        );

        Ok(xml)
    }

    fn validate_range(&self, start: NaiveDate, end: NaiveDate) -> Result<()> {
        if start > end {
            return Err(AppError::validation(
                "start_date must be before or equal to end_date",
            ));
        }
        if (end - start).num_days() > self.max_range_days {
            return Err(AppError::validation(format!(
                "Date range too large (maximum {} days)",
                self.max_range_days
            )));
        }
        Ok(())
    }

    /// Assemble the document model from the stores
    pub async fn build(&self, start: NaiveDate, end: NaiveDate) -> Result<AuditFile> {
        let header = Header {
            audit_file_version: AUDIT_FILE_VERSION.to_string(),
            company_id: self.company.tax_registration_number.clone(),
            tax_registration_number: self.company.tax_registration_number.clone(),
            tax_accounting_basis: "F".to_string(),
            company_name: self.company.name.clone(),
            company_address: Address {
                address_detail: self.company.address.clone(),
                city: self.company.city.clone(),
                country: "AO".to_string(),
            },
            fiscal_year: start.year(),
            start_date: start,
            end_date: end,
            currency_code: "AOA".to_string(),
            date_created: Utc::now().date_naive(),
            product_id: "botica".to_string(),
            product_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        // Final-consumer stub first, then every known customer
        let mut customers = vec![SaftCustomer {
            customer_id: FINAL_CONSUMER_ID.to_string(),
            account_id: "Desconhecido".to_string(),
            customer_tax_id: FINAL_CONSUMER_TAX_ID.to_string(),
            company_name: "Consumidor Final".to_string(),
            billing_address: Address {
                address_detail: "Desconhecido".to_string(),
                city: "Desconhecido".to_string(),
                country: "AO".to_string(),
            },
            self_billing_indicator: 0,
        }];

        for customer in self.export_repo.all_customers().await? {
            customers.push(SaftCustomer {
                customer_id: customer.id.clone(),
                account_id: "Desconhecido".to_string(),
                // Customer NIFs are not collected at registration
                customer_tax_id: FINAL_CONSUMER_TAX_ID.to_string(),
                company_name: customer.name,
                billing_address: Address {
                    address_detail: customer.street.unwrap_or_else(|| "Desconhecido".to_string()),
                    city: customer.city.unwrap_or_else(|| "Desconhecido".to_string()),
                    country: "AO".to_string(),
                },
                self_billing_indicator: 0,
            });
        }

        let products = self
            .export_repo
            .all_products()
            .await?
            .into_iter()
            .map(|product| SaftProduct {
                product_type: "P".to_string(),
                product_code: product.code.clone(),
                product_description: product.name,
                product_number_code: product.code,
            })
            .collect();

        let master_files = MasterFiles {
            general_ledger_accounts: vec![
                LedgerAccount {
                    account_id: "45".to_string(),
                    account_description: "Caixa".to_string(),
                },
                LedgerAccount {
                    account_id: "61".to_string(),
                    account_description: "Vendas".to_string(),
                },
            ],
            customers,
            products,
        };

        let sales = self.export_repo.sales_between(start, end).await?;

        let mut total_credit = Decimal::ZERO;
        let mut payments = Vec::with_capacity(sales.len());

        for sale in &sales {
            total_credit += sale.total;

            payments.push(PaymentDocument {
                payment_ref_no: format!("RC {}", sale.number),
                transaction_date: sale.created_at.date_naive(),
                payment_type: "RC".to_string(),
                customer_id: sale
                    .customer_id
                    .clone()
                    .unwrap_or_else(|| FINAL_CONSUMER_ID.to_string()),
                payment_mechanism: payment_mechanism(sale.payment_method).to_string(),
                lines: vec![PaymentLine {
                    line_number: 1,
                    credit_amount: sale.subtotal,
                    tax_type: "IVA".to_string(),
                    tax_code: "NOR".to_string(),
                    tax_percentage: Decimal::from(14),
                }],
                tax_payable: sale.tax,
                net_total: sale.subtotal,
                gross_total: sale.total,
            });
        }

        Ok(AuditFile {
            header,
            master_files,
            payments: Payments {
                number_of_entries: payments.len(),
                total_debit: Decimal::ZERO,
                total_credit,
                payments,
            },
        })
    }
}

/// Serialize the audit file to UTF-8 XML
pub fn render_xml(file: &AuditFile) -> String {
    let mut xml = XmlWriter::new();

    xml.raw(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.raw(&format!(r#"<AuditFile xmlns="{}">"#, XML_NAMESPACE));

    let h = &file.header;
    xml.open("Header");
    xml.leaf("AuditFileVersion", &h.audit_file_version);
    xml.leaf("CompanyID", &h.company_id);
    xml.leaf("TaxRegistrationNumber", &h.tax_registration_number);
    xml.leaf("TaxAccountingBasis", &h.tax_accounting_basis);
    xml.leaf("CompanyName", &h.company_name);
    xml.open("CompanyAddress");
    xml.leaf("AddressDetail", &h.company_address.address_detail);
    xml.leaf("City", &h.company_address.city);
    xml.leaf("Country", &h.company_address.country);
    xml.close("CompanyAddress");
    xml.leaf("FiscalYear", &h.fiscal_year.to_string());
    xml.leaf("StartDate", &h.start_date.to_string());
    xml.leaf("EndDate", &h.end_date.to_string());
    xml.leaf("CurrencyCode", &h.currency_code);
    xml.leaf("DateCreated", &h.date_created.to_string());
    xml.leaf("ProductID", &h.product_id);
    xml.leaf("ProductVersion", &h.product_version);
    xml.close("Header");

    xml.open("MasterFiles");
    xml.open("GeneralLedgerAccounts");
    for account in &file.master_files.general_ledger_accounts {
        xml.open("Account");
        xml.leaf("AccountID", &account.account_id);
        xml.leaf("AccountDescription", &account.account_description);
        xml.close("Account");
    }
    xml.close("GeneralLedgerAccounts");
    for customer in &file.master_files.customers {
        xml.open("Customer");
        xml.leaf("CustomerID", &customer.customer_id);
        xml.leaf("AccountID", &customer.account_id);
        xml.leaf("CustomerTaxID", &customer.customer_tax_id);
        xml.leaf("CompanyName", &customer.company_name);
        xml.open("BillingAddress");
        xml.leaf("AddressDetail", &customer.billing_address.address_detail);
        xml.leaf("City", &customer.billing_address.city);
        xml.leaf("Country", &customer.billing_address.country);
        xml.close("BillingAddress");
        xml.leaf(
            "SelfBillingIndicator",
            &customer.self_billing_indicator.to_string(),
        );
        xml.close("Customer");
    }
    for product in &file.master_files.products {
        xml.open("Product");
        xml.leaf("ProductType", &product.product_type);
        xml.leaf("ProductCode", &product.product_code);
        xml.leaf("ProductDescription", &product.product_description);
        xml.leaf("ProductNumberCode", &product.product_number_code);
        xml.close("Product");
    }
    xml.close("MasterFiles");

    xml.open("SourceDocuments");
    xml.open("Payments");
    xml.leaf(
        "NumberOfEntries",
        &file.payments.number_of_entries.to_string(),
    );
    xml.leaf("TotalDebit", &file.payments.total_debit.to_string());
    xml.leaf("TotalCredit", &file.payments.total_credit.to_string());
    for payment in &file.payments.payments {
        xml.open("Payment");
        xml.leaf("PaymentRefNo", &payment.payment_ref_no);
        xml.leaf("TransactionDate", &payment.transaction_date.to_string());
        xml.leaf("PaymentType", &payment.payment_type);
        xml.leaf("CustomerID", &payment.customer_id);
        xml.open("PaymentMethod");
        xml.leaf("PaymentMechanism", &payment.payment_mechanism);
        xml.close("PaymentMethod");
        for line in &payment.lines {
            xml.open("Line");
            xml.leaf("LineNumber", &line.line_number.to_string());
            xml.leaf("CreditAmount", &line.credit_amount.to_string());
            xml.open("Tax");
            xml.leaf("TaxType", &line.tax_type);
            xml.leaf("TaxCode", &line.tax_code);
            xml.leaf("TaxPercentage", &line.tax_percentage.to_string());
            xml.close("Tax");
            xml.close("Line");
        }
        xml.open("DocumentTotals");
        xml.leaf("TaxPayable", &payment.tax_payable.to_string());
        xml.leaf("NetTotal", &payment.net_total.to_string());
        xml.leaf("GrossTotal", &payment.gross_total.to_string());
        xml.close("DocumentTotals");
        xml.close("Payment");
    }
    xml.close("Payments");
    xml.close("SourceDocuments");

    xml.raw("</AuditFile>");

    xml.finish()
}

/// Minimal element writer; the schema needs nothing fancier
struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        XmlWriter {
            buf: String::new(),
            depth: 0,
        }
    }

    fn raw(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    fn leaf(&mut self, tag: &str, value: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
        self.buf.push_str(&escape(value));
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Farmácia & Cia <Lda>"), "Farmácia &amp; Cia &lt;Lda&gt;");
    }

    #[test]
    fn test_render_minimal_file() {
        let file = AuditFile {
            header: Header {
                audit_file_version: AUDIT_FILE_VERSION.to_string(),
                company_id: "5417000000".to_string(),
                tax_registration_number: "5417000000".to_string(),
                tax_accounting_basis: "F".to_string(),
                company_name: "Farmácia Central".to_string(),
                company_address: Address {
                    address_detail: "Rua Amílcar Cabral 10".to_string(),
                    city: "Luanda".to_string(),
                    country: "AO".to_string(),
                },
                fiscal_year: 2026,
                start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
                currency_code: "AOA".to_string(),
                date_created: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                product_id: "botica".to_string(),
                product_version: "0.1.0".to_string(),
            },
            master_files: MasterFiles {
                general_ledger_accounts: vec![],
                customers: vec![],
                products: vec![],
            },
            payments: Payments {
                number_of_entries: 0,
                total_debit: Decimal::ZERO,
                total_credit: Decimal::ZERO,
                payments: vec![],
            },
        };

        let xml = render_xml(&file);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<AuditFileVersion>1.01_01</AuditFileVersion>"));
        assert!(xml.contains("<CurrencyCode>AOA</CurrencyCode>"));
        assert!(xml.contains("<NumberOfEntries>0</NumberOfEntries>"));
        assert!(xml.trim_end().ends_with("</AuditFile>"));
    }
}
