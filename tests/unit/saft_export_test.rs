// SAF-T (AO) document assembly and XML rendering.

use botica::modules::pos::models::PaymentMethod;
use botica::modules::saft::models::{
    payment_mechanism, Address, AuditFile, Header, LedgerAccount, MasterFiles, PaymentDocument,
    PaymentLine, Payments, SaftCustomer, SaftProduct, AUDIT_FILE_VERSION, FINAL_CONSUMER_ID,
    FINAL_CONSUMER_TAX_ID,
};
use botica::modules::saft::services::render_xml;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn address() -> Address {
    Address {
        address_detail: "Rua Amílcar Cabral 10".to_string(),
        city: "Luanda".to_string(),
        country: "AO".to_string(),
    }
}

fn audit_file() -> AuditFile {
    AuditFile {
        header: Header {
            audit_file_version: AUDIT_FILE_VERSION.to_string(),
            company_id: "5417000000".to_string(),
            tax_registration_number: "5417000000".to_string(),
            tax_accounting_basis: "F".to_string(),
            company_name: "Farmácia <Central> & Filhos".to_string(),
            company_address: address(),
            fiscal_year: 2026,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            currency_code: "AOA".to_string(),
            date_created: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            product_id: "botica".to_string(),
            product_version: "0.1.0".to_string(),
        },
        master_files: MasterFiles {
            general_ledger_accounts: vec![LedgerAccount {
                account_id: "45".to_string(),
                account_description: "Caixa".to_string(),
            }],
            customers: vec![SaftCustomer {
                customer_id: FINAL_CONSUMER_ID.to_string(),
                account_id: "Desconhecido".to_string(),
                customer_tax_id: FINAL_CONSUMER_TAX_ID.to_string(),
                company_name: "Consumidor Final".to_string(),
                billing_address: address(),
                self_billing_indicator: 0,
            }],
            products: vec![SaftProduct {
                product_type: "P".to_string(),
                product_code: "PARA-500".to_string(),
                product_description: "Paracetamol 500mg".to_string(),
                product_number_code: "PARA-500".to_string(),
            }],
        },
        payments: Payments {
            number_of_entries: 1,
            total_debit: Decimal::ZERO,
            total_credit: Decimal::from(8322),
            payments: vec![PaymentDocument {
                payment_ref_no: "RC VD-000318".to_string(),
                transaction_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                payment_type: "RC".to_string(),
                customer_id: FINAL_CONSUMER_ID.to_string(),
                payment_mechanism: payment_mechanism(PaymentMethod::Cash).to_string(),
                lines: vec![PaymentLine {
                    line_number: 1,
                    credit_amount: Decimal::from(7300),
                    tax_type: "IVA".to_string(),
                    tax_code: "NOR".to_string(),
                    tax_percentage: Decimal::from(14),
                }],
                tax_payable: Decimal::from(1022),
                net_total: Decimal::from(7300),
                gross_total: Decimal::from(8322),
            }],
        },
    }
}

#[test]
fn test_xml_declaration_and_schema_version() {
    let xml = render_xml(&audit_file());

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains("urn:OECD:StandardAuditFile-Tax:AO_1.01_01"));
    assert!(xml.contains("<AuditFileVersion>1.01_01</AuditFileVersion>"));
}

#[test]
fn test_company_name_is_escaped() {
    let xml = render_xml(&audit_file());

    assert!(xml.contains("<CompanyName>Farmácia &lt;Central&gt; &amp; Filhos</CompanyName>"));
    assert!(!xml.contains("<Central>"));
}

#[test]
fn test_payment_document_fields() {
    let xml = render_xml(&audit_file());

    assert!(xml.contains("<PaymentRefNo>RC VD-000318</PaymentRefNo>"));
    assert!(xml.contains("<PaymentMechanism>NU</PaymentMechanism>"));
    assert!(xml.contains("<TaxPercentage>14</TaxPercentage>"));
    assert!(xml.contains("<GrossTotal>8322</GrossTotal>"));
    assert!(xml.contains("<CustomerTaxID>999999999</CustomerTaxID>"));
}

#[test]
fn test_mechanism_mapping_is_total() {
    assert_eq!(payment_mechanism(PaymentMethod::Cash), "NU");
    assert_eq!(payment_mechanism(PaymentMethod::Card), "CC");
    assert_eq!(payment_mechanism(PaymentMethod::Transfer), "TB");
    assert_eq!(payment_mechanism(PaymentMethod::MobileMoney), "OU");
}

#[test]
fn test_rendering_is_deterministic() {
    let file = audit_file();
    assert_eq!(render_xml(&file), render_xml(&file));
}
