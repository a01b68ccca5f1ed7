mod audit_file;

pub use audit_file::{
    payment_mechanism, Address, AuditFile, Header, LedgerAccount, MasterFiles, PaymentDocument,
    PaymentLine, Payments, SaftCustomer, SaftProduct, AUDIT_FILE_VERSION, FINAL_CONSUMER_ID,
    FINAL_CONSUMER_TAX_ID,
};
