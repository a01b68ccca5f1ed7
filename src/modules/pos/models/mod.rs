mod cart;
mod receipt;
mod sale;
mod till_session;

pub use cart::{Cart, CartItem, CartView};
pub use receipt::{ReceiptLine, SaleReceipt, COUNTER_SALE_LABEL};
pub use sale::{
    validate_payment, FinalizeSaleRequest, PaymentMethod, Sale, SaleLine,
};
pub use till_session::{CloseTillRequest, OpenTillRequest, Reconciliation, TillSession, TillStatus};
