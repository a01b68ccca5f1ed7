use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::AppError;

/// Who is making the request. Staff principals come from back-office
/// accounts, `Customer` from storefront accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    Admin,
    Pharmacist,
    Cashier,
    Customer,
}

impl Principal {
    pub fn is_staff(&self) -> bool {
        matches!(self, Principal::Admin | Principal::Pharmacist | Principal::Cashier)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Principal::Admin => "admin",
            Principal::Pharmacist => "pharmacist",
            Principal::Cashier => "cashier",
            Principal::Customer => "customer",
        }
    }
}

impl std::str::FromStr for Principal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Principal::Admin),
            "pharmacist" => Ok(Principal::Pharmacist),
            "cashier" => Ok(Principal::Cashier),
            "customer" => Ok(Principal::Customer),
            _ => Err(format!("Invalid principal role: {}", s)),
        }
    }
}

/// Request-scoped identity, resolved from the session token by the auth
/// middleware and passed explicitly into handlers. Nothing reads ambient
/// global state.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Staff user id or customer id, depending on the principal
    pub subject_id: String,
    /// Name shown on receipts and reports ("Atendido por ...")
    pub display_name: String,
    pub principal: Principal,
}

impl RequestContext {
    /// Guard for back-office endpoints
    pub fn require_staff(&self) -> crate::core::Result<()> {
        if self.principal.is_staff() {
            Ok(())
        } else {
            Err(AppError::forbidden("staff account required"))
        }
    }

    /// Guard for admin-only endpoints (user management, product edits)
    pub fn require_admin(&self) -> crate::core::Result<()> {
        if self.principal == Principal::Admin {
            Ok(())
        } else {
            Err(AppError::forbidden("admin account required"))
        }
    }

    /// Guard for storefront endpoints acting on the caller's own data
    pub fn require_customer(&self) -> crate::core::Result<()> {
        if self.principal == Principal::Customer {
            Ok(())
        } else {
            Err(AppError::forbidden("customer account required"))
        }
    }
}

impl FromRequest for RequestContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let ctx = req.extensions().get::<RequestContext>().cloned();
        ready(ctx.ok_or_else(|| AppError::unauthorized("missing session")))
    }
}
