use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::RequestContext;
use crate::modules::reports::services::ReportService;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_top")]
    pub top: i64,
}

fn default_top() -> i64 {
    5
}

/// GET /reports/closings/{session_id} — closing report (reprint-safe)
pub async fn closing_report(
    service: web::Data<Arc<ReportService>>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let report = service.closing_report(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/sales-summary?start_date=&end_date=&top=
pub async fn sales_summary(
    service: web::Data<Arc<ReportService>>,
    ctx: RequestContext,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_staff()?;

    let summary = service
        .summarize(query.start_date, query.end_date, query.top)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/closings/{session_id}", web::get().to(closing_report))
            .route("/sales-summary", web::get().to(sales_summary)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_top() {
        assert_eq!(default_top(), 5);
    }
}
