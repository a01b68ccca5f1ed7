use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::RequestContext;
use crate::modules::saft::services::SaftService;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// GET /exports/saft?start_date=&end_date= — SAF-T (AO) XML download
pub async fn export_saft(
    service: web::Data<Arc<SaftService>>,
    ctx: RequestContext,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, AppError> {
    ctx.require_admin()?;

    let xml = service.export(query.start_date, query.end_date).await?;

    let filename = format!(
        "saft-ao-{}-{}.xml",
        query.start_date, query.end_date
    );

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(xml))
}

/// Configure export routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/exports").route("/saft", web::get().to(export_saft)));
}
