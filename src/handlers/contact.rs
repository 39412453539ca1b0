use actix_web::{web, HttpResponse};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::auth::AdminSession;
use crate::error::AppError;
use crate::models::inquiry::{CreateInquiry, Inquiry, InquiryFilter, UpdateInquiryStatus};
use crate::response;

pub async fn submit_inquiry(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateInquiry>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    let inquiry = sqlx::query_as::<_, Inquiry>(
        r#"
        INSERT INTO inquiries (name, email, phone, subject, message, status)
        VALUES (?, ?, ?, ?, ?, 'New')
        RETURNING *
        "#,
    )
    .bind(&body.name)
    .bind(&body.email)
    .bind(&body.phone)
    .bind(&body.subject)
    .bind(&body.message)
    .fetch_one(pool.get_ref())
    .await?;

    log::info!("Inquiry {} received from {}", inquiry.id, inquiry.email);
    Ok(response::created(inquiry))
}

pub async fn get_inquiries(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
    params: web::Query<InquiryFilter>,
) -> Result<HttpResponse, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM inquiries");

    if let Some(status) = params.status {
        query.push(" WHERE status = ").push_bind(status);
    }

    query.push(" ORDER BY created_at DESC, id DESC");

    let inquiries = query
        .build_query_as::<Inquiry>()
        .fetch_all(pool.get_ref())
        .await?;

    Ok(response::ok(inquiries))
}

pub async fn get_inquiry(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let inquiry = sqlx::query_as::<_, Inquiry>("SELECT * FROM inquiries WHERE id = ?")
        .bind(path.into_inner())
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Inquiry"))?;

    Ok(response::ok(inquiry))
}

pub async fn update_inquiry_status(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateInquiryStatus>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let inquiry =
        sqlx::query_as::<_, Inquiry>("UPDATE inquiries SET status = ? WHERE id = ? RETURNING *")
            .bind(body.status)
            .bind(id)
            .fetch_optional(pool.get_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Inquiry"))?;

    log::info!("{} marked inquiry {} as {:?}", admin.email, id, inquiry.status);
    Ok(response::ok(inquiry))
}

pub async fn delete_inquiry(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM inquiries WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Inquiry"));
    }

    log::info!("{} deleted inquiry {}", admin.email, id);
    Ok(response::message("Inquiry deleted"))
}
