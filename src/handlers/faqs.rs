use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::{SqliteConnection, SqlitePool};
use validator::Validate;

use crate::auth::AdminSession;
use crate::error::AppError;
use crate::models::faq::{
    is_permutation, move_adjacent, CreateFaq, Direction, Faq, ReorderFaqs, UpdateFaq,
};
use crate::response;

#[derive(Deserialize)]
pub struct MoveFaq {
    pub direction: Direction,
}

async fn ordered_faqs(conn: &mut SqliteConnection) -> Result<Vec<Faq>, AppError> {
    let faqs = sqlx::query_as::<_, Faq>(
        "SELECT id, question, answer, is_active, sort_order FROM faqs ORDER BY sort_order ASC, id ASC",
    )
    .fetch_all(conn)
    .await?;
    Ok(faqs)
}

async fn write_order(conn: &mut SqliteConnection, ids: &[i64]) -> Result<(), AppError> {
    for (position, id) in ids.iter().enumerate() {
        sqlx::query("UPDATE faqs SET sort_order = ? WHERE id = ?")
            .bind(position as i64)
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

pub async fn get_faqs(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let faqs = sqlx::query_as::<_, Faq>(
        "SELECT id, question, answer, is_active, sort_order FROM faqs WHERE is_active = 1 ORDER BY sort_order ASC, id ASC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(response::ok(faqs))
}

pub async fn get_all_faqs(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    Ok(response::ok(ordered_faqs(&mut conn).await?))
}

pub async fn create_faq(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateFaq>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    let faq = sqlx::query_as::<_, Faq>(
        r#"
        INSERT INTO faqs (question, answer, is_active, sort_order)
        VALUES (?, ?, ?, (SELECT COALESCE(MAX(sort_order), -1) + 1 FROM faqs))
        RETURNING id, question, answer, is_active, sort_order
        "#,
    )
    .bind(&body.question)
    .bind(&body.answer)
    .bind(body.is_active)
    .fetch_one(pool.get_ref())
    .await?;

    log::info!("{} created FAQ {}", admin.email, faq.id);
    Ok(response::created(faq))
}

pub async fn update_faq(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateFaq>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let id = path.into_inner();
    let body = body.into_inner();

    let faq = sqlx::query_as::<_, Faq>(
        r#"
        UPDATE faqs SET
            question = COALESCE(?, question),
            answer = COALESCE(?, answer),
            is_active = COALESCE(?, is_active)
        WHERE id = ?
        RETURNING id, question, answer, is_active, sort_order
        "#,
    )
    .bind(body.question)
    .bind(body.answer)
    .bind(body.is_active)
    .bind(id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| AppError::not_found("FAQ"))?;

    log::info!("{} updated FAQ {}", admin.email, id);
    Ok(response::ok(faq))
}

pub async fn delete_faq(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM faqs WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("FAQ"));
    }

    log::info!("{} deleted FAQ {}", admin.email, id);
    Ok(response::message("FAQ deleted"))
}

/// Rewrites the whole FAQ order. `ids` must name every FAQ exactly once.
pub async fn reorder_faqs(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    body: web::Json<ReorderFaqs>,
) -> Result<HttpResponse, AppError> {
    let mut tx = pool.begin().await?;

    let existing: Vec<i64> = ordered_faqs(&mut tx).await?.iter().map(|f| f.id).collect();
    if !is_permutation(&existing, &body.ids) {
        log::warn!("Rejected FAQ reorder from {}: id set mismatch", admin.email);
        return Err(AppError::Conflict(
            "Reorder must list every FAQ exactly once".to_string(),
        ));
    }

    write_order(&mut tx, &body.ids).await?;
    let faqs = ordered_faqs(&mut tx).await?;

    tx.commit().await?;

    log::info!("{} reordered {} FAQs", admin.email, faqs.len());
    Ok(response::ok(faqs))
}

pub async fn move_faq(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<MoveFaq>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let mut tx = pool.begin().await?;

    let ids: Vec<i64> = ordered_faqs(&mut tx).await?.iter().map(|f| f.id).collect();
    let index = ids
        .iter()
        .position(|existing| *existing == id)
        .ok_or_else(|| AppError::not_found("FAQ"))?;

    let moved = move_adjacent(&ids, index, body.direction).ok_or_else(|| {
        AppError::BadRequest("FAQ is already at the end of the list".to_string())
    })?;

    write_order(&mut tx, &moved).await?;
    let faqs = ordered_faqs(&mut tx).await?;

    tx.commit().await?;

    log::info!("{} moved FAQ {} {:?}", admin.email, id, body.direction);
    Ok(response::ok(faqs))
}
