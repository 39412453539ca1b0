use actix_web::{web, HttpResponse};
use sqlx::types::Json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::AdminSession;
use crate::error::AppError;
use crate::models::destination::{CreateDestination, Destination, UpdateDestination};
use crate::response;

pub async fn get_destinations(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let destinations = sqlx::query_as::<_, Destination>(
        "SELECT * FROM destinations WHERE is_active = 1 ORDER BY name ASC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(response::ok(destinations))
}

pub async fn get_all_destinations(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let destinations =
        sqlx::query_as::<_, Destination>("SELECT * FROM destinations ORDER BY id DESC")
            .fetch_all(pool.get_ref())
            .await?;

    Ok(response::ok(destinations))
}

pub async fn get_destination_by_id(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let destination = sqlx::query_as::<_, Destination>("SELECT * FROM destinations WHERE id = ?")
        .bind(path.into_inner())
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Destination"))?;

    Ok(response::ok(destination))
}

pub async fn create_destination(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateDestination>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let body = body.into_inner();

    let destination = sqlx::query_as::<_, Destination>(
        r#"
        INSERT INTO destinations (name, description, tags, hero_image, best_time, must_visit, tips, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&body.name)
    .bind(&body.description)
    .bind(Json(body.tags))
    .bind(body.hero_image.is_some())
    .bind(body.hero_image)
    .bind(body.best_time.is_some())
    .bind(body.best_time)
    .bind(body.must_visit.is_some())
    .bind(body.must_visit)
    .bind(body.tips.is_some())
    .bind(body.tips)
    .bind(body.is_active)
    .fetch_one(pool.get_ref())
    .await?;

    log::info!("{} created destination {} ({})", admin.email, destination.id, destination.name);
    Ok(response::created(destination))
}

pub async fn update_destination(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateDestination>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let id = path.into_inner();
    let body = body.into_inner();

    let destination = sqlx::query_as::<_, Destination>(
        r#"
        UPDATE destinations SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            tags = COALESCE(?, tags),
            hero_image = CASE WHEN ? THEN ? ELSE hero_image END,
            best_time = CASE WHEN ? THEN ? ELSE best_time END,
            must_visit = CASE WHEN ? THEN ? ELSE must_visit END,
            tips = CASE WHEN ? THEN ? ELSE tips END,
            is_active = COALESCE(?, is_active),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(body.name)
    .bind(body.description)
    .bind(body.tags.map(Json))
    .bind(body.hero_image.is_some())
    .bind(body.hero_image.flatten())
    .bind(body.best_time.is_some())
    .bind(body.best_time.flatten())
    .bind(body.must_visit.is_some())
    .bind(body.must_visit.flatten())
    .bind(body.tips.is_some())
    .bind(body.tips.flatten())
    .bind(body.is_active)
    .bind(id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| AppError::not_found("Destination"))?;

    log::info!("{} updated destination {}", admin.email, id);
    Ok(response::ok(destination))
}

pub async fn delete_destination(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM destinations WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Destination"));
    }

    log::info!("{} deleted destination {}", admin.email, id);
    Ok(response::message("Destination deleted"))
}
