use crate::auth::AdminSession;
use crate::error::AppError;
use crate::models::hotel::{normalize_tiers, CreateHotel, Hotel, HotelSearch, UpdateHotel};
use crate::response;
use actix_web::{web, HttpResponse};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

pub async fn get_hotels(
    pool: web::Data<SqlitePool>,
    params: web::Query<HotelSearch>,
) -> Result<HttpResponse, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM hotels WHERE is_active = 1");

    if let Some(destination) = &params.destination {
        query
            .push(" AND destination LIKE ")
            .push_bind(format!("%{destination}%"));
    }

    if let Some(tier) = params.tier {
        query
            .push(" AND EXISTS (SELECT 1 FROM json_each(hotels.tiers) WHERE json_each.value = ")
            .push_bind(tier)
            .push(")");
    }

    query.push(" ORDER BY rating DESC, id ASC");

    let hotels = query
        .build_query_as::<Hotel>()
        .fetch_all(pool.get_ref())
        .await?;

    Ok(response::ok(hotels))
}

pub async fn get_all_hotels(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let hotels = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY id DESC")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(response::ok(hotels))
}

pub async fn get_hotel_by_id(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Hotel"))?;

    Ok(response::ok(hotel))
}

pub async fn create_hotel(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateHotel>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let body = body.into_inner();

    let hotel = sqlx::query_as::<_, Hotel>(
        r#"
        INSERT INTO hotels (name, destination, tiers, images, amenities, rating, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&body.name)
    .bind(&body.destination)
    .bind(Json(normalize_tiers(body.tiers)))
    .bind(Json(body.images))
    .bind(Json(body.amenities))
    .bind(body.rating)
    .bind(body.is_active)
    .fetch_one(pool.get_ref())
    .await?;

    log::info!("{} created hotel {} ({})", admin.email, hotel.id, hotel.name);
    Ok(response::created(hotel))
}

pub async fn update_hotel(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateHotel>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let id = path.into_inner();
    let body = body.into_inner();

    let hotel = sqlx::query_as::<_, Hotel>(
        r#"
        UPDATE hotels SET
            name = COALESCE(?, name),
            destination = COALESCE(?, destination),
            tiers = COALESCE(?, tiers),
            images = COALESCE(?, images),
            amenities = COALESCE(?, amenities),
            rating = COALESCE(?, rating),
            is_active = COALESCE(?, is_active),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(body.name)
    .bind(body.destination)
    .bind(body.tiers.map(|t| Json(normalize_tiers(t))))
    .bind(body.images.map(Json))
    .bind(body.amenities.map(Json))
    .bind(body.rating)
    .bind(body.is_active)
    .bind(id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| AppError::not_found("Hotel"))?;

    log::info!("{} updated hotel {}", admin.email, id);
    Ok(response::ok(hotel))
}

pub async fn delete_hotel(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM hotels WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Hotel"));
    }

    log::info!("{} deleted hotel {}", admin.email, id);
    Ok(response::message("Hotel deleted"))
}
