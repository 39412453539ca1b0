use actix_web::{web, HttpResponse};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::auth::AdminSession;
use crate::error::AppError;
use crate::models::package::{
    sorted_itinerary, CreatePackage, Package, PackageFilter, QuoteQuery, UpdatePackage,
};
use crate::pricing;
use crate::response;

pub(crate) async fn find_package(pool: &SqlitePool, id: i64) -> Result<Package, AppError> {
    sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Package"))
}

pub async fn get_packages(
    pool: web::Data<SqlitePool>,
    params: web::Query<PackageFilter>,
) -> Result<HttpResponse, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM packages WHERE is_active = 1");

    if let Some(destination) = &params.destination {
        query
            .push(" AND destination LIKE ")
            .push_bind(format!("%{destination}%"));
    }

    if let Some(tier) = params.tier {
        query.push(" AND tier = ").push_bind(tier);
    }

    query.push(" ORDER BY price ASC, id ASC");

    let packages = query
        .build_query_as::<Package>()
        .fetch_all(pool.get_ref())
        .await?;

    Ok(response::ok(packages))
}

pub async fn get_all_packages(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let packages = sqlx::query_as::<_, Package>("SELECT * FROM packages ORDER BY id DESC")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(response::ok(packages))
}

pub async fn get_package_by_id(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let package = find_package(pool.get_ref(), path.into_inner()).await?;
    Ok(response::ok(package))
}

pub async fn get_quote(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    params: web::Query<QuoteQuery>,
) -> Result<HttpResponse, AppError> {
    if params.travelers == 0 {
        return Err(AppError::BadRequest(
            "travelers must be at least 1".to_string(),
        ));
    }

    let package = find_package(pool.get_ref(), path.into_inner()).await?;
    let quote = pricing::quote(
        package.price,
        package.original_price,
        params.travelers,
        &package.group_size,
    );

    Ok(response::ok(quote))
}

pub async fn create_package(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreatePackage>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let body = body.into_inner();

    let package = sqlx::query_as::<_, Package>(
        r#"
        INSERT INTO packages (name, destination, tier, price, original_price, duration, group_size, description, itinerary, images, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&body.name)
    .bind(&body.destination)
    .bind(body.tier)
    .bind(body.price)
    .bind(body.original_price.is_some())
    .bind(body.original_price)
    .bind(&body.duration)
    .bind(&body.group_size)
    .bind(&body.description)
    .bind(Json(sorted_itinerary(body.itinerary)))
    .bind(Json(body.images))
    .bind(body.is_active)
    .fetch_one(pool.get_ref())
    .await?;

    log::info!("{} created package {} ({})", admin.email, package.id, package.name);
    Ok(response::created(package))
}

pub async fn update_package(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdatePackage>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let id = path.into_inner();
    let body = body.into_inner();

    let package = sqlx::query_as::<_, Package>(
        r#"
        UPDATE packages SET
            name = COALESCE(?, name),
            destination = COALESCE(?, destination),
            tier = COALESCE(?, tier),
            price = COALESCE(?, price),
            original_price = CASE WHEN ? THEN ? ELSE original_price END,
            duration = COALESCE(?, duration),
            group_size = COALESCE(?, group_size),
            description = COALESCE(?, description),
            itinerary = COALESCE(?, itinerary),
            images = COALESCE(?, images),
            is_active = COALESCE(?, is_active),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(body.name)
    .bind(body.destination)
    .bind(body.tier)
    .bind(body.price)
    .bind(body.original_price.is_some())
    .bind(body.original_price.flatten())
    .bind(body.duration)
    .bind(body.group_size)
    .bind(body.description)
    .bind(body.itinerary.map(|days| Json(sorted_itinerary(days))))
    .bind(body.images.map(Json))
    .bind(body.is_active)
    .bind(id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| AppError::not_found("Package"))?;

    log::info!("{} updated package {}", admin.email, id);
    Ok(response::ok(package))
}

pub async fn delete_package(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM packages WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Package"));
    }

    log::info!("{} deleted package {}", admin.email, id);
    Ok(response::message("Package deleted"))
}
