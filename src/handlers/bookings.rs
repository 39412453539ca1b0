use crate::auth::AdminSession;
use crate::error::AppError;
use crate::models::booking::{
    new_reference, refund_outcome, Booking, BookingAccess, BookingFilter, BookingStatus,
    CancellationRequest, CreateBooking, RefundBooking, UpdateBookingStatus,
};
use crate::models::package::Package;
use crate::payments::to_minor_units;
use crate::pricing;
use crate::response;
use actix_web::{web, HttpResponse};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use validator::Validate;

pub(crate) async fn fetch_booking(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Booking, AppError> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))
}

/// Loads a booking for a customer who must present its reference.
/// A wrong reference looks exactly like a missing booking.
pub(crate) async fn fetch_owned_booking(
    conn: &mut SqliteConnection,
    id: i64,
    reference: &str,
) -> Result<Booking, AppError> {
    let booking = fetch_booking(conn, id).await?;
    if !booking.reference_matches(reference) {
        log::warn!("Booking {id} requested with a wrong reference");
        return Err(AppError::not_found("Booking"));
    }
    Ok(booking)
}

pub async fn create_booking(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateBooking>,
) -> Result<HttpResponse, AppError> {
    // 1. Basic input validation
    body.validate()?;

    let today = chrono::Utc::now().naive_utc().date();
    if body.trip_date < today {
        return Err(AppError::BadRequest(
            "Trip date cannot be in the past".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    // 2. The package decides the price, whatever the client thinks it is
    let package = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = ?")
        .bind(body.package_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Package"))?;

    if !package.is_active {
        return Err(AppError::BadRequest(
            "Package is not available for booking".to_string(),
        ));
    }

    let quote = pricing::quote(
        package.price,
        package.original_price,
        body.travelers,
        &package.group_size,
    );

    // 3. Insert as pending until the gateway confirms payment
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (reference, package_id, package_name, customer_name, email, phone, trip_date, travelers, total_price, special_requests, status, payment_status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', 'pending')
        RETURNING *
        "#,
    )
    .bind(new_reference())
    .bind(package.id)
    .bind(&package.name)
    .bind(&body.customer_name)
    .bind(&body.email)
    .bind(&body.phone)
    .bind(body.trip_date)
    .bind(i64::from(body.travelers))
    .bind(quote.total_price)
    .bind(&body.special_requests)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    log::info!(
        "Booking {} created for package {} ({} travelers, total {})",
        booking.id,
        package.id,
        booking.travelers,
        booking.total_price
    );

    Ok(response::created(booking))
}

pub async fn get_bookings(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
    params: web::Query<BookingFilter>,
) -> Result<HttpResponse, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM bookings WHERE 1=1");

    if let Some(status) = params.status {
        query.push(" AND status = ").push_bind(status);
    }

    if let Some(payment_status) = params.payment_status {
        query.push(" AND payment_status = ").push_bind(payment_status);
    }

    query.push(" ORDER BY created_at DESC, id DESC");

    let bookings = query
        .build_query_as::<Booking>()
        .fetch_all(pool.get_ref())
        .await?;

    Ok(response::ok(bookings))
}

/// Admins see any booking; customers need `?reference=`.
pub async fn get_booking(
    admin: Option<AdminSession>,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    access: web::Query<BookingAccess>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let mut conn = pool.acquire().await?;

    let booking = match (admin, access.reference.as_deref()) {
        (Some(_), _) => fetch_booking(&mut conn, id).await?,
        (None, Some(reference)) => fetch_owned_booking(&mut conn, id, reference).await?,
        (None, None) => {
            return Err(AppError::Unauthorized(
                "Booking reference required".to_string(),
            ))
        }
    };

    Ok(response::ok(booking))
}

async fn transition(
    pool: &SqlitePool,
    id: i64,
    next: BookingStatus,
    reference: Option<&str>,
) -> Result<Booking, AppError> {
    let mut tx = pool.begin().await?;

    let booking = match reference {
        Some(reference) => fetch_owned_booking(&mut tx, id, reference).await?,
        None => fetch_booking(&mut tx, id).await?,
    };

    if !booking.status.can_transition_to(next) {
        return Err(AppError::Conflict(format!(
            "Cannot change booking status from {} to {}",
            booking.status.as_str(),
            next.as_str()
        )));
    }

    let updated = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING *",
    )
    .bind(next)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    log::info!(
        "Booking {} moved from {} to {}",
        id,
        booking.status.as_str(),
        next.as_str()
    );

    Ok(updated)
}

pub async fn update_booking_status(
    _admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateBookingStatus>,
) -> Result<HttpResponse, AppError> {
    let booking = transition(pool.get_ref(), path.into_inner(), body.status, None).await?;
    Ok(response::ok(booking))
}

pub async fn request_cancellation(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<CancellationRequest>,
) -> Result<HttpResponse, AppError> {
    let booking = transition(
        pool.get_ref(),
        path.into_inner(),
        BookingStatus::CancellationRequested,
        Some(body.reference.as_str()),
    )
    .await?;
    Ok(response::ok(booking))
}

pub async fn refund_booking(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<RefundBooking>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;
    let id = path.into_inner();

    let mut tx = pool.begin().await?;

    let booking = fetch_booking(&mut tx, id).await?;

    if !booking.payment_status.is_refundable() {
        return Err(AppError::Conflict(
            "Only paid bookings can be refunded".to_string(),
        ));
    }

    // Never hand back more than was collected across all refunds
    let remaining = booking.refundable_amount();
    if to_minor_units(body.amount) > to_minor_units(remaining) {
        return Err(AppError::BadRequest(format!(
            "Refund amount exceeds the {remaining} still refundable"
        )));
    }

    let refunded = booking.refund_amount + body.amount;
    let payment_status = refund_outcome(booking.amount_paid, refunded);

    let updated = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings SET
            payment_status = ?,
            refund_amount = ?,
            refund_reason = ?,
            refunded_at = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(payment_status)
    .bind(refunded)
    .bind(&body.reason)
    .bind(chrono::Utc::now().naive_utc())
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    log::info!("{} refunded {} on booking {}", admin.email, body.amount, id);
    Ok(response::ok(updated))
}
