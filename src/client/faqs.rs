use async_trait::async_trait;

use super::{ApiClient, ClientError};
use crate::models::faq::{move_adjacent, Direction, Faq};

#[async_trait]
pub trait FaqAdminApi: Sync {
    async fn list_faqs(&self) -> Result<Vec<Faq>, ClientError>;
    async fn reorder_faqs(&self, ids: Vec<i64>) -> Result<Vec<Faq>, ClientError>;
}

#[async_trait]
impl FaqAdminApi for ApiClient {
    async fn list_faqs(&self) -> Result<Vec<Faq>, ClientError> {
        self.list_admin_faqs().await
    }

    async fn reorder_faqs(&self, ids: Vec<i64>) -> Result<Vec<Faq>, ClientError> {
        ApiClient::reorder_faqs(self, ids).await
    }
}

/// Moves one FAQ a slot up or down and persists the whole order.
///
/// `faqs` is updated optimistically. If the reorder call fails the list is
/// replaced with the server's order (or the previous local order when even
/// that reload fails) and the reorder error is returned. Returns `Ok(false)`
/// when the entry is already at that end of the list.
pub async fn move_faq<A>(
    api: &A,
    faqs: &mut Vec<Faq>,
    index: usize,
    direction: Direction,
) -> Result<bool, ClientError>
where
    A: FaqAdminApi + ?Sized,
{
    let Some(moved) = move_adjacent(faqs, index, direction) else {
        return Ok(false);
    };

    let previous = std::mem::replace(faqs, moved);
    let ids = faqs.iter().map(|f| f.id).collect();

    match api.reorder_faqs(ids).await {
        Ok(saved) => {
            *faqs = saved;
            Ok(true)
        }
        Err(err) => {
            log::warn!("FAQ reorder failed, reloading: {err}");
            *faqs = api.list_faqs().await.unwrap_or(previous);
            Err(err)
        }
    }
}
