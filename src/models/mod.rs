pub mod booking;
pub mod destination;
pub mod faq;
pub mod hotel;
pub mod inquiry;
pub mod package;

use serde::{Deserialize, Deserializer};

/// For nullable columns in partial updates: an absent field stays `None`,
/// an explicit `null` becomes `Some(None)` and clears the column.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
