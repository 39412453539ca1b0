pub mod admin;
pub mod bookings;
pub mod contact;
pub mod destinations;
pub mod faqs;
pub mod hotels;
pub mod packages;
pub mod payments;
