//! Core business entities.

mod passenger;
mod user;

pub use passenger::{NewPassenger, Passenger, PassengerPatch, PaymentMethod};
pub use user::{NewUser, User, UserPatch, UserType};
