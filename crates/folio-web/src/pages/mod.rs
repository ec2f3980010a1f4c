//! Page Components

mod checkout_success;
mod contact;
mod home;
mod services;

pub use checkout_success::CheckoutSuccessPage;
pub use contact::ContactPage;
pub use home::HomePage;
pub use services::{ServiceDetailPage, ServicesPage};
