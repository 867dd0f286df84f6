//! Page Components

mod billing;
mod home;
mod payment_success;

pub use billing::BillingRegisterPage;
pub use home::HomePage;
pub use payment_success::PaymentSuccessPage;
