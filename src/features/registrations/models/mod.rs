mod registration;

pub use registration::{NewRegistration, PaymentStatus, Registration};
