//! Email delivery backends.

mod smtp;

pub use smtp::SmtpMailer;
