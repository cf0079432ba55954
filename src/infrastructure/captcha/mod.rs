//! CAPTCHA verification backends.

mod turnstile;

pub use turnstile::TurnstileVerifier;
