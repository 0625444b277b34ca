//! Session cookie handling.
//!
//! A logged-in operator carries two private (signed and encrypted) cookies: a
//! session marker and its expiry date-time. The cookies being readable at all
//! proves they were issued by this server; the expiry bounds how long a
//! session lasts.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

pub(crate) const COOKIE_SESSION: &str = "session";
pub(crate) const COOKIE_EXPIRY: &str = "expiry";

/// How long a session lasts: one working day at the shop.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::hours(8);

const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Add the session cookies to the jar, marking the operator as logged in
/// until `duration` from now.
///
/// # Errors
/// Returns an [Error::InvalidExpiryDate] if the expiry time cannot be
/// formatted.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry = OffsetDateTime::now_utc() + duration;
    let expiry_string = expiry
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidExpiryDate(error.to_string()))?;

    Ok(jar
        .add(
            Cookie::build((COOKIE_SESSION, "1"))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict),
        )
        .add(
            Cookie::build((COOKIE_EXPIRY, expiry_string))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict),
        ))
}

/// Set the session cookies to an invalid value and set their max age to zero,
/// which should delete them on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict),
    )
    .add(
        Cookie::build((COOKIE_EXPIRY, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict),
    )
}

/// Check that the jar holds a session that has not expired.
///
/// # Errors
/// Returns an:
/// - [Error::CookieMissing] if either session cookie is absent,
/// - [Error::InvalidExpiryDate] if the expiry cookie cannot be parsed,
/// - [Error::CookieExpired] if the session's expiry has passed.
pub(crate) fn validate_session(jar: &PrivateCookieJar) -> Result<(), Error> {
    jar.get(COOKIE_SESSION).ok_or(Error::CookieMissing)?;
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;

    let expiry = PrimitiveDateTime::parse(expiry_cookie.value(), DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidExpiryDate(error.to_string()))?
        .assume_utc();

    if OffsetDateTime::now_utc() <= expiry {
        Ok(())
    } else {
        Err(Error::CookieExpired)
    }
}
