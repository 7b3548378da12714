// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Match key normalization.
//!
//! Keys are used only for equality comparison and are never shown in place
//! of the original value. An empty key means "no key" and never matches.

/// Trims and lowercases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Keeps only the decimal digits of a phone number.
///
/// This is character filtering, not telephony parsing: country-code
/// symbols, extensions markers and letters are all dropped.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}
