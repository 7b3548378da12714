// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

use proptest::prelude::*;
use rolodex_core::ContactRecord;

// ============================================================
// String Strategies
// ============================================================

/// Strategy for generating email addresses in mixed case.
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-zA-Z]{3,10}", "[a-zA-Z]{2,8}", "[a-z]{2,4}")
        .prop_map(|(user, domain, tld)| format!("{}@{}.{}", user, domain, tld))
}

/// Strategy for emails with stray whitespace around them.
pub fn padded_email_strategy() -> impl Strategy<Value = String> {
    (" {0,3}", email_strategy(), "[ \t]{0,3}")
        .prop_map(|(before, email, after)| format!("{}{}{}", before, email, after))
}

/// Strategy for phone numbers with typical punctuation.
pub fn formatted_phone_strategy() -> impl Strategy<Value = String> {
    ("[0-9]{1,3}", "[0-9]{3}", "[0-9]{3}", "[0-9]{4}").prop_map(|(cc, area, mid, last)| {
        format!("+{} ({}) {}-{}", cc, area, mid, last)
    })
}

/// Strategy for arbitrary phone-ish input.
pub fn phone_input_strategy() -> impl Strategy<Value = String> {
    "[0-9 ()+.-]{0,20}"
}

/// Strategy for display names.
pub fn display_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10})?"
}

// ============================================================
// Record Strategies
// ============================================================

/// Strategy for a record drawing its keys from small pools, so duplicates
/// are common.
pub fn pooled_record_strategy() -> impl Strategy<Value = ContactRecord> {
    (
        prop::option::of(0usize..4),
        prop::option::of(0usize..4),
        display_name_strategy(),
    )
        .prop_map(|(email, phone, name)| ContactRecord {
            name,
            email: email.map(|i| format!("user{}@example.com", i)).unwrap_or_default(),
            phone: phone.map(|i| format!("555-000{}", i)).unwrap_or_default(),
            ..ContactRecord::new()
        })
}

/// Strategy for a batch of pooled records.
pub fn record_batch_strategy(max: usize) -> impl Strategy<Value = Vec<ContactRecord>> {
    prop::collection::vec(pooled_record_strategy(), 0..max)
}
