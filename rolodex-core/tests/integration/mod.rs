// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration Tests for Rolodex Core
//!
//! These tests drive complete workflows through the `Rolodex` entry point:
//! import, duplicate review, merge, and cross-file comparison.
//!
//! Run with: cargo test --test integration

mod duplicate_workflow_test;
mod import_workflow_test;
