// crates/gmw-site-core/tests/proptest_publish_rule.rs
// ============================================================================
// Module: Publish Rule Property-Based Tests
// Description: Property tests for published_at derivation and validation.
// Purpose: Hold the publish invariant across arbitrary update sequences.
// ============================================================================

//! Property-based tests for the blog publish rule and input validation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use gmw_site_core::CreateContactFormInput;
use gmw_site_core::Timestamp;
use gmw_site_core::Validate;
use gmw_site_core::derive_published_at;
use gmw_site_core::initial_published_at;
use proptest::prelude::*;

proptest! {
    #[test]
    fn published_at_is_set_iff_published(
        initial in any::<bool>(),
        updates in prop::collection::vec(prop::option::of(any::<bool>()), 0 .. 16),
        start in 0_i64 .. 1_000_000,
    ) {
        let mut clock = start;
        let mut published = initial;
        let mut published_at = initial_published_at(initial, Timestamp::from_unix_millis(clock));
        for update in updates {
            clock += 1;
            let now = Timestamp::from_unix_millis(clock);
            let previous = published_at;
            published_at = derive_published_at(published, published_at, update, now);
            if let Some(flag) = update {
                if flag && published {
                    prop_assert_eq!(published_at, previous);
                }
                if flag && !published {
                    prop_assert_eq!(published_at, Some(now));
                }
                published = flag;
            } else {
                prop_assert_eq!(published_at, previous);
            }
            prop_assert_eq!(published_at.is_some(), published);
        }
    }

    #[test]
    fn message_minimum_counts_characters(message in "\\PC{0,20}") {
        let input = CreateContactFormInput {
            name: "Name".to_string(),
            email: "name@example.com".to_string(),
            phone: None,
            company: None,
            subject: "Subject".to_string(),
            message: message.clone(),
        };
        prop_assert_eq!(input.validate().is_ok(), message.chars().count() >= 10);
    }
}
