//! Property-based tests for irguard-core.
//!
//! These verify the line-scan invariants: one diagnostic per offending line,
//! ascending 1-based line numbers, and clean inputs always passing.

use proptest::prelude::*;

use irguard_core::{scan_text, FORBIDDEN};

/// Strategy for a single line that can never contain the forbidden
/// substring (no '%' in the alphabet).
fn arb_clean_line() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_ .=,*()]{0,60}").expect("valid regex")
}

/// Strategy for a line seeded with a forbidden aggregate alloca.
fn arb_dirty_line() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,12}")
        .expect("valid regex")
        .prop_map(|name| format!("  %{name} = alloca %struct.{name}, align 8"))
}

proptest! {
    #[test]
    fn clean_lines_always_pass(lines in prop::collection::vec(arb_clean_line(), 0..40)) {
        let text = lines.join("\n");
        let outcome = scan_text("input.ll", &text);

        prop_assert!(outcome.passed());
        prop_assert_eq!(outcome.lines_scanned as usize, lines.len().max(1));
    }

    #[test]
    fn one_diagnostic_per_dirty_line_in_order(
        entries in prop::collection::vec((arb_clean_line(), any::<bool>()), 1..40),
        dirty in arb_dirty_line(),
    ) {
        let lines: Vec<String> = entries
            .iter()
            .map(|(clean, is_dirty)| {
                if *is_dirty { dirty.clone() } else { clean.clone() }
            })
            .collect();
        let expected: Vec<u32> = entries
            .iter()
            .enumerate()
            .filter(|(_, (_, is_dirty))| *is_dirty)
            .map(|(i, _)| i as u32 + 1)
            .collect();

        let outcome = scan_text("input.ll", &lines.join("\n"));
        let got: Vec<u32> = outcome.diagnostics.iter().map(|d| d.line).collect();

        prop_assert_eq!(got, expected);
        prop_assert_eq!(outcome.passed(), !entries.iter().any(|(_, d)| *d));
    }

    #[test]
    fn diagnostic_content_is_the_full_line(dirty in arb_dirty_line()) {
        let outcome = scan_text("input.ll", &dirty);

        prop_assert_eq!(outcome.diagnostics.len(), 1);
        prop_assert_eq!(&outcome.diagnostics[0].content, &dirty);
        prop_assert!(dirty.contains(FORBIDDEN));
    }

    #[test]
    fn scan_is_deterministic(lines in prop::collection::vec(arb_clean_line(), 0..20)) {
        let text = lines.join("\n");
        prop_assert_eq!(scan_text("a.ll", &text), scan_text("a.ll", &text));
    }
}
