//! Parser self-checks, kept out of coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    /// Panics when the grammar keeps looking ahead without consuming a token.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        let left = self.lookahead_fuel.get();
        assert!(left > 0, "parser made no progress in {} lookaheads", super::core::LOOKAHEAD_FUEL);
        self.lookahead_fuel.set(left - 1);
    }

    /// Grammar rules are entered only at their leading keyword.
    #[inline]
    pub(super) fn assert_current(&mut self, keyword: SyntaxKind) {
        let found = self.current();
        assert_eq!(
            found, keyword,
            "grammar rule entered at {found:?} instead of its leading {keyword:?}"
        );
    }
}
