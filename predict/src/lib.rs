//! Grammar analysis and table-driven parsing for LL(1) grammars.
//!
//! [cfg] holds the symbol model and the numbered production store, [compute]
//! derives the FIRST and FOLLOW sets, [ll1] builds the predictive rule table
//! (recording conflicts instead of failing on them), and [machine] runs the
//! stack automaton that accepts or rejects input strings, recovering from
//! errors in panic mode.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod cfg;
pub mod compute;
pub mod ll1;
pub mod machine;
