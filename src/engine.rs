//! Rule engine: parse, serialize, match and synthesize rules.
//!
//! This module is the entry point for everything that turns rule text into
//! decisions about items. It is split into focused submodules under
//! `src/engine/` while keeping the public paths flat (`crate::parse_rule`,
//! `crate::matches`, ...).
//!
//! ## How the parts work together
//!
//! ```text
//!  rule line ── parse_rule ──────────▶ Rule ── serialize_rule ──▶ canonical line
//!              (parser.rs)              │       (serializer.rs)
//!                                       │
//!  item + name ─────────────────────────┼── matches ──▶ bool
//!                                       │   (matcher.rs)
//!                                       │
//!  item + name ── rule_from_item ───────┘
//!                 (synth.rs)
//! ```
//!
//! Every stage is a pure function over its inputs. Rules are evaluated strictly
//! in file order by the caller ([`crate::RuleSet`]); nothing here keeps state
//! between calls.
//!
//! ## Responsibilities by module
//!
//! - `parser.rs`: sigils, keyword loop (longest match), threshold numbers, the
//!   noun phase with its rollback, name pattern and inscription.
//! - `serializer.rs`: the inverse of the parser, emitting keywords in the
//!   canonical table order.
//! - `matcher.rs`: short-circuit AND over the set flags, then the name test and
//!   the "collecting" pack test.
//! - `synth.rs`: builds a rule from a live item, used when registering destroyed
//!   items and when inserting an item's rule in the editor.
//!
//! ## Debugging
//!
//! Run with `AUTOPICK_LOG=autopick=trace` to see every rejected line and every
//! failing predicate.

#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/serializer.rs"]
mod serializer;
#[path = "engine/synth.rs"]
mod synth;

pub use matcher::matches;
pub use parser::{is_foreign_line, parse_rule};
pub use serializer::serialize_rule;
pub use synth::rule_from_item;
