//! Opaque environment (lexical scope) handle.
//!
//! The core never inspects or mutates an `EnvId` — it only threads it
//! through expression construction, re-tagging an expression with a new
//! handle exactly at the one site spec.md calls out (pointer conversions
//! that cross a declaration boundary; see `convert::pointer`). Shaped after
//! `common::source::Span`: a small `Copy` handle identified by a bare
//! integer, with no accessors beyond equality.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId(pub u32);

impl EnvId {
    /// A handle for synthetic nodes with no real enclosing scope (test
    /// fixtures, constant folding of literals with no source environment).
    pub const fn dummy() -> Self {
        EnvId(0)
    }
}
