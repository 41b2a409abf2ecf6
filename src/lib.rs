//! C semantic type core: the C type model, the typed expression tree, and
//! the cast/conversion engine for a 32-bit x86 C compiler front end.
//!
//! This crate has no parser, no code generator, and no driver — it is the
//! layer a frontend's semantic analysis phase calls into once it already
//! has typed expressions to convert, and the layer a code generator calls
//! into once it needs to know which primitive realizes a given cast. See
//! `emit::CodeEmitter` for that second seam.

pub mod convert;
pub mod emit;
pub mod env;
pub mod error;
pub mod expr;
pub mod promote;
pub mod types;
