//! Errors raised by the conversion core (spec §7).
//!
//! Hand-rolled rather than built on `thiserror`/`anyhow`: the teacher
//! compiler carries no error-handling crate anywhere in its sources (see
//! `common/error.rs`'s `Diagnostic`/`DiagnosticEngine`, which is itself
//! hand-written), so this core follows the same idiom. All are fatal at
//! the callsite — the engine never silently patches, retries, or drops
//! precision without a primitive that reifies the loss.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCoreError {
    /// `MakeCast` invoked with a source kind that is not convertible
    /// (VOID, FUNCTION other than to pointer, ARRAY other than decay,
    /// STRUCT_OR_UNION).
    UnsupportedSource,
    /// A (source, destination) pair with no defined mapping, e.g.
    /// FLOAT → UCHAR.
    UnsupportedConversion,
    /// A function-to-pointer cast where the referent type differs from
    /// the source function type.
    IncompatibleFunctionPointer,
    /// `IntegralPromotion` called on a non-integral expression.
    NonIntegralPromotion,
    /// An invalid operation on a type: `sizeof`/`alignof` of an incomplete
    /// array or incomplete struct/union, or `refType` of a non-pointer.
    InvalidType,
}

impl fmt::Display for TypeCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCoreError::UnsupportedSource => {
                write!(f, "cannot convert from this source type")
            }
            TypeCoreError::UnsupportedConversion => {
                write!(f, "no defined conversion for this (source, destination) pair")
            }
            TypeCoreError::IncompatibleFunctionPointer => {
                write!(f, "function pointer cast between incompatible function types")
            }
            TypeCoreError::NonIntegralPromotion => {
                write!(f, "integral promotion requested on a non-integral expression")
            }
            TypeCoreError::InvalidType => {
                write!(f, "invalid operation on an incomplete or non-pointer type")
            }
        }
    }
}

impl std::error::Error for TypeCoreError {}
