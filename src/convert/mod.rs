//! The Conversion Engine: `MakeCast`, the single entry point every other
//! cast-producing operation in this crate goes through (spec §4.3).
//!
//! Dispatch order, exactly as spec.md lays it out:
//! 1. Equal types (modulo qualifiers) — return `expr` unchanged, no
//!    sub-engine involved.
//! 2. Pointer source — delegate to `pointer::from_pointer`.
//! 3. Pointer destination — delegate to `pointer::to_pointer` (this is the
//!    only place an array source decays: `to_pointer` special-cases an
//!    ARRAY/INCOMPLETE_ARRAY source before falling through to its scalar
//!    path). An array source with a non-pointer destination reaches none of
//!    these branches and falls into step 4 below, which rejects it.
//! 4. Signed integral source — `integral::signed_integral_to_arith`.
//! 5. Unsigned integral source — `integral::unsigned_integral_to_arith`.
//! 6. Float/double source — `float::float_to_arith`.
//! 7. VOID, FUNCTION, ARRAY, INCOMPLETE_ARRAY, STRUCT_OR_UNION source with a
//!    non-pointer destination — `UnsupportedSource`.
//!
//! Each sub-engine is also exported directly for callers (`promote`, tests)
//! that already know which branch applies and want to skip the dispatch.

mod fold;
mod float;
mod integral;
mod pointer;

pub use float::float_to_arith;
pub use integral::{signed_integral_to_arith, unsigned_integral_to_arith};
pub use pointer::{decay_array, from_pointer, to_pointer};

use crate::error::TypeCoreError;
use crate::expr::TypedExpr;
use crate::types::{Type, TypeKind};

/// Convert `expr` to `dest`, folding constants where possible and otherwise
/// wrapping `expr` in the minimal chain of cast primitives. Returns
/// `UnsupportedConversion`/`UnsupportedSource`/`IncompatibleFunctionPointer`
/// per the sub-engine that rejects the pair; `InvalidType` never escapes
/// this function (it is a `Type`-level error, not a conversion-level one).
pub fn make_cast(expr: &TypedExpr, dest: &Type) -> Result<TypedExpr, TypeCoreError> {
    let src = expr.ty();

    if Type::equal_type(&src, dest) {
        // Decision order step 1: equal types (modulo qualifiers) return the
        // expression unchanged, not wrapped in a NOP cast.
        return Ok(expr.clone());
    }

    if src.is_pointer() {
        return from_pointer(expr, dest);
    }
    if dest.is_pointer() {
        return to_pointer(expr, dest);
    }

    if src.is_signed() {
        return signed_integral_to_arith(expr, dest);
    }
    if src.is_integral() {
        return unsigned_integral_to_arith(expr, dest);
    }
    if matches!(src.kind, TypeKind::Float | TypeKind::Double) {
        return float_to_arith(expr, dest);
    }

    Err(TypeCoreError::UnsupportedSource)
}

/// The three-argument form of `MakeCast`, for the one case where a
/// conversion must cross an environment boundary rather than inherit
/// `expr`'s own scope: pointer re-tagging (spec §9, "Constants and
/// environments"). Delegates to the two-argument form and then re-tags the
/// result's environment, leaving the sub-engines themselves unaware of
/// explicit environments except where they already construct a new node
/// (`pointer::from_pointer`/`to_pointer`'s own `ConstPtr` rebuilds).
pub fn make_cast_with_env(expr: &TypedExpr, dest: &Type, env: crate::env::EnvId) -> Result<TypedExpr, TypeCoreError> {
    let out = make_cast(expr, dest)?;
    Ok(retag_env(&out, env))
}

fn retag_env(expr: &TypedExpr, env: crate::env::EnvId) -> TypedExpr {
    match expr.clone() {
        TypedExpr::ConstLong(v, ty, _) => TypedExpr::ConstLong(v, ty, env),
        TypedExpr::ConstULong(v, ty, _) => TypedExpr::ConstULong(v, ty, env),
        TypedExpr::ConstFloat(v, _) => TypedExpr::ConstFloat(v, env),
        TypedExpr::ConstDouble(v, _) => TypedExpr::ConstDouble(v, env),
        TypedExpr::ConstPtr(v, ty, _) => TypedExpr::ConstPtr(v, ty, env),
        TypedExpr::TypeCast { kind, inner, ty, .. } => TypedExpr::TypeCast { kind, inner, ty, env },
        TypedExpr::Other { ty, is_lvalue, is_const_expr, .. } => {
            TypedExpr::Other { ty, env, is_lvalue, is_const_expr }
        }
    }
}
