//! `FloatToArith` (spec §4.3): source is FLOAT or DOUBLE.
//!
//! Direct-to-integer conversions only exist via `FloatToInt32`/
//! `DoubleToInt32`, both landing in a 32-bit GPR — there is no primitive
//! that truncates a float straight into an 8/16-bit register, so CHAR/
//! UCHAR/SHORT/USHORT destinations all go through that GPR intermediate
//! before a `Preserve*` narrowing, except DOUBLE to CHAR/SHORT specifically,
//! which instead recurses through an intermediate FLOAT (spec §9c) — a
//! deliberate three-primitive exception to the otherwise-universal
//! two-primitive cap. FLOAT → UCHAR alone has no path at all and is
//! rejected outright (spec §9b): there is no unsigned float-to-integer
//! primitive, and unlike ULONG's integral conversions there is no existing
//! signed primitive this engine is permitted to misappropriate for that one
//! pair. FLOAT → USHORT is unaffected by that restriction and goes through
//! the ordinary FLOAT_TO_INT32-then-PRESERVE_INT16 path.

use crate::error::TypeCoreError;
use crate::expr::{CastKind, TypedExpr};
use crate::types::{Type, TypeKind};

fn wrap(kind: CastKind, inner: TypedExpr, ty: Type) -> TypedExpr {
    let env = inner.env();
    TypedExpr::TypeCast { kind, inner: Box::new(inner), ty, env }
}

/// The source's value as `f64` if it is a float/double constant, and its
/// `EnvId` — used uniformly by the folding arms below regardless of
/// whether the constant was originally a `ConstFloat` or `ConstDouble`.
fn const_value(expr: &TypedExpr) -> Option<(f64, crate::env::EnvId)> {
    match expr {
        TypedExpr::ConstFloat(v, env) => Some((*v as f64, *env)),
        TypedExpr::ConstDouble(v, env) => Some((*v, *env)),
        _ => None,
    }
}

pub fn float_to_arith(expr: &TypedExpr, dest: &Type) -> Result<TypedExpr, TypeCoreError> {
    let src_is_double = match expr.ty().kind {
        TypeKind::Float => false,
        TypeKind::Double => true,
        _ => return Err(TypeCoreError::UnsupportedSource),
    };
    let int_cast_kind = if src_is_double { CastKind::DoubleToInt32 } else { CastKind::FloatToInt32 };

    match &dest.kind {
        TypeKind::Long => {
            if let Some((v, env)) = const_value(expr) {
                return Ok(TypedExpr::ConstLong(v as i32, dest.clone(), env));
            }
            Ok(wrap(int_cast_kind, expr.clone(), dest.clone()))
        }
        TypeKind::ULong => {
            if let Some((v, env)) = const_value(expr) {
                return Ok(TypedExpr::ConstULong(v as i32 as u32, dest.clone(), env));
            }
            Ok(wrap(int_cast_kind, expr.clone(), dest.clone()))
        }
        TypeKind::UChar => {
            if !src_is_double {
                return Err(TypeCoreError::UnsupportedConversion);
            }
            if let Some((v, env)) = const_value(expr) {
                return Ok(TypedExpr::ConstULong((v as i32 as u8) as u32, dest.clone(), env));
            }
            let as_long = wrap(int_cast_kind, expr.clone(), Type::long());
            Ok(wrap(CastKind::PreserveInt8, as_long, dest.clone()))
        }
        TypeKind::UShort => {
            if let Some((v, env)) = const_value(expr) {
                return Ok(TypedExpr::ConstULong((v as i32 as u16) as u32, dest.clone(), env));
            }
            let as_long = wrap(int_cast_kind, expr.clone(), Type::long());
            Ok(wrap(CastKind::PreserveInt16, as_long, dest.clone()))
        }
        TypeKind::Char => {
            if src_is_double {
                return recurse_via_float(expr, dest);
            }
            if let Some((v, env)) = const_value(expr) {
                return Ok(TypedExpr::ConstLong(v as i32 as i8 as i32, dest.clone(), env));
            }
            let as_long = wrap(int_cast_kind, expr.clone(), Type::long());
            Ok(wrap(CastKind::PreserveInt8, as_long, dest.clone()))
        }
        TypeKind::Short => {
            if src_is_double {
                return recurse_via_float(expr, dest);
            }
            if let Some((v, env)) = const_value(expr) {
                return Ok(TypedExpr::ConstLong(v as i32 as i16 as i32, dest.clone(), env));
            }
            let as_long = wrap(int_cast_kind, expr.clone(), Type::long());
            Ok(wrap(CastKind::PreserveInt16, as_long, dest.clone()))
        }
        TypeKind::Double => {
            if src_is_double {
                return Err(TypeCoreError::UnsupportedConversion);
            }
            if let TypedExpr::ConstFloat(v, env) = expr {
                return Ok(TypedExpr::ConstDouble(*v as f64, *env));
            }
            Ok(wrap(CastKind::FloatToDouble, expr.clone(), dest.clone()))
        }
        TypeKind::Float => {
            if !src_is_double {
                return Err(TypeCoreError::UnsupportedConversion);
            }
            if let TypedExpr::ConstDouble(v, env) = expr {
                return Ok(TypedExpr::ConstFloat(*v as f32, *env));
            }
            Ok(wrap(CastKind::DoubleToFloat, expr.clone(), dest.clone()))
        }
        _ => Err(TypeCoreError::UnsupportedConversion),
    }
}

/// DOUBLE → CHAR/SHORT's named double-rounding exception: narrow to FLOAT
/// first (folding if constant), then re-enter `float_to_arith` on that
/// FLOAT-typed intermediate with the original destination.
fn recurse_via_float(expr: &TypedExpr, dest: &Type) -> Result<TypedExpr, TypeCoreError> {
    let as_float = if let TypedExpr::ConstDouble(v, env) = expr {
        TypedExpr::ConstFloat(*v as f32, *env)
    } else {
        wrap(CastKind::DoubleToFloat, expr.clone(), Type::float())
    };
    float_to_arith(&as_float, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvId;

    fn e() -> EnvId {
        EnvId::dummy()
    }

    #[test]
    fn non_constant_float_to_uchar_is_rejected() {
        let src = TypedExpr::opaque(Type::float(), e(), false);
        assert_eq!(float_to_arith(&src, &Type::uchar()).unwrap_err(), TypeCoreError::UnsupportedConversion);
    }

    #[test]
    fn non_constant_float_to_ushort_is_permitted() {
        let src = TypedExpr::opaque(Type::float(), e(), false);
        let out = float_to_arith(&src, &Type::ushort()).unwrap();
        match out {
            TypedExpr::TypeCast { kind: CastKind::PreserveInt16, inner, .. } => match *inner {
                TypedExpr::TypeCast { kind: CastKind::FloatToInt32, .. } => {}
                other => panic!("expected inner FloatToInt32, got {other:?}"),
            },
            other => panic!("expected outer PreserveInt16, got {other:?}"),
        }
    }

    #[test]
    fn double_to_uchar_is_permitted() {
        let src = TypedExpr::ConstDouble(200.0, e());
        let out = float_to_arith(&src, &Type::uchar()).unwrap();
        assert_eq!(out, TypedExpr::ConstULong(200, Type::uchar(), e()));
    }

    #[test]
    fn non_constant_double_to_long_uses_double_to_int32() {
        let src = TypedExpr::opaque(Type::double(), e(), false);
        let out = float_to_arith(&src, &Type::long()).unwrap();
        match out {
            TypedExpr::TypeCast { kind, .. } => assert_eq!(kind, CastKind::DoubleToInt32),
            _ => panic!("expected TypeCast"),
        }
    }

    #[test]
    fn non_constant_double_to_short_recurses_through_float() {
        let src = TypedExpr::opaque(Type::double(), e(), false);
        let out = float_to_arith(&src, &Type::short()).unwrap();
        match out {
            TypedExpr::TypeCast { kind: CastKind::PreserveInt16, inner, .. } => match *inner {
                TypedExpr::TypeCast { kind: CastKind::FloatToInt32, inner: inner2, .. } => match *inner2 {
                    TypedExpr::TypeCast { kind: CastKind::DoubleToFloat, .. } => {}
                    _ => panic!("expected innermost DoubleToFloat"),
                },
                _ => panic!("expected middle FloatToInt32"),
            },
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn non_constant_double_to_ushort_does_not_recurse_through_float() {
        // Only CHAR/SHORT take the double-rounding detour; UCHAR/USHORT
        // narrow directly from DOUBLE_TO_INT32.
        let src = TypedExpr::opaque(Type::double(), e(), false);
        let out = float_to_arith(&src, &Type::ushort()).unwrap();
        match out {
            TypedExpr::TypeCast { kind: CastKind::PreserveInt16, inner, .. } => match *inner {
                TypedExpr::TypeCast { kind: CastKind::DoubleToInt32, .. } => {}
                other => panic!("expected inner DoubleToInt32, got {other:?}"),
            },
            other => panic!("expected outer PreserveInt16, got {other:?}"),
        }
    }

    #[test]
    fn const_float_to_double_folds_exactly() {
        let src = TypedExpr::ConstFloat(1.5, e());
        let out = float_to_arith(&src, &Type::double()).unwrap();
        assert_eq!(out, TypedExpr::ConstDouble(1.5, e()));
    }

    #[test]
    fn const_float_257_to_char_wraps_like_integral_truncation() {
        let src = TypedExpr::ConstFloat(257.0, e());
        let out = float_to_arith(&src, &Type::char()).unwrap();
        assert_eq!(out, TypedExpr::ConstLong(1, Type::char(), e()));
    }
}
