//! Integral promotion and the two "usual conversion" rules built on top of
//! `make_cast` (spec §4.4). These are the operations a real expression-typing
//! pass calls directly; `make_cast` itself never invokes them.

use crate::convert::{make_cast, make_cast_with_env};
use crate::error::TypeCoreError;
use crate::expr::TypedExpr;
use crate::types::{Type, TypeKind};

/// CHAR/UCHAR/SHORT/USHORT promote to LONG/ULONG respectively (this
/// target's `int`); LONG, ULONG, FLOAT, DOUBLE pass through unchanged.
/// Idempotent: promoting an already-promoted expression is a no-op, not an
/// error. Fails `NonIntegralPromotion` on a non-integral operand.
pub fn integral_promotion(expr: &TypedExpr) -> Result<TypedExpr, TypeCoreError> {
    match expr.ty().kind {
        TypeKind::Char | TypeKind::Short => make_cast(expr, &Type::long()),
        TypeKind::UChar | TypeKind::UShort => make_cast(expr, &Type::ulong()),
        TypeKind::Long | TypeKind::ULong => Ok(expr.clone()),
        _ => Err(TypeCoreError::NonIntegralPromotion),
    }
}

/// The binary-operator balancing rule: both operands are integrally
/// promoted, then widened to a common type by priority — DOUBLE beats
/// FLOAT beats ULONG beats LONG. Non-arithmetic operands are rejected with
/// `NonIntegralPromotion`.
pub fn usual_arithmetic_conversion(lhs: &TypedExpr, rhs: &TypedExpr) -> Result<(TypedExpr, TypedExpr), TypeCoreError> {
    if !lhs.ty().is_arith() || !rhs.ty().is_arith() {
        return Err(TypeCoreError::NonIntegralPromotion);
    }
    let l = promote_arith(lhs)?;
    let r = promote_arith(rhs)?;

    let common = rank(&l.ty()).max(rank(&r.ty()));
    let common_ty = ty_for_rank(common);

    let l_out = make_cast(&l, &common_ty)?;
    let r_out = make_cast(&r, &common_ty)?;
    Ok((l_out, r_out))
}

/// FLOAT/DOUBLE pass through; CHAR/UCHAR/SHORT/USHORT/LONG/ULONG go through
/// `integral_promotion`. Arithmetic-ness is already checked by the caller.
fn promote_arith(expr: &TypedExpr) -> Result<TypedExpr, TypeCoreError> {
    match expr.ty().kind {
        TypeKind::Float | TypeKind::Double => Ok(expr.clone()),
        _ => integral_promotion(expr),
    }
}

/// First maps any POINTER operand to ULONG via `FromPointer`, then defers
/// to `UsualArithmeticConversion`. The environment used for the pointer
/// coercion is taken from the *other* operand — pointer-to-integer in a
/// binary expression must be typed in the expression's shared scope.
pub fn usual_scalar_conversion(lhs: &TypedExpr, rhs: &TypedExpr) -> Result<(TypedExpr, TypedExpr), TypeCoreError> {
    let l = if lhs.ty().is_pointer() {
        make_cast_with_env(lhs, &Type::ulong(), rhs.env())?
    } else {
        lhs.clone()
    };
    let r = if rhs.ty().is_pointer() {
        make_cast_with_env(rhs, &Type::ulong(), lhs.env())?
    } else {
        rhs.clone()
    };
    usual_arithmetic_conversion(&l, &r)
}

fn rank(ty: &Type) -> u8 {
    match ty.kind {
        TypeKind::Long => 0,
        TypeKind::ULong => 1,
        TypeKind::Float => 2,
        TypeKind::Double => 3,
        _ => 0, // unreachable post-promotion for arithmetic operands
    }
}

fn ty_for_rank(r: u8) -> Type {
    match r {
        0 => Type::long(),
        1 => Type::ulong(),
        2 => Type::float(),
        _ => Type::double(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvId;

    fn e() -> EnvId {
        EnvId::dummy()
    }

    #[test]
    fn char_promotes_to_long() {
        let c = TypedExpr::ConstLong(5, Type::char(), e());
        let out = integral_promotion(&c).unwrap();
        assert!(Type::equal_type(&out.ty(), &Type::long()));
    }

    #[test]
    fn uchar_promotes_to_ulong() {
        let c = TypedExpr::ConstULong(5, Type::uchar(), e());
        let out = integral_promotion(&c).unwrap();
        assert!(Type::equal_type(&out.ty(), &Type::ulong()));
    }

    #[test]
    fn promotion_is_idempotent_on_long() {
        let l = TypedExpr::ConstLong(5, Type::long(), e());
        let out = integral_promotion(&l).unwrap();
        assert_eq!(out, l);
    }

    #[test]
    fn promotion_rejects_non_integral_operand() {
        let f = TypedExpr::ConstFloat(1.0, e());
        assert_eq!(integral_promotion(&f).unwrap_err(), TypeCoreError::NonIntegralPromotion);
    }

    #[test]
    fn usual_arithmetic_conversion_picks_double_over_long() {
        // spec.md §8: UsualArithmeticConversion(ConstLong(3), ConstDouble(2.5))
        // yields (ConstDouble(3.0), ConstDouble(2.5)).
        let lhs = TypedExpr::ConstLong(3, Type::long(), e());
        let rhs = TypedExpr::ConstDouble(2.5, e());
        let (l, r) = usual_arithmetic_conversion(&lhs, &rhs).unwrap();
        assert_eq!(l, TypedExpr::ConstDouble(3.0, e()));
        assert_eq!(r, TypedExpr::ConstDouble(2.5, e()));
    }

    #[test]
    fn non_arithmetic_operand_is_rejected() {
        let lhs = TypedExpr::opaque(Type::pointer(Type::char()), e(), false);
        let rhs = TypedExpr::ConstLong(1, Type::long(), e());
        assert_eq!(usual_arithmetic_conversion(&lhs, &rhs).unwrap_err(), TypeCoreError::NonIntegralPromotion);
    }

    #[test]
    fn usual_scalar_conversion_maps_pointer_operand_to_ulong_using_other_env() {
        let ptr_env = EnvId(7);
        let other_env = EnvId(3);
        let lhs = TypedExpr::ConstPtr(0x20, Type::pointer(Type::char()), ptr_env);
        let rhs = TypedExpr::ConstLong(5, Type::long(), other_env);
        let (l, r) = usual_scalar_conversion(&lhs, &rhs).unwrap();
        // Both land in ULONG: the pointer becomes ULONG via FromPointer,
        // then UsualArithmeticConversion widens the LONG operand to match.
        assert_eq!(l, TypedExpr::ConstULong(0x20, Type::ulong(), other_env));
        assert_eq!(r, TypedExpr::ConstULong(5, Type::ulong(), other_env));
    }

    #[test]
    fn usual_scalar_conversion_falls_back_when_neither_is_a_pointer() {
        let lhs = TypedExpr::ConstLong(3, Type::long(), e());
        let rhs = TypedExpr::ConstDouble(2.5, e());
        let (l, r) = usual_scalar_conversion(&lhs, &rhs).unwrap();
        assert_eq!(l, TypedExpr::ConstDouble(3.0, e()));
        assert_eq!(r, TypedExpr::ConstDouble(2.5, e()));
    }
}
