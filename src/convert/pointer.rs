//! Pointer conversions: `FromPointer` (pointer source, arbitrary scalar
//! destination) and `ToPointer` (arbitrary scalar source, pointer
//! destination), plus array-to-pointer decay (spec §4.3, §4.4).
//!
//! Pointers have no dedicated cast primitive — every pointer conversion is
//! routed through ULONG, the unsigned 32-bit integral kind pointers share a
//! representation with on this target, and then re-tagged with the pointer
//! type. `MakeCast`'s pointer-source and pointer-destination branches both
//! delegate here before falling into the integral/float engines for the
//! ULONG leg.

use crate::error::TypeCoreError;
use crate::expr::{CastKind, TypedExpr};
use crate::types::{Type, TypeKind};

use super::integral::unsigned_integral_to_arith;
use super::make_cast;

fn wrap(kind: CastKind, inner: TypedExpr, ty: Type) -> TypedExpr {
    let env = inner.env();
    TypedExpr::TypeCast { kind, inner: Box::new(inner), ty, env }
}

/// Array-to-pointer decay: an array of T becomes a pointer to T. Not a cast
/// primitive — a pure retagging, since an array's value already denotes
/// its first element's address at this layer.
pub fn decay_array(expr: &TypedExpr) -> Result<TypedExpr, TypeCoreError> {
    let elem = match &expr.ty().kind {
        TypeKind::Array(elem, _) => (**elem).clone(),
        TypeKind::IncompleteArray(elem) => (**elem).clone(),
        _ => return Err(TypeCoreError::UnsupportedSource),
    };
    Ok(wrap(CastKind::Nop, expr.clone(), Type::pointer(elem)))
}

/// Pointer source, non-pointer scalar destination: two pointer types that
/// are themselves equal (modulo qualifiers) to each other collapse to NOP;
/// function-pointer compatibility follows `Type::equal_type` on the
/// pointee's `FunctionType`. A non-pointer destination must be *integral*
/// (not merely arithmetic — spec.md §4.3 excludes FLOAT/DOUBLE here) to
/// widen through ULONG; anything else fails `UnsupportedConversion`.
pub fn from_pointer(expr: &TypedExpr, dest: &Type) -> Result<TypedExpr, TypeCoreError> {
    if !expr.ty().is_pointer() {
        return Err(TypeCoreError::UnsupportedSource);
    }
    if dest.is_pointer() {
        if Type::equal_type(&expr.ty(), dest) {
            if let TypedExpr::ConstPtr(..) = expr {
                return Ok(expr.clone());
            }
            return Ok(wrap(CastKind::Nop, expr.clone(), dest.clone()));
        }
        if let (TypeKind::Pointer(a), TypeKind::Pointer(b)) = (&expr.ty().kind, &dest.kind) {
            if let (TypeKind::Function(_), TypeKind::Function(_)) = (&a.kind, &b.kind) {
                if !Type::equal_type(a, b) {
                    return Err(TypeCoreError::IncompatibleFunctionPointer);
                }
            }
        }
        return Ok(wrap(CastKind::Nop, expr.clone(), dest.clone()));
    }
    if !dest.is_integral() {
        return Err(TypeCoreError::UnsupportedConversion);
    }
    if let TypedExpr::ConstPtr(v, _, env) = expr {
        let as_ulong = TypedExpr::ConstULong(*v, Type::ulong(), *env);
        return unsigned_integral_to_arith(&as_ulong, dest);
    }
    let as_ulong = wrap(CastKind::Nop, expr.clone(), Type::ulong());
    unsigned_integral_to_arith(&as_ulong, dest)
}

/// Non-pointer scalar source, pointer destination. Per spec.md §4.3 only an
/// *integral* source widens through ULONG (via `MakeCast`, since that source
/// could still be CHAR/SHORT as well as LONG/ULONG) and re-tags as the
/// destination pointer type — a FLOAT/DOUBLE source has no defined path to a
/// pointer and falls through to `UnsupportedConversion`, same as any other
/// non-integral, non-array, non-function scalar. An ARRAY or
/// INCOMPLETE_ARRAY source takes the array-to-pointer decay path instead:
/// per spec.md §4.3 this is the *only* place an array source is accepted —
/// `MakeCast` never decays an array ahead of dispatch, so an array source
/// reaching any destination other than a pointer falls through to
/// `UnsupportedSource` in the top-level dispatcher. A FUNCTION source (a
/// function designator decaying to a function pointer) compares its own
/// type against the destination's referent via `equal_type`, mirroring
/// `from_pointer`'s pointer-to-pointer function-compatibility check.
pub fn to_pointer(expr: &TypedExpr, dest: &Type) -> Result<TypedExpr, TypeCoreError> {
    if !dest.is_pointer() {
        return Err(TypeCoreError::UnsupportedSource);
    }
    if expr.ty().is_pointer() {
        return from_pointer(expr, dest);
    }
    if matches!(expr.ty().kind, TypeKind::Array(_, _) | TypeKind::IncompleteArray(_)) {
        return Ok(wrap(CastKind::Nop, expr.clone(), dest.clone()));
    }
    if matches!(expr.ty().kind, TypeKind::Function(_)) {
        let dest_referent = dest.ref_type()?;
        if !Type::equal_type(&expr.ty(), dest_referent) {
            return Err(TypeCoreError::IncompatibleFunctionPointer);
        }
        return Ok(wrap(CastKind::Nop, expr.clone(), dest.clone()));
    }
    if !expr.ty().is_integral() {
        return Err(TypeCoreError::UnsupportedConversion);
    }
    let as_ulong = make_cast(expr, &Type::ulong())?;
    if let TypedExpr::ConstULong(v, _, env) = as_ulong {
        return Ok(TypedExpr::ConstPtr(v, dest.clone(), env));
    }
    Ok(wrap(CastKind::Nop, as_ulong, dest.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvId;

    fn e() -> EnvId {
        EnvId::dummy()
    }

    #[test]
    fn const_long_zero_to_pointer_yields_const_ptr() {
        // spec.md §8: ToPointer(ConstLong(0), TPointer(TChar)) -> ConstPtr(0).
        let src = TypedExpr::ConstLong(0, Type::long(), e());
        let dest = Type::pointer(Type::char());
        let out = to_pointer(&src, &dest).unwrap();
        assert_eq!(out, TypedExpr::ConstPtr(0, dest, e()));
    }

    #[test]
    fn equal_pointer_types_collapse_to_nop() {
        let src = TypedExpr::opaque(Type::pointer(Type::char()), e(), false);
        let dest = Type::pointer(Type::char()).with_const(true);
        let out = from_pointer(&src, &dest).unwrap();
        match out {
            TypedExpr::TypeCast { kind, .. } => assert_eq!(kind, CastKind::Nop),
            _ => panic!("expected TypeCast"),
        }
    }

    #[test]
    fn equal_const_pointer_types_pass_through_unchanged() {
        let src = TypedExpr::ConstPtr(4, Type::pointer(Type::char()), e());
        let dest = Type::pointer(Type::char()).with_const(true);
        let out = from_pointer(&src, &dest).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn incompatible_function_pointers_are_rejected() {
        use crate::types::FunctionType;
        let f1 = Type::function(FunctionType { return_type: Type::void(), params: vec![Type::long()], variadic: false });
        let f2 = Type::function(FunctionType { return_type: Type::long(), params: vec![], variadic: false });
        let src = TypedExpr::opaque(Type::pointer(f1), e(), false);
        let dest = Type::pointer(f2);
        assert_eq!(from_pointer(&src, &dest).unwrap_err(), TypeCoreError::IncompatibleFunctionPointer);
    }

    #[test]
    fn array_decays_to_pointer_to_element() {
        let arr = TypedExpr::opaque(Type::array(Type::long(), 4), e(), true);
        let out = decay_array(&arr).unwrap();
        assert!(Type::equal_type(&out.ty(), &Type::pointer(Type::long())));
    }

    #[test]
    fn to_pointer_decays_an_array_source() {
        let arr = TypedExpr::opaque(Type::array(Type::long(), 4), e(), true);
        let dest = Type::pointer(Type::long());
        let out = to_pointer(&arr, &dest).unwrap();
        match out {
            TypedExpr::TypeCast { kind, ty, .. } => {
                assert_eq!(kind, CastKind::Nop);
                assert!(Type::equal_type(&ty, &dest));
            }
            other => panic!("expected TypeCast, got {other:?}"),
        }
    }

    #[test]
    fn to_pointer_rejects_an_array_source_with_a_non_pointer_destination() {
        let arr = TypedExpr::opaque(Type::array(Type::long(), 4), e(), true);
        assert_eq!(to_pointer(&arr, &Type::long()).unwrap_err(), TypeCoreError::UnsupportedSource);
    }

    #[test]
    fn pointer_to_char_truncates_through_ulong() {
        let src = TypedExpr::ConstPtr(0x1_0001, Type::pointer(Type::long()), e());
        let out = from_pointer(&src, &Type::char()).unwrap();
        assert_eq!(out, TypedExpr::ConstLong(1, Type::char(), e()));
    }

    #[test]
    fn from_pointer_to_float_destination_is_rejected() {
        // spec.md §4.3: FromPointer's integral destination case is
        // `destType is integral`, not `isArith` — FLOAT/DOUBLE has no path.
        let src = TypedExpr::ConstPtr(4, Type::pointer(Type::char()), e());
        assert_eq!(from_pointer(&src, &Type::float()).unwrap_err(), TypeCoreError::UnsupportedConversion);
    }

    #[test]
    fn to_pointer_from_float_source_is_rejected() {
        // spec.md §4.3: ToPointer's only non-pointer/array/function source
        // case is `expr type is integral`; FLOAT/DOUBLE falls to "Else fail".
        let src = TypedExpr::ConstFloat(1.0, e());
        let dest = Type::pointer(Type::char());
        assert_eq!(to_pointer(&src, &dest).unwrap_err(), TypeCoreError::UnsupportedConversion);
    }

    #[test]
    fn to_pointer_accepts_a_function_designator_with_matching_referent() {
        use crate::types::FunctionType;
        let ft = FunctionType { return_type: Type::long(), params: vec![Type::char()], variadic: false };
        let src = TypedExpr::opaque(Type::function(ft.clone()), e(), false);
        let dest = Type::pointer(Type::function(ft));
        let out = to_pointer(&src, &dest).unwrap();
        match out {
            TypedExpr::TypeCast { kind, ty, .. } => {
                assert_eq!(kind, CastKind::Nop);
                assert!(Type::equal_type(&ty, &dest));
            }
            other => panic!("expected TypeCast, got {other:?}"),
        }
    }

    #[test]
    fn to_pointer_rejects_a_function_designator_with_mismatched_referent() {
        use crate::types::FunctionType;
        let f1 = FunctionType { return_type: Type::long(), params: vec![], variadic: false };
        let f2 = FunctionType { return_type: Type::void(), params: vec![Type::long()], variadic: false };
        let src = TypedExpr::opaque(Type::function(f1), e(), false);
        let dest = Type::pointer(Type::function(f2));
        assert_eq!(to_pointer(&src, &dest).unwrap_err(), TypeCoreError::IncompatibleFunctionPointer);
    }
}
