//! The typed expression model (spec §3) and the closed cast-primitive
//! kind enumeration (spec §4.2).
//!
//! One constant variant per representable *host* width, mirroring the
//! teacher's `IrConst` (`I8`/`I16`/`I32`/`I64`/`F32`/`F64`, referenced
//! throughout `ir/lowering/const_eval.rs`). CHAR/SHORT/LONG share the
//! `ConstLong(i32)` representation (a canonical sign-extended-to-i32
//! value) and UCHAR/USHORT/ULONG share `ConstULong(u32)`, exactly as
//! spec.md §8's worked examples show (`ConstLong(257) → CHAR` folds to
//! `ConstLong(1)`, not a distinct "narrow char constant" shape) — so each
//! carries its own logical `Type` alongside the host representation,
//! since two constants with the same `i32` payload but different logical
//! types (a CHAR 1 vs a LONG 1) must still drive further conversions
//! correctly. `TypeCast` carries one of the 14 closed primitives plus the
//! inner expression and destination type, and `Other` stands in for "all
//! other expression forms (not specified here)" — the surface forms a
//! parser/sema layer would produce, out of scope here.

use crate::env::EnvId;
use crate::types::Type;

/// The closed set of value-domain transformations the code generator can
/// emit directly (spec §4.2). Every legal C conversion decomposes to a
/// sequence of these; there is no escape hatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    /// Retype only; no value change.
    Nop,
    /// Sign-extend byte → word.
    Int8ToInt16,
    /// Sign-extend byte → dword.
    Int8ToInt32,
    /// Sign-extend word → dword.
    Int16ToInt32,
    /// Zero-extend byte → word.
    Uint8ToUint16,
    /// Zero-extend byte → dword.
    Uint8ToUint32,
    /// Zero-extend word → dword.
    Uint16ToUint32,
    /// Low-byte reinterpretation; upper bits discarded.
    PreserveInt8,
    /// Low-word reinterpretation; upper bits discarded.
    PreserveInt16,
    /// i32 (GPR) → f32 (FPU top), round to nearest/ties-to-even.
    Int32ToFloat,
    /// i32 (GPR) → f64 (FPU top), exact.
    Int32ToDouble,
    /// f32/f64 (FPU top) → i32 (GPR), truncate toward zero; overflow is
    /// undefined.
    FloatToInt32,
    /// f64 (FPU top) → i32 (GPR), same as `FloatToInt32`.
    DoubleToInt32,
    /// f32 → f64, exact.
    FloatToDouble,
    /// f64 → f32, round to nearest/ties-to-even.
    DoubleToFloat,
}

/// A typed expression node. Immutable after construction; nodes form a DAG
/// rooted at top-level statements (sharing permitted, not required).
#[derive(Debug, Clone, PartialEq)]
pub enum TypedExpr {
    /// A CHAR/SHORT/LONG-typed constant, stored as a canonical
    /// sign-extended-to-i32 value plus the logical type it was folded to.
    ConstLong(i32, Type, EnvId),
    /// A UCHAR/USHORT/ULONG-typed constant, stored as a canonical
    /// zero/truncated-to-u32 value plus the logical type it was folded to.
    ConstULong(u32, Type, EnvId),
    ConstFloat(f32, EnvId),
    ConstDouble(f64, EnvId),
    ConstPtr(u32, Type, EnvId),
    /// One arm per cast-primitive kind. Never an lvalue (invariant, spec
    /// §3). `ty` is the destination type this cast produces.
    TypeCast {
        kind: CastKind,
        inner: Box<TypedExpr>,
        ty: Type,
        env: EnvId,
    },
    /// Placeholder for "all other expression forms (not specified here)" —
    /// identifiers, calls, member access, and the rest of the surface
    /// expression grammar the parser/sema layer produces. The conversion
    /// core treats these as opaque: it only needs their `ty`/`env`/lvalue/
    /// const-expr facts, carried inline since there is no surface AST in
    /// scope to point back into.
    Other {
        ty: Type,
        env: EnvId,
        is_lvalue: bool,
        is_const_expr: bool,
    },
}

impl TypedExpr {
    /// The expression's logical type.
    pub fn ty(&self) -> Type {
        match self {
            TypedExpr::ConstLong(_, ty, _) => ty.clone(),
            TypedExpr::ConstULong(_, ty, _) => ty.clone(),
            TypedExpr::ConstFloat(_, _) => Type::float(),
            TypedExpr::ConstDouble(_, _) => Type::double(),
            TypedExpr::ConstPtr(_, ty, _) => ty.clone(),
            TypedExpr::TypeCast { ty, .. } => ty.clone(),
            TypedExpr::Other { ty, .. } => ty.clone(),
        }
    }

    pub fn env(&self) -> EnvId {
        match self {
            TypedExpr::ConstLong(_, _, e)
            | TypedExpr::ConstULong(_, _, e)
            | TypedExpr::ConstFloat(_, e)
            | TypedExpr::ConstDouble(_, e)
            | TypedExpr::ConstPtr(_, _, e) => *e,
            TypedExpr::TypeCast { env, .. } => *env,
            TypedExpr::Other { env, .. } => *env,
        }
    }

    /// Invariant: a `TypeCast` is never an lvalue.
    pub fn is_lvalue(&self) -> bool {
        match self {
            TypedExpr::TypeCast { .. } => false,
            TypedExpr::Other { is_lvalue, .. } => *is_lvalue,
            // Constants are never lvalues.
            _ => false,
        }
    }

    /// Invariant: if `is_const_expr` then the value is representable as one
    /// of the `Const*` variants.
    pub fn is_const_expr(&self) -> bool {
        match self {
            TypedExpr::ConstLong(_, _, _)
            | TypedExpr::ConstULong(_, _, _)
            | TypedExpr::ConstFloat(_, _)
            | TypedExpr::ConstDouble(_, _)
            | TypedExpr::ConstPtr(_, _, _) => true,
            TypedExpr::TypeCast { .. } => false,
            TypedExpr::Other { is_const_expr, .. } => *is_const_expr,
        }
    }

    /// Build a non-constant `Other` node of the given type, e.g. to stand
    /// in for a runtime-valued surface expression in tests.
    pub fn opaque(ty: Type, env: EnvId, is_lvalue: bool) -> Self {
        TypedExpr::Other { ty, env, is_lvalue, is_const_expr: false }
    }
}
