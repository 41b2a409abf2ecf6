//! The C type model: a closed algebraic description of the types the
//! conversion engine reasons about, plus the handful of derived operations
//! (`size_of`, `align_of`, `ref_type`, equality) the rest of the core needs.
//!
//! Narrowed from the teacher's 64-bit `CType` (`Int`/`UInt` distinct from
//! `Long`/`ULong`, 8-byte pointers) to the 32-bit x86 target this core
//! assumes: `LONG`/`ULONG` are the sole 32-bit integer kind, and pointers
//! are 4 bytes.

use crate::error::TypeCoreError;

/// The kind of a C type, ignoring qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Void,
    Char,
    UChar,
    Short,
    UShort,
    Long,
    ULong,
    Float,
    Double,
    Pointer(Box<Type>),
    Array(Box<Type>, usize),
    IncompleteArray(Box<Type>),
    Function(Box<FunctionType>),
    StructOrUnion(StructType),
}

/// A C function type: return type, parameter types (names are not
/// significant to the conversion core and are dropped), and variadic flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub return_type: Type,
    pub params: Vec<Type>,
    pub variadic: bool,
}

/// A struct or union's member layout. Field order matters for the naive
/// sum-of-fields size approximation below but not for equality beyond
/// shape — two struct types are equal only when their tag, fields, and
/// union-ness all agree (see `equal_type`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    pub tag: Option<String>,
    pub is_union: bool,
    pub fields: Vec<StructField>,
    /// `None` marks a forward-declared (incomplete) struct/union.
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
}

/// A C type together with its `const`/`volatile` qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub is_const: bool,
    pub is_volatile: bool,
}

impl Type {
    fn unqualified(kind: TypeKind) -> Self {
        Type { kind, is_const: false, is_volatile: false }
    }

    pub fn void() -> Self {
        Self::unqualified(TypeKind::Void)
    }
    pub fn char() -> Self {
        Self::unqualified(TypeKind::Char)
    }
    pub fn uchar() -> Self {
        Self::unqualified(TypeKind::UChar)
    }
    pub fn short() -> Self {
        Self::unqualified(TypeKind::Short)
    }
    pub fn ushort() -> Self {
        Self::unqualified(TypeKind::UShort)
    }
    pub fn long() -> Self {
        Self::unqualified(TypeKind::Long)
    }
    pub fn ulong() -> Self {
        Self::unqualified(TypeKind::ULong)
    }
    pub fn float() -> Self {
        Self::unqualified(TypeKind::Float)
    }
    pub fn double() -> Self {
        Self::unqualified(TypeKind::Double)
    }
    pub fn pointer(referent: Type) -> Self {
        Self::unqualified(TypeKind::Pointer(Box::new(referent)))
    }
    pub fn array(elem: Type, len: usize) -> Self {
        Self::unqualified(TypeKind::Array(Box::new(elem), len))
    }
    pub fn incomplete_array(elem: Type) -> Self {
        Self::unqualified(TypeKind::IncompleteArray(Box::new(elem)))
    }
    pub fn function(ft: FunctionType) -> Self {
        Self::unqualified(TypeKind::Function(Box::new(ft)))
    }
    pub fn struct_or_union(st: StructType) -> Self {
        Self::unqualified(TypeKind::StructOrUnion(st))
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }
    pub fn with_volatile(mut self, is_volatile: bool) -> Self {
        self.is_volatile = is_volatile;
        self
    }

    /// CHAR..ULONG — the integral kinds.
    pub fn is_integral(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Char
                | TypeKind::UChar
                | TypeKind::Short
                | TypeKind::UShort
                | TypeKind::Long
                | TypeKind::ULong
        )
    }

    /// Integral ∪ float ∪ double.
    pub fn is_arith(&self) -> bool {
        self.is_integral() || matches!(self.kind, TypeKind::Float | TypeKind::Double)
    }

    /// Arith ∪ pointer.
    pub fn is_scalar(&self) -> bool {
        self.is_arith() || matches!(self.kind, TypeKind::Pointer(_))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.kind, TypeKind::Char | TypeKind::Short | TypeKind::Long)
    }

    /// Structural equality "modulo the qualifier rule": top-level
    /// const/volatile are ignored, but qualifiers nested inside a pointer's
    /// referent, an array's element, or a struct's field types are
    /// significant (the standard rule this is grounded on applies to the
    /// two operands of a comparison/assignment, not to their substructure).
    pub fn equal_type(a: &Type, b: &Type) -> bool {
        equal_kind(&a.kind, &b.kind)
    }

    /// Bytes. Fails `InvalidType` for an incomplete array or incomplete
    /// struct/union — there is no size for something without a bound.
    pub fn size_of(&self) -> Result<usize, TypeCoreError> {
        Ok(match &self.kind {
            TypeKind::Void => 0,
            TypeKind::Char | TypeKind::UChar => 1,
            TypeKind::Short | TypeKind::UShort => 2,
            TypeKind::Long | TypeKind::ULong | TypeKind::Float | TypeKind::Pointer(_) => 4,
            TypeKind::Double => 8,
            TypeKind::Array(elem, len) => elem.size_of()? * len,
            TypeKind::IncompleteArray(_) => return Err(TypeCoreError::InvalidType),
            TypeKind::Function(_) => 4, // function pointer size
            TypeKind::StructOrUnion(s) => {
                if !s.complete {
                    return Err(TypeCoreError::InvalidType);
                }
                // TODO: proper layout with alignment/padding; struct layout
                // computation is out of scope for this core (spec.md §1).
                if s.is_union {
                    s.fields
                        .iter()
                        .map(|f| f.ty.size_of())
                        .collect::<Result<Vec<_>, _>>()?
                        .into_iter()
                        .max()
                        .unwrap_or(0)
                } else {
                    s.fields
                        .iter()
                        .map(|f| f.ty.size_of())
                        .collect::<Result<Vec<_>, _>>()?
                        .into_iter()
                        .sum()
                }
            }
        })
    }

    /// Bytes. Same completeness rule as `size_of`.
    pub fn align_of(&self) -> Result<usize, TypeCoreError> {
        Ok(match &self.kind {
            TypeKind::Void => 1,
            TypeKind::Char | TypeKind::UChar => 1,
            TypeKind::Short | TypeKind::UShort => 2,
            TypeKind::Long | TypeKind::ULong | TypeKind::Float | TypeKind::Pointer(_) => 4,
            TypeKind::Double => 8,
            TypeKind::Array(elem, _) => elem.align_of()?,
            TypeKind::IncompleteArray(_) => return Err(TypeCoreError::InvalidType),
            TypeKind::Function(_) => 4,
            TypeKind::StructOrUnion(s) => {
                if !s.complete {
                    return Err(TypeCoreError::InvalidType);
                }
                s.fields
                    .iter()
                    .map(|f| f.ty.align_of())
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .max()
                    .unwrap_or(1)
            }
        })
    }

    /// The referent type of a pointer. Fails `InvalidType` on a non-pointer.
    pub fn ref_type(&self) -> Result<&Type, TypeCoreError> {
        match &self.kind {
            TypeKind::Pointer(inner) => Ok(inner),
            _ => Err(TypeCoreError::InvalidType),
        }
    }

    /// A struct/union is complete once its member list is known; an array
    /// is "complete" here in the sense this predicate is specified for
    /// (struct/union completeness), so non-aggregate types are vacuously
    /// complete.
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            TypeKind::StructOrUnion(s) => s.complete,
            TypeKind::IncompleteArray(_) => false,
            _ => true,
        }
    }
}

/// Full equality of a nested type: unlike `Type::equal_type`, qualifiers are
/// significant here. Used for every substructure position (pointer referent,
/// array element, function return/param, struct field) so that e.g.
/// `char*` and `const char*` compare unequal while `char` and `const char`
/// at the top level of an `equal_type` call do not.
fn equal_qualified(a: &Type, b: &Type) -> bool {
    a.is_const == b.is_const && a.is_volatile == b.is_volatile && equal_kind(&a.kind, &b.kind)
}

fn equal_kind(a: &TypeKind, b: &TypeKind) -> bool {
    match (a, b) {
        (TypeKind::Void, TypeKind::Void) => true,
        (TypeKind::Char, TypeKind::Char) => true,
        (TypeKind::UChar, TypeKind::UChar) => true,
        (TypeKind::Short, TypeKind::Short) => true,
        (TypeKind::UShort, TypeKind::UShort) => true,
        (TypeKind::Long, TypeKind::Long) => true,
        (TypeKind::ULong, TypeKind::ULong) => true,
        (TypeKind::Float, TypeKind::Float) => true,
        (TypeKind::Double, TypeKind::Double) => true,
        (TypeKind::Pointer(a), TypeKind::Pointer(b)) => equal_qualified(a, b),
        (TypeKind::Array(ae, al), TypeKind::Array(be, bl)) => al == bl && equal_qualified(ae, be),
        (TypeKind::IncompleteArray(ae), TypeKind::IncompleteArray(be)) => equal_qualified(ae, be),
        (TypeKind::Function(a), TypeKind::Function(b)) => {
            a.variadic == b.variadic
                && equal_qualified(&a.return_type, &b.return_type)
                && a.params.len() == b.params.len()
                && a.params
                    .iter()
                    .zip(b.params.iter())
                    .all(|(pa, pb)| equal_qualified(pa, pb))
        }
        (TypeKind::StructOrUnion(a), TypeKind::StructOrUnion(b)) => {
            a.is_union == b.is_union && a.tag == b.tag
        }
        _ => false,
    }
}
