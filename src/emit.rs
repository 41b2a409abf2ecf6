//! The Code Emission Hook: the narrow interface through which a cast
//! primitive asks the assembler to emit sign/zero extension or FPU
//! conversion (spec §4.5). Specified as a contract, not implemented here —
//! no concrete x86 assembler is in scope for this crate.
//!
//! Method names and the mnemonics they stand for are grounded directly on
//! `backend/i686/codegen/helpers.rs::mov_load_for_type`
//! (`movsbl`/`movzbl`/`movswl`/`movzwl`) and
//! `backend/i686/codegen/float_helpers.rs`'s x87 load/store pairs
//! (`emit_f128_load_to_x87`, `emit_f64_store_from_x87`).

/// Where a value lives after a primitive's code has been emitted: a
/// general-purpose register, or the top of the x87 FPU stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitLocation {
    Gpr,
    FpuTop,
}

/// The six primitives the cast core can ask the emitter to realize. A cast
/// primitive maps to at most one of these; `Nop` and `Preserve*` primitives
/// emit nothing (pure retyping/reinterpretation) and so never call through
/// this trait.
pub trait CodeEmitter {
    /// `movsbl`: sign-extend a byte in a GPR to a 32-bit dword.
    fn movsbl(&mut self) -> EmitLocation;
    /// `movswl`: sign-extend a word in a GPR to a 32-bit dword.
    fn movswl(&mut self) -> EmitLocation;
    /// `movzbl`: zero-extend a byte in a GPR to a 32-bit dword.
    fn movzbl(&mut self) -> EmitLocation;
    /// `movzwl`: zero-extend a word in a GPR to a 32-bit dword.
    fn movzwl(&mut self) -> EmitLocation;
    /// Push a 32-bit GPR value onto the x87 FPU stack as a float/double,
    /// per the cast's destination width (`INT32_TO_FLOAT`/`INT32_TO_DOUBLE`).
    fn cgen_convert_long_to_float(&mut self, destination_is_double: bool) -> EmitLocation;
    /// Pop the x87 FPU stack top into a 32-bit GPR, truncating toward zero
    /// (`FLOAT_TO_INT32`/`DOUBLE_TO_INT32`).
    fn cgen_convert_float_to_long(&mut self) -> EmitLocation;
}
