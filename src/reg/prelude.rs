//! Memory-mapped registers prelude.

pub use super::{
    ClearOperand, FieldDecode, FieldVal, FixedReg, Operand, RReg, Reg, RegField, RegMap, RwReg,
    WReg, WoReg,
};
