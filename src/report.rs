use std::fmt;

use serde::Serialize;

use crate::bit_vector::{BitVector, Signedness};

/// A number as printed: its decimal value under some interpretation and its digits.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub decimal: String,
    pub binary: String,
}

impl Value {
    pub fn of<S: Signedness>(bits: &BitVector<S>) -> Self {
        Value {
            decimal: bits.to_decimal().to_string(),
            binary: bits.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_10 = {}_2", self.decimal, self.binary)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AdditionReport {
    pub augend: Value,
    pub addend: Value,
    pub sum: Value,
    pub overflow: bool,
    /// Present only when the sum overflowed its width.
    pub extended_sum: Option<Value>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductReport {
    pub multiplier: Value,
    pub multiplicand: Value,
    pub product: Value,
}

/// Everything one run computes, in the order it is printed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub unsigned: AdditionReport,
    pub signed: AdditionReport,
    pub product: ProductReport,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing as Unsigned Integers:")?;
        writeln!(f, "Addend 1: {}", self.unsigned.augend)?;
        writeln!(f, "Addend 2: {}", self.unsigned.addend)?;
        writeln!(f, "Sum: {}", self.unsigned.sum)?;
        if let Some(extended) = &self.unsigned.extended_sum {
            writeln!(f, "Integer Overflow! Extending...")?;
            writeln!(f, "Extended Sum: {}", extended)?;
        }

        writeln!(f, "Processing as Signed Two's Complement Integers:")?;
        writeln!(f, "Sign extending...")?;
        writeln!(f, "Addend 1: {}", self.signed.augend)?;
        writeln!(f, "Addend 2: {}", self.signed.addend)?;
        writeln!(f, "Signed Sum: {}", self.signed.sum)?;
        if let Some(extended) = &self.signed.extended_sum {
            writeln!(f, "Integer Overflow! Extending...")?;
            writeln!(f, "Extended Signed Sum: {}", extended)?;
        }

        let p = &self.product;
        writeln!(f, "Multiplying as Unsigned Integers:")?;
        writeln!(
            f,
            "Base 10: {} * {} = {}",
            p.multiplier.decimal, p.multiplicand.decimal, p.product.decimal
        )?;
        writeln!(
            f,
            "Base 2: {} * {} = {}",
            p.multiplier.binary, p.multiplicand.binary, p.product.binary
        )
    }
}
