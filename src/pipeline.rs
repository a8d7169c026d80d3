use log::{debug, info};

use crate::arithmetic::{
    pad_to_common_width, signed_overflow, MultiplyAccumulate, RippleCarryAdder,
};
use crate::bit_vector::{BitVector, SignedBitVector};
use crate::error::Error;
use crate::report::{AdditionReport, ProductReport, Report, Value};

/// Adds the operands as unsigned and as two's complement numbers, then multiplies them.
/// The shorter operand is zero-padded to the length of the longer one first.
pub fn run(augend: &BitVector, addend: &BitVector) -> Result<Report, Error> {
    let (augend, addend) = pad_to_common_width(augend, addend);
    info!("operands padded to {} bits: {} and {}", augend.len(), augend, addend);

    let unsigned = add_unsigned(&augend, &addend)?;
    let signed = add_signed(
        &augend.clone().into_signed(),
        &addend.clone().into_signed(),
    )?;
    let product = multiply(augend, addend)?;

    Ok(Report {
        unsigned,
        signed,
        product,
    })
}

fn add_unsigned(augend: &BitVector, addend: &BitVector) -> Result<AdditionReport, Error> {
    let mut adder = RippleCarryAdder::new(augend.len());
    let sum: BitVector = adder.add(augend, addend)?;
    let overflow = adder.carry_out();
    if overflow {
        debug!("unsigned sum overflowed {} bits", adder.width());
    }

    Ok(AdditionReport {
        augend: Value::of(augend),
        addend: Value::of(addend),
        sum: Value::of(&sum),
        overflow,
        extended_sum: overflow.then(|| Value::of(&adder.extended_sum())),
    })
}

/// Adds at the operands' own width and flags two's complement overflow there.
/// The sum of the operands sign-extended by one bit is exact and becomes the
/// extended sum when the narrow one overflowed.
fn add_signed(
    augend: &SignedBitVector,
    addend: &SignedBitVector,
) -> Result<AdditionReport, Error> {
    let mut adder = RippleCarryAdder::new(augend.len());
    let sum = adder.add(augend, addend)?;
    let overflow = signed_overflow(augend, addend, &sum);

    let mut wide_augend = augend.clone();
    let mut wide_addend = addend.clone();
    wide_augend.extend(1);
    wide_addend.extend(1);
    let mut wide = RippleCarryAdder::new(wide_augend.len());
    let wide_sum = wide.add(&wide_augend, &wide_addend)?;
    if overflow {
        debug!("signed sum overflowed {} bits", adder.width());
    }

    Ok(AdditionReport {
        augend: Value::of(&wide_augend),
        addend: Value::of(&wide_addend),
        sum: Value::of(&sum),
        overflow,
        extended_sum: overflow.then(|| Value::of(&wide_sum)),
    })
}

fn multiply(multiplier: BitVector, multiplicand: BitVector) -> Result<ProductReport, Error> {
    let multiplier_value = Value::of(&multiplier);
    let multiplicand_value = Value::of(&multiplicand);
    let product = MultiplyAccumulate::new(multiplier, multiplicand).multiply()?;

    Ok(ProductReport {
        multiplier: multiplier_value,
        multiplicand: multiplicand_value,
        product: Value::of(&product),
    })
}
