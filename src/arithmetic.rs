use std::cmp;

use bit_vec::BitVec;
use log::{debug, trace};

use crate::bit_iterator::{describe, iter_lsb_first};
use crate::bit_vector::{BitVector, SignedBitVector, Signedness, Unsigned};
use crate::error::ArithmeticError;

/// A chain of full adders of a fixed width.
///
/// Operands must already be `width` bits long; pad them before calling [`RippleCarryAdder::add`].
/// The carry and sum of the last addition stay readable afterwards.
pub struct RippleCarryAdder {
    width: usize,
    carry_in: bool,
    carry: bool,
    // Least significant bit first.
    sum: BitVec,
}

impl RippleCarryAdder {
    pub fn new(width: usize) -> Self {
        Self::with_carry_in(width, false)
    }

    pub fn with_carry_in(width: usize, carry_in: bool) -> Self {
        RippleCarryAdder {
            width,
            carry_in,
            carry: carry_in,
            sum: BitVec::from_elem(width, false),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Adds two `width`-bit operands, rippling the carry from the least significant bit upwards.
    pub fn add<S: Signedness>(
        &mut self,
        augend: &BitVector<S>,
        addend: &BitVector<S>,
    ) -> Result<BitVector<S>, ArithmeticError> {
        if augend.len() != self.width || addend.len() != self.width {
            return Err(ArithmeticError::WidthMismatch {
                expected: self.width,
                augend: augend.len(),
                addend: addend.len(),
            });
        }

        let augend_bits = augend.to_bools();
        let addend_bits = addend.to_bools();
        trace!("a = {}, b = {}", describe(&augend_bits), describe(&addend_bits));
        self.carry = self.carry_in;

        // Each position needs the carry of the one below it, so this stays sequential.
        let pairs = iter_lsb_first(&augend_bits).zip(iter_lsb_first(&addend_bits));
        for (i, (a, b)) in pairs.enumerate() {
            self.sum.set(i, a ^ b ^ self.carry);
            self.carry = (a && b) || ((a ^ b) && self.carry);
        }

        let sum = self.sum();
        debug!(
            "{} + {} = {} (carry out: {})",
            augend, addend, sum, self.carry
        );
        Ok(sum)
    }

    /// Carry left over after the most significant bit. Set means the sum overflowed `width` bits.
    pub fn carry_out(&self) -> bool {
        self.carry
    }

    /// Result of the last addition, most significant bit first.
    pub fn sum<S: Signedness>(&self) -> BitVector<S> {
        let msb_first: BitVec = iter_lsb_first(&self.sum).collect();
        BitVector::from_bools(&msb_first)
    }

    /// The `width + 1` bit sum, with the carry out as its new most significant bit.
    pub fn extended_sum(&self) -> BitVector<Unsigned> {
        let mut bits = BitVec::with_capacity(self.width + 1);
        bits.push(self.carry);
        bits.extend(iter_lsb_first(&self.sum));
        BitVector::from_bools(&bits)
    }
}

/// Copies of both operands, the shorter one zero-padded to the length of the longer.
pub fn pad_to_common_width<S: Signedness>(
    augend: &BitVector<S>,
    addend: &BitVector<S>,
) -> (BitVector<S>, BitVector<S>) {
    let width = cmp::max(augend.len(), addend.len());
    let mut augend = augend.clone();
    let mut addend = addend.clone();
    augend.pad_to(width);
    addend.pad_to(width);
    (augend, addend)
}

/// Zero-pads both operands to the longer length and adds them.
/// Returns the sum together with the carry out.
pub fn add_padded<S: Signedness>(
    augend: &BitVector<S>,
    addend: &BitVector<S>,
) -> Result<(BitVector<S>, bool), ArithmeticError> {
    let (augend, addend) = pad_to_common_width(augend, addend);

    let mut adder = RippleCarryAdder::new(augend.len());
    let sum = adder.add(&augend, &addend)?;
    Ok((sum, adder.carry_out()))
}

/// Two's complement overflow: both operands share a sign and the sum's sign differs.
pub fn signed_overflow(
    augend: &SignedBitVector,
    addend: &SignedBitVector,
    sum: &SignedBitVector,
) -> bool {
    match (augend.get(0), addend.get(0), sum.get(0)) {
        (Some(a), Some(b), Some(s)) => a == b && s != a,
        _ => false,
    }
}

/// Unsigned shift-and-add multiplier.
///
/// The product is `multiplier.len() + multiplicand.len()` bits wide, which holds
/// any product of the two operands.
pub struct MultiplyAccumulate {
    multiplier: BitVector,
    multiplicand: BitVector,
    product: BitVector,
}

impl MultiplyAccumulate {
    pub fn new(multiplier: BitVector, multiplicand: BitVector) -> Self {
        let product = BitVector::zeroes(multiplier.len() + multiplicand.len());
        MultiplyAccumulate {
            multiplier,
            multiplicand,
            product,
        }
    }

    pub fn width(&self) -> usize {
        self.multiplier.len() + self.multiplicand.len()
    }

    /// Adds `multiplicand << shamt` into the product for every set bit `shamt` of the multiplier.
    pub fn multiply(&mut self) -> Result<BitVector, ArithmeticError> {
        let width = self.width();
        self.product = BitVector::zeroes(width);

        let multiplier_bits = self.multiplier.to_bools();
        for (shamt, set) in iter_lsb_first(&multiplier_bits).enumerate() {
            if !set {
                continue;
            }
            let mut partial = self.multiplicand.shifted_left(shamt);
            partial.pad_to(width);

            let mut adder = RippleCarryAdder::new(width);
            self.product = adder.add(&self.product, &partial)?;
            if adder.carry_out() {
                trace!("partial product at shift {} carried out of {} bits", shamt, width);
            }
        }

        debug!(
            "{} * {} = {}",
            self.multiplier, self.multiplicand, self.product
        );
        Ok(self.product.clone())
    }

    /// Product of the last [`MultiplyAccumulate::multiply`] call, zero before the first one.
    pub fn product(&self) -> &BitVector {
        &self.product
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn bv(s: &str) -> BitVector {
        s.parse().unwrap()
    }

    fn random_operand(rng: &mut StdRng, len: usize) -> BitVector {
        let digits: String = (0..len)
            .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
            .collect();
        bv(&digits)
    }

    #[rstest]
    #[case("10001", "00010", "10011", false)]
    #[case("1111", "0001", "0000", true)]
    #[case("0101", "0011", "1000", false)]
    #[case("1", "1", "0", true)]
    fn test_add(
        #[case] augend: &str,
        #[case] addend: &str,
        #[case] expected: &str,
        #[case] carry: bool,
    ) {
        let mut adder = RippleCarryAdder::new(augend.len());
        let sum = adder.add(&bv(augend), &bv(addend)).unwrap();
        assert_eq!(sum.as_str(), expected);
        assert_eq!(adder.carry_out(), carry);
    }

    #[test]
    fn test_padded_operands_from_cli_defaults() {
        let (sum, carry) = add_padded(&bv("10001"), &bv("0010")).unwrap();
        assert_eq!(sum.as_str(), "10011");
        assert_eq!(sum.to_decimal(), BigInt::from(19));
        assert!(!carry);
    }

    #[test]
    fn test_pad_to_common_width() {
        let (a, b) = pad_to_common_width(&bv("1"), &bv("0110"));
        assert_eq!(a.as_str(), "0001");
        assert_eq!(b.as_str(), "0110");

        let (a, b) = pad_to_common_width(&bv("101"), &bv(""));
        assert_eq!(a.as_str(), "101");
        assert_eq!(b.as_str(), "000");
    }

    #[test]
    fn test_extended_sum_on_overflow() {
        let mut adder = RippleCarryAdder::new(4);
        adder.add(&bv("1111"), &bv("0001")).unwrap();
        assert!(adder.carry_out());
        let extended = adder.extended_sum();
        assert_eq!(extended.as_str(), "10000");
        assert_eq!(extended.to_decimal(), BigInt::from(16));
    }

    #[test]
    fn test_zero_width_passes_carry_through() {
        let mut adder = RippleCarryAdder::with_carry_in(0, true);
        let sum = adder.add(&bv(""), &bv("")).unwrap();
        assert!(sum.is_empty());
        assert!(adder.carry_out());

        let mut adder = RippleCarryAdder::new(0);
        adder.add(&bv(""), &bv("")).unwrap();
        assert!(!adder.carry_out());
    }

    #[test]
    fn test_carry_in_is_added() {
        let mut adder = RippleCarryAdder::with_carry_in(4, true);
        let sum = adder.add(&bv("0011"), &bv("0100")).unwrap();
        assert_eq!(sum.as_str(), "1000");
        // A second addition starts again from the carry in.
        let sum = adder.add(&bv("0000"), &bv("0000")).unwrap();
        assert_eq!(sum.as_str(), "0001");
    }

    #[test]
    fn test_width_mismatch() {
        let mut adder = RippleCarryAdder::new(4);
        let err = adder.add(&bv("10001"), &bv("0010")).unwrap_err();
        assert_eq!(
            err,
            ArithmeticError::WidthMismatch {
                expected: 4,
                augend: 5,
                addend: 4
            }
        );
    }

    #[test]
    fn test_sum_matches_modular_addition() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..300 {
            let width = rng.gen_range(1..=20);
            let a = random_operand(&mut rng, width);
            let b = random_operand(&mut rng, width);
            let modulus = BigInt::one() << width;
            let exact = a.to_decimal() + b.to_decimal();

            let mut adder = RippleCarryAdder::new(width);
            let sum = adder.add(&a, &b).unwrap();
            assert_eq!(sum.len(), width);
            assert_eq!(sum.to_decimal(), &exact % &modulus);
            assert_eq!(adder.carry_out(), exact >= modulus);
            assert_eq!(adder.extended_sum().to_decimal(), exact);
        }
    }

    #[test]
    fn test_signed_addition_after_extension() {
        let mut a = bv("10001").into_signed();
        let mut b = bv("00010").into_signed();
        a.extend(1);
        b.extend(1);
        let mut adder = RippleCarryAdder::new(6);
        let sum = adder.add(&a, &b).unwrap();
        assert_eq!(sum.as_str(), "110011");
        assert_eq!(sum.to_decimal(), BigInt::from(-13));
        assert!(!signed_overflow(&a, &b, &sum));
    }

    #[test]
    fn test_signed_overflow_detection() {
        let a = bv("0111").into_signed();
        let b = bv("0001").into_signed();
        let (sum, _) = add_padded(&a, &b).unwrap();
        assert!(signed_overflow(&a, &b, &sum));

        let c = bv("1000").into_signed();
        let (sum, carry) = add_padded(&c, &c).unwrap();
        assert!(carry);
        assert!(signed_overflow(&c, &c, &sum));

        let d = bv("1111").into_signed();
        let (sum, carry) = add_padded(&d, &b).unwrap();
        assert!(carry);
        assert!(!signed_overflow(&d, &b, &sum));
    }

    #[test]
    fn test_sign_extended_sum_is_exact() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..300 {
            let width = rng.gen_range(1..=16);
            let mut a = random_operand(&mut rng, width).into_signed();
            let mut b = random_operand(&mut rng, width).into_signed();
            let exact = a.to_decimal() + b.to_decimal();
            a.extend(1);
            b.extend(1);
            let mut adder = RippleCarryAdder::new(width + 1);
            let sum = adder.add(&a, &b).unwrap();
            assert!(!signed_overflow(&a, &b, &sum));
            assert_eq!(sum.to_decimal(), exact);
        }
    }

    #[test]
    fn test_multiply_scenario() {
        let mut mac = MultiplyAccumulate::new(bv("0011"), bv("0101"));
        assert_eq!(mac.width(), 8);
        let product = mac.multiply().unwrap();
        assert_eq!(product.as_str(), "00001111");
        assert_eq!(product.to_decimal(), BigInt::from(15));
        assert_eq!(mac.product(), &product);
    }

    #[test]
    fn test_multiply_is_repeatable() {
        let mut mac = MultiplyAccumulate::new(bv("11"), bv("11"));
        assert_eq!(mac.multiply().unwrap().as_str(), "1001");
        assert_eq!(mac.multiply().unwrap().as_str(), "1001");
    }

    #[test]
    fn test_multiply_with_empty_operand() {
        let mut mac = MultiplyAccumulate::new(bv("101"), bv(""));
        assert_eq!(mac.multiply().unwrap().as_str(), "000");
    }

    #[test]
    fn test_multiply_matches_product() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let (m_len, n_len) = (rng.gen_range(1..=12), rng.gen_range(1..=12));
            let m = random_operand(&mut rng, m_len);
            let n = random_operand(&mut rng, n_len);
            let expected = m.to_decimal() * n.to_decimal();
            let width = m.len() + n.len();
            let product = MultiplyAccumulate::new(m, n).multiply().unwrap();
            assert_eq!(product.len(), width);
            assert_eq!(product.to_decimal(), expected);
        }
    }
}
