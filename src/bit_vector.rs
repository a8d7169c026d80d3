use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use bit_vec::BitVec;
use log::trace;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive, Zero};
use serde::{Serialize, Serializer};

use crate::bit_iterator;
use crate::error::BitVectorError;

/// How the digits of a [`BitVector`] are weighted when read as a number.
pub trait Signedness {
    const NAME: &'static str;

    fn value(digits: &str) -> BigInt;
}

/// Plain binary: every digit carries positive weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unsigned;

/// Two's complement: the most significant digit carries negative weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signed;

impl Signedness for Unsigned {
    const NAME: &'static str = "unsigned";

    fn value(digits: &str) -> BigInt {
        unsigned_value(digits)
    }
}

impl Signedness for Signed {
    const NAME: &'static str = "signed";

    fn value(digits: &str) -> BigInt {
        twos_complement_value(digits)
    }
}

/// Sum of 2^i over every '1' digit, i counted from the least significant digit.
pub fn unsigned_value(digits: &str) -> BigInt {
    let mut sum = BigUint::zero();
    for (i, c) in digits.chars().rev().enumerate() {
        if c == '1' {
            sum += BigUint::one() << i;
        }
    }
    BigInt::from(sum)
}

/// Same weighting as [`unsigned_value`], except the most significant digit counts as -2^(n-1).
pub fn twos_complement_value(digits: &str) -> BigInt {
    let mut chars = digits.chars();
    let Some(msb) = chars.next() else {
        return BigInt::zero();
    };
    let rest = unsigned_value(chars.as_str());
    if msb == '1' {
        rest - (BigInt::one() << (digits.len() - 1))
    } else {
        rest
    }
}

/// A binary number stored as '0'/'1' digits, most significant digit first.
///
/// The digit string is the only state; the length is always `content.len()`.
/// `S` picks the decimal interpretation, see [`Unsigned`] and [`Signed`].
pub struct BitVector<S = Unsigned> {
    content: String,
    signedness: PhantomData<S>,
}

pub type SignedBitVector = BitVector<Signed>;

impl<S: Signedness> BitVector<S> {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::from_digits(String::new())
    }

    // `content` must hold only '0' and '1'.
    fn from_digits(content: String) -> Self {
        BitVector {
            content,
            signedness: PhantomData,
        }
    }

    /// Creates an all-zero vector of the given width.
    pub fn zeroes(bits: usize) -> Self {
        Self::from_digits("0".repeat(bits))
    }

    pub fn from_bools(bits: &BitVec) -> Self {
        Self::from_digits(bit_iterator::from_bools(bits))
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Keeps only the `new_length` least significant digits.
    /// Lengths that are not smaller than the current one leave the vector untouched.
    pub fn truncate(&mut self, new_length: usize) {
        if new_length < self.len() {
            let dropped = self.len() - new_length;
            self.content = self.content.split_off(dropped);
        } else {
            trace!("ignoring truncate to {} of a {}-bit vector", new_length, self.len());
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Prepends zeroes until the vector is `new_length` digits long. Never shrinks.
    pub fn pad_to(&mut self, new_length: usize) -> &mut Self {
        if new_length > self.len() {
            let mut padded = "0".repeat(new_length - self.len());
            padded.push_str(&self.content);
            self.content = padded;
        }
        self
    }

    pub fn pad_with(&mut self, bits: usize) -> &mut Self {
        self.pad_to(self.len() + bits)
    }

    /// Digit at `index`, counted from the most significant end.
    ///
    /// Panics if `index` is out of range.
    pub fn bit(&self, index: usize) -> char {
        char::from(self.content.as_bytes()[index])
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.content.as_bytes().get(index).copied().map(char::from)
    }

    /// Overwrites the digit at `index`.
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, digit: char) -> Result<(), BitVectorError> {
        if digit != '0' && digit != '1' {
            return Err(BitVectorError::InvalidDigit {
                digit,
                position: index,
            });
        }
        assert!(
            index < self.len(),
            "index {} out of range for a {}-bit vector",
            index,
            self.len()
        );
        let mut buf = [0u8; 4];
        self.content
            .replace_range(index..=index, digit.encode_utf8(&mut buf));
        Ok(())
    }

    /// Multiplies by 2^shamt by appending zeroes on the least significant side.
    pub fn shifted_left(&self, shamt: usize) -> Self {
        let mut content = String::with_capacity(self.len() + shamt);
        content.push_str(&self.content);
        content.push_str(&"0".repeat(shamt));
        Self::from_digits(content)
    }

    pub fn to_bools(&self) -> BitVec {
        bit_iterator::to_bools(&self.content)
    }

    pub fn to_decimal(&self) -> BigInt {
        S::value(&self.content)
    }

    /// The decimal value, if it fits a native integer.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_decimal().to_i64()
    }

    /// Same digits under another interpretation.
    pub fn reinterpret<T: Signedness>(self) -> BitVector<T> {
        BitVector::from_digits(self.content)
    }

    pub fn into_signed(self) -> SignedBitVector {
        self.reinterpret()
    }

    pub fn into_unsigned(self) -> BitVector<Unsigned> {
        self.reinterpret()
    }
}

impl BitVector<Signed> {
    /// Widens by `bits` positions, copying the sign bit into every new leading position.
    /// An empty vector has no sign bit and is zero-filled.
    pub fn extend(&mut self, bits: usize) -> &mut Self {
        let sign = self.get(0).unwrap_or('0');
        self.pad_with(bits);
        if sign == '1' {
            self.content.replace_range(..bits, &"1".repeat(bits));
        }
        self
    }
}

impl<S: Signedness> FromStr for BitVector<S> {
    type Err = BitVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((position, digit)) = s.chars().enumerate().find(|(_, c)| *c != '0' && *c != '1')
        {
            return Err(BitVectorError::InvalidDigit { digit, position });
        }
        Ok(Self::from_digits(s.to_owned()))
    }
}

impl<S: Signedness> Default for BitVector<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for BitVector<S> {
    fn clone(&self) -> Self {
        BitVector {
            content: self.content.clone(),
            signedness: PhantomData,
        }
    }
}

impl<S> PartialEq for BitVector<S> {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl<S> Eq for BitVector<S> {}

impl<S: Signedness> fmt::Debug for BitVector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector<{}>({})", S::NAME, self.content)
    }
}

impl<S> fmt::Display for BitVector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl<S> Serialize for BitVector<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(&self.content)
    }
}
