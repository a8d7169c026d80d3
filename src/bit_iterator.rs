use bit_vec::BitVec;

/// Converts a digit string into booleans, index-aligned with the string (MSB first).
/// Anything other than '1' becomes `false`; callers validate digits beforehand.
pub fn to_bools(digits: &str) -> BitVec {
    let mut bits = BitVec::with_capacity(digits.len());
    for c in digits.chars() {
        bits.push(c == '1');
    }
    bits
}

/// Converts booleans back into a '0'/'1' digit string, keeping the order.
pub fn from_bools(bits: &BitVec) -> String {
    bits.iter().map(|b| if b { '1' } else { '0' }).collect()
}

/// Renders the bits the way a boolean array prints, e.g. `[ true false ]`.
pub fn describe(bits: &BitVec) -> String {
    let mut out = String::from("[ ");
    for b in bits.iter() {
        out.push_str(if b { "true " } else { "false " });
    }
    out.push(']');
    out
}

/// Walks a bit sequence from its least significant (last) bit to its most significant one.
pub struct LsbFirst<'a> {
    bits: &'a BitVec,
    // Number of bits not yet yielded.
    remaining: usize,
}

impl<'a> LsbFirst<'a> {
    pub fn new(bits: &'a BitVec) -> Self {
        LsbFirst {
            bits,
            remaining: bits.len(),
        }
    }
}

impl<'a> Iterator for LsbFirst<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None; // Past the most significant bit.
        }
        self.remaining -= 1;
        self.bits.get(self.remaining)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LsbFirst<'_> {}

/// Iterates over the given bits least-significant first.
pub fn iter_lsb_first(bits: &BitVec) -> LsbFirst<'_> {
    LsbFirst::new(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bools_keep_string_order() {
        let bits = to_bools("1101");
        assert_eq!(bits.len(), 4);
        assert_eq!(bits.get(0), Some(true));
        assert_eq!(bits.get(2), Some(false));
        assert_eq!(from_bools(&bits), "1101");
    }

    #[test]
    fn test_lsb_first_reverses() {
        let bits = to_bools("1000");
        let order: Vec<bool> = iter_lsb_first(&bits).collect();
        assert_eq!(order, vec![false, false, false, true]);
        assert_eq!(iter_lsb_first(&bits).len(), 4);
    }

    #[test]
    fn test_empty_sequence() {
        let bits = to_bools("");
        assert!(bits.is_empty());
        assert_eq!(iter_lsb_first(&bits).next(), None);
        assert_eq!(describe(&bits), "[ ]");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&to_bools("10")), "[ true false ]");
    }
}
