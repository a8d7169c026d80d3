#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BitVectorError {
    #[error("Invalid binary digit '{digit}' at position {position}")]
    InvalidDigit { digit: char, position: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Operand width mismatch: adder is {expected} bits wide, got {augend} and {addend}")]
    WidthMismatch {
        expected: usize,
        augend: usize,
        addend: usize,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad operand: {0}")]
    BitVector(#[from] BitVectorError),
    #[error("Arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),
    #[error("Report encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
