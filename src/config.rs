use clap::{Parser, ValueEnum};

use crate::bit_vector::BitVector;
use crate::error::BitVectorError;

pub const DEFAULT_AUGEND: &str = "10001";
pub const DEFAULT_ADDEND: &str = "0010";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Ripple-carry adder and shift-add multiplier over binary strings.
#[derive(Parser, Debug)]
#[clap(version)]
pub struct Cli {
    /// Augend bits, most significant first. Absent or empty means 10001
    pub augend: Option<String>,

    /// Addend bits, most significant first. Absent means 0010
    pub addend: Option<String>,

    /// How to print the results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    /// Parses both operands, substituting the defaults for missing ones.
    pub fn operands(&self) -> Result<(BitVector, BitVector), BitVectorError> {
        let augend = match self.augend.as_deref() {
            None | Some("") => DEFAULT_AUGEND,
            Some(bits) => bits,
        };
        let addend = self.addend.as_deref().unwrap_or(DEFAULT_ADDEND);
        Ok((augend.parse()?, addend.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operands(args: &[&str]) -> Result<(BitVector, BitVector), BitVectorError> {
        let mut argv = vec!["ripple"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().operands()
    }

    #[test]
    fn test_defaults_when_absent() {
        let (augend, addend) = operands(&[]).unwrap();
        assert_eq!(augend.as_str(), "10001");
        assert_eq!(addend.as_str(), "0010");
    }

    #[test]
    fn test_empty_augend_uses_default() {
        let (augend, addend) = operands(&["", "11"]).unwrap();
        assert_eq!(augend.as_str(), "10001");
        assert_eq!(addend.as_str(), "11");
    }

    #[test]
    fn test_empty_addend_is_kept() {
        let (augend, addend) = operands(&["101", ""]).unwrap();
        assert_eq!(augend.as_str(), "101");
        assert!(addend.is_empty());
    }

    #[test]
    fn test_invalid_digit_is_reported() {
        let err = operands(&["1021"]).unwrap_err();
        assert_eq!(
            err,
            BitVectorError::InvalidDigit {
                digit: '2',
                position: 2
            }
        );
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["ripple", "--format", "json", "1"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.augend.as_deref(), Some("1"));
        let cli = Cli::try_parse_from(["ripple"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
    }
}
