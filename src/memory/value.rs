//! Raw memory cell contents
//!
//! A [`MemoryCell`] pairs the raw [`Bits`] stored at one address with the
//! static type the interpreter attributed to them, if any. Cells are captured
//! once per pause and never mutated.
//!
//! # Bit encoding
//!
//! Bytes are stored little-endian. On disk they use the interpreter's native
//! binary-string form: `'0'`/`'1'` characters, most significant bit first,
//! with a length that is a multiple of 8.
//!
//! ```text
//! "00000000000000000000000000000101"  →  5 (4-byte int)
//! "11111111111111111111111111111111"  → -1 (frame-link sentinel)
//! ```

use super::types::{BaseType, TypeChain, TypeNode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Memory address type
pub type Address = u64;

/// Width of an interpreter word in bytes
pub const WORD_BYTES: usize = 4;

/// Raw little-endian bytes of one cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bits(Vec<u8>);

impl Bits {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Bits(bytes)
    }

    /// Encode an integer as a word-sized little-endian value
    pub fn from_int(value: i64) -> Self {
        Bits(value.to_le_bytes()[..WORD_BYTES].to_vec())
    }

    pub fn from_f32(value: f32) -> Self {
        Bits(value.to_le_bytes().to_vec())
    }

    pub fn from_char(value: u8) -> Self {
        Bits(vec![value])
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret as a signed integer, sign-extending from the stored width.
    ///
    /// Widths above 8 bytes keep only the low 8 bytes.
    pub fn as_int(&self) -> i64 {
        if self.0.is_empty() {
            return 0;
        }
        let width = self.0.len().min(8);
        let mut buf = [0u8; 8];
        buf[..width].copy_from_slice(&self.0[..width]);
        if self.0[width - 1] & 0x80 != 0 {
            for byte in &mut buf[width..] {
                *byte = 0xff;
            }
        }
        i64::from_le_bytes(buf)
    }

    /// Interpret as an IEEE float: 8 bytes as `f64`, anything else through `f32`
    pub fn as_float(&self) -> f64 {
        match self.0.len() {
            8 => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&self.0);
                f64::from_le_bytes(buf)
            }
            _ => {
                let mut buf = [0u8; 4];
                let width = self.0.len().min(4);
                buf[..width].copy_from_slice(&self.0[..width]);
                f32::from_le_bytes(buf) as f64
            }
        }
    }

    /// Low byte, the character payload
    pub fn as_char(&self) -> u8 {
        self.0.first().copied().unwrap_or(0)
    }

    /// Binary-string form, most significant bit first
    pub fn to_bit_string(&self) -> String {
        self.0
            .iter()
            .rev()
            .map(|byte| format!("{:08b}", byte))
            .collect()
    }

    /// Parse the binary-string form
    pub fn parse_bit_string(s: &str) -> Result<Self, String> {
        if s.len() % 8 != 0 {
            return Err(format!(
                "bit string length {} is not a multiple of 8",
                s.len()
            ));
        }
        let mut bytes = Vec::with_capacity(s.len() / 8);
        for chunk in s.as_bytes().chunks(8).rev() {
            let mut byte = 0u8;
            for &c in chunk {
                byte = match c {
                    b'0' => byte << 1,
                    b'1' => (byte << 1) | 1,
                    other => {
                        return Err(format!("invalid bit character '{}'", other as char));
                    }
                };
            }
            bytes.push(byte);
        }
        Ok(Bits(bytes))
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl Serialize for Bits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bit_string())
    }
}

impl<'de> Deserialize<'de> for Bits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Bits::parse_bit_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Content of one address, with its static type when known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryCell {
    pub bits: Bits,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeChain>,
}

impl MemoryCell {
    pub fn new(bits: Bits, ty: Option<TypeChain>) -> Self {
        MemoryCell { bits, ty }
    }

    /// Cell holding an integer of the given type
    pub fn typed(value: i64, ty: TypeChain) -> Self {
        MemoryCell::new(Bits::from_int(value), Some(ty))
    }

    /// Cell with no static type (raw heap bytes, saved frame links)
    pub fn untyped(value: i64) -> Self {
        MemoryCell::new(Bits::from_int(value), None)
    }

    pub fn int_value(&self) -> i64 {
        self.bits.as_int()
    }

    /// The type chain, treating an empty chain like a missing one
    pub fn type_chain(&self) -> Option<&[TypeNode]> {
        self.ty.as_deref().filter(|chain| !chain.is_empty())
    }
}

/// Render a cell's bits as a literal of its static type.
///
/// Untyped cells render as an empty string; callers decide what to show
/// instead.
pub fn format_cell(cell: &MemoryCell) -> String {
    let Some(chain) = cell.type_chain() else {
        return String::new();
    };
    match &chain[0] {
        TypeNode::BaseType { base_type } => format_base(&cell.bits, *base_type),
        // Pointers are plain addresses in this memory model
        TypeNode::Pointer | TypeNode::Array { .. } | TypeNode::Parameters => {
            format!("{}", cell.bits.as_int())
        }
    }
}

fn format_base(bits: &Bits, base_type: BaseType) -> String {
    match base_type {
        BaseType::Int | BaseType::Void => format!("{}", bits.as_int()),
        BaseType::Float if bits.bytes().len() == 8 => format!("{}", bits.as_float()),
        BaseType::Float => format!("{}", bits.as_float() as f32),
        BaseType::Char => {
            let byte = bits.as_char();
            if byte.is_ascii_graphic() || byte == b' ' {
                format!("'{}'", byte as char)
            } else {
                format!("'\\x{:02x}'", byte)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_string_is_msb_first() {
        let bits = Bits::parse_bit_string("00000000000000000000000100000010").unwrap();
        assert_eq!(bits.bytes(), &[0x02, 0x01, 0x00, 0x00]);
        assert_eq!(bits.as_int(), 258);
        assert_eq!(bits.to_bit_string(), "00000000000000000000000100000010");
    }

    #[test]
    fn negative_words_sign_extend() {
        assert_eq!(Bits::from_int(-1).as_int(), -1);
        assert_eq!(Bits::from_bytes(vec![0xfe]).as_int(), -2);
    }

    #[test]
    fn rejects_ragged_or_non_binary_strings() {
        assert!(Bits::parse_bit_string("0101").is_err());
        assert!(Bits::parse_bit_string("0000000x").is_err());
    }

    #[test]
    fn formats_chars_and_floats() {
        let c = MemoryCell::new(Bits::from_char(b'a'), Some(vec![TypeNode::base(BaseType::Char)]));
        assert_eq!(format_cell(&c), "'a'");
        let nul = MemoryCell::new(Bits::from_char(0), Some(vec![TypeNode::base(BaseType::Char)]));
        assert_eq!(format_cell(&nul), "'\\x00'");
        let f = MemoryCell::new(Bits::from_f32(1.5), Some(vec![TypeNode::base(BaseType::Float)]));
        assert_eq!(format_cell(&f), "1.5");
    }
}
