//! Metadata tokens identifying registered types and members.
//!
//! A [`Token`] is a 32-bit value whose high byte names the metadata table (the member kind)
//! and whose low 24 bits are the row within that table. Tokens are issued by the
//! [`TypeRegistry`](crate::metadata::typesystem::TypeRegistry) and key the per-object field
//! storage.
//!
//! # Examples
//!
//! ```rust
//! use dotreflect::metadata::token::{Token, TableId};
//!
//! let token = Token::from_parts(TableId::Field, 3);
//! assert_eq!(token.value(), 0x0400_0003);
//! assert_eq!(token.table(), TableId::Field as u8);
//! assert_eq!(token.row(), 3);
//! ```

use std::fmt;

use strum::{Display, EnumIter};

/// Metadata tables a [`Token`] can point into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u8)]
pub enum TableId {
    /// Type definitions
    TypeDef = 0x02,
    /// Field definitions
    Field = 0x04,
    /// Method definitions (including property accessors)
    MethodDef = 0x06,
    /// Custom attribute instances
    CustomAttribute = 0x0C,
    /// Property definitions
    Property = 0x17,
}

/// The largest row a [`Token`] can address
pub const MAX_ROW: u32 = 0x00FF_FFFF;

/// A metadata token: table id in the high byte, row in the low 24 bits
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// Create a new token from its raw value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Create a new token from a table and a row
    #[must_use]
    pub fn from_parts(table: TableId, row: u32) -> Self {
        Token(((table as u32) << 24) | (row & MAX_ROW))
    }

    /// The raw value of this token
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The table id (high byte) of this token
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The row (low 24 bits) of this token
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & MAX_ROW
    }

    /// Returns `true` for the null token
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
