// Primitive types shared with the KratOs node

/// Block number (height)
pub type BlockNumber = u64;

/// Balance in the smallest KRAT unit
pub type Balance = u128;
