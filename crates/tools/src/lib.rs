pub mod legacy;
pub mod payload;
