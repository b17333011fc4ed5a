pub mod common;
pub mod department;
pub mod filter;
pub mod order;
pub mod quotation;
