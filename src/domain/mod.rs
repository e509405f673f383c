//! Pure cart and checkout arithmetic, kept free of I/O.

pub mod checkout;
