mod campaign;
mod coupon;
#[cfg(test)]
mod tests;

pub use campaign::*;
pub use coupon::*;
