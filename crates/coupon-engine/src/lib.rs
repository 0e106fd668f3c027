#![doc = include_str!("../README.md")]

mod codegen;
mod domain;
mod error;
mod rand;
mod service;
mod store;
#[cfg(test)]
mod test_support;
mod thread_random;
mod time;

pub use crate::codegen::*;
pub use crate::domain::*;
pub use crate::error::*;
pub use crate::rand::*;
pub use crate::service::*;
pub use crate::store::*;
pub use crate::thread_random::*;
pub use crate::time::*;
