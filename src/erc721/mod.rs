//! ERC-721 read-method handling
//!
//! Calldata is matched against a fixed registry of selectors, its arguments
//! decoded by name, and the [`Dispatcher`] answers each recognised method
//! either locally or through the upstream node.

pub mod calldata;
pub mod dispatch;
pub mod selectors;

pub use calldata::Calldata;
pub use dispatch::Dispatcher;
pub use selectors::{function_selector, Method, MethodRegistry};
