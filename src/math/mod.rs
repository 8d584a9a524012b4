//! Arithmetic kernels.

pub mod dot_product;
