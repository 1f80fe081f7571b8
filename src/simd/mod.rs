//! SIMD-accelerated operations.
//!
//! This module provides platform-specific kernels for the rank query's hot
//! operations: the masked sum over a super-block's slot counters, and bulk
//! popcount. Kernels are compiled per architecture; the `simd` feature
//! controls whether the query path dispatches to them.

#[cfg(target_arch = "aarch64")]
pub mod neon;

#[cfg(target_arch = "x86_64")]
pub mod x86;
