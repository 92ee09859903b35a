//! Seeded value generators for braintwist programs.
//!
//! A program is a list of seeds. Every seed becomes a [`Generator::leaf`] backed by a 64-bit
//! Mersenne Twister ([`Mt64`]), optionally delayed so that it answers zero for a number of
//! draws before its real output starts. Leaves are combined pairwise into union nodes; the
//! resulting tree is itself a [`Generator`], so arbitrarily deep combinations behave like a
//! single stream of `u64` values.
#![forbid(unsafe_code)]

mod generator;
mod mt64;

pub use generator::{CombineOp, Generator, LeafGenerator, UnionGenerator};
pub use mt64::{Mt64, DEFAULT_SEED};
