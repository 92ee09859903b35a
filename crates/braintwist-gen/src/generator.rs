use crate::mt64::Mt64;

/// Binary operator applied element-wise by a union generator.
#[derive(Clone, Copy)]
pub enum CombineOp {
    Xor,
    Custom(fn(u64, u64) -> u64),
}

impl CombineOp {
    #[inline]
    pub fn apply(self, lhs: u64, rhs: u64) -> u64 {
        match self {
            CombineOp::Xor => lhs ^ rhs,
            CombineOp::Custom(op) => op(lhs, rhs),
        }
    }
}

impl std::fmt::Debug for CombineOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombineOp::Xor => f.write_str("Xor"),
            CombineOp::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// A Mersenne Twister that reports zero for its first `delay` draws.
#[derive(Debug, Clone)]
pub struct LeafGenerator {
    seed: u64,
    delay: u32,
    rng: Mt64,
}

impl LeafGenerator {
    pub fn new(seed: u64, delay: u32) -> Self {
        Self {
            seed,
            delay,
            rng: Mt64::new(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws still to be answered with zero.
    pub fn remaining_delay(&self) -> u32 {
        self.delay
    }

    #[inline]
    pub fn generate(&mut self) -> u64 {
        if self.delay > 0 {
            self.delay -= 1;
            return 0;
        }
        self.rng.next_u64()
    }
}

#[derive(Debug, Clone)]
pub struct UnionGenerator {
    lhs: Box<Generator>,
    rhs: Box<Generator>,
    op: CombineOp,
}

impl UnionGenerator {
    #[inline]
    pub fn generate(&mut self) -> u64 {
        // Left before right: custom operators may not commute.
        let lhs = self.lhs.generate();
        let rhs = self.rhs.generate();
        self.op.apply(lhs, rhs)
    }

    pub fn op(&self) -> CombineOp {
        self.op
    }

    pub fn children(&self) -> (&Generator, &Generator) {
        (&self.lhs, &self.rhs)
    }
}

/// Node of a generator tree.
///
/// Leaves own a PRNG; unions own both of their children outright, so a tree is always
/// acyclic and a `Generator` can be moved or cloned as a single value. Two generators built
/// the same way and asked for the same number of values agree on every value.
#[derive(Debug, Clone)]
pub enum Generator {
    Leaf(LeafGenerator),
    Union(UnionGenerator),
}

impl Generator {
    pub fn leaf(seed: u64, delay: u32) -> Self {
        Generator::Leaf(LeafGenerator::new(seed, delay))
    }

    pub fn combine(lhs: Generator, rhs: Generator, op: CombineOp) -> Self {
        Generator::Union(UnionGenerator {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            op,
        })
    }

    pub fn xor(lhs: Generator, rhs: Generator) -> Self {
        Self::combine(lhs, rhs, CombineOp::Xor)
    }

    /// Left fold: `((g0 op g1) op g2) op ...`. Returns `None` for an empty iterator.
    pub fn compose<I>(generators: I, op: CombineOp) -> Option<Self>
    where
        I: IntoIterator<Item = Generator>,
    {
        let mut iter = generators.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, next| Self::combine(acc, next, op)))
    }

    #[inline]
    pub fn generate(&mut self) -> u64 {
        match self {
            Generator::Leaf(leaf) => leaf.generate(),
            Generator::Union(union) => union.generate(),
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Generator::Leaf(_) => 1,
            Generator::Union(union) => union.lhs.leaf_count() + union.rhs.leaf_count(),
        }
    }
}

impl Iterator for Generator {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
