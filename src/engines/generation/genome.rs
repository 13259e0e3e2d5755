use crate::engines::encoding::BitVector;

/// Capability set a search engine's individuals must expose for evaluation.
///
/// The bits are only ever read. Fitness is written exactly once per
/// evaluation, after rendering and scoring have finished, and only into the
/// genome being evaluated.
///
/// # Why a trait instead of a concrete struct?
///
/// The search engine owns population state and usually wraps the bits with
/// its own bookkeeping (age, lineage, cached scores). Anything that can hand
/// out its bits and accept a fitness can be evaluated.
pub trait Genome {
    fn bits(&self) -> &BitVector;
    fn fitness(&self) -> u64;
    fn set_fitness(&mut self, fitness: u64);
}

/// Plain genome: a bit vector plus the last fitness assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGenome {
    bits: BitVector,
    fitness: u64,
}

impl BitGenome {
    pub fn new(bits: BitVector) -> Self {
        Self { bits, fitness: 0 }
    }

    pub fn into_bits(self) -> BitVector {
        self.bits
    }
}

impl From<BitVector> for BitGenome {
    fn from(bits: BitVector) -> Self {
        Self::new(bits)
    }
}

impl Genome for BitGenome {
    fn bits(&self) -> &BitVector {
        &self.bits
    }

    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}
