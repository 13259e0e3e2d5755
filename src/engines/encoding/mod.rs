pub mod bits;
pub mod field_consumer;
pub mod field_spec;

pub use bits::{BitSlice, BitVector, BitVectorBuilder};
pub use field_consumer::FieldConsumer;
pub use field_spec::FieldSpec;
