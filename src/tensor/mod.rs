//! Dense tensor output for sequence-model training.

mod sequence;

pub use sequence::{to_sequence_tensor, to_sequence_tensor_bounded, SequenceTensor};
