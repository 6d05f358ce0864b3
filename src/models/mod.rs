// ============ Inference runtime seam ============

pub(crate) mod linear;

pub use linear::{LinearClassifier, NUM_LABELS};

use crate::error::Result;

/// A numeric inference runtime: fixed-length feature vector in, fixed-length score vector out.
///
/// Initialization is the implementor's constructor; shutdown is `Drop`. The analyzer holds
/// a single instance for the process lifetime and shares it read-only across requests.
pub trait InferenceRuntime: Send + Sync {
    /// Run one forward pass over `input`.
    fn run(&self, input: &[f32]) -> Result<Vec<f32>>;

    /// Number of graph inputs the runtime exposes.
    fn num_inputs(&self) -> usize {
        1
    }

    /// Number of graph outputs the runtime exposes.
    fn num_outputs(&self) -> usize {
        1
    }
}

impl<R: InferenceRuntime + ?Sized> InferenceRuntime for Box<R> {
    fn run(&self, input: &[f32]) -> Result<Vec<f32>> {
        (**self).run(input)
    }

    fn num_inputs(&self) -> usize {
        (**self).num_inputs()
    }

    fn num_outputs(&self) -> usize {
        (**self).num_outputs()
    }
}
