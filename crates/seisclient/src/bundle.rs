//! Fetched data bundle and its three-object wire/cache encoding.
//!
//! The service and the cache share one format: three JSON documents written
//! back to back, each followed by a newline, in fixed order:
//!
//! ```text
//! {"shape":[n_t,3,6],"data":[...]}   # tensor payload
//! 0.05                               # sampling interval (s)
//! [...]                              # source-time-function samples
//! ```

use serde::{Deserialize, Serialize};

/// Dense numeric tensor in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl Tensor {
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Self {
        Self { shape, data }
    }

    /// Number of elements implied by `shape`, or `None` if it overflows `usize`.
    pub fn element_count(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
    }
}

/// Source-time-function samples, at the bundle's sampling interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTimeFunction(pub Vec<f32>);

impl SourceTimeFunction {
    pub fn samples(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Tensor, sampling interval and source-time-function, always sourced together.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedBundle {
    pub tensor: Tensor,
    pub dt: f64,
    pub stf: SourceTimeFunction,
}

/// Why a byte buffer is not a valid bundle.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode {part}: {source}")]
    Json {
        part: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("tensor shape {shape:?} implies {expected} values, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("tensor shape {0:?} overflows the element count")]
    ShapeOverflow(Vec<usize>),

    #[error("sampling interval must be finite and positive, got {0}")]
    BadSamplingInterval(f64),
}

impl FetchedBundle {
    pub fn new(tensor: Tensor, dt: f64, stf: SourceTimeFunction) -> Self {
        Self { tensor, dt, stf }
    }

    /// Decode exactly three objects; trailing content is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut de = serde_json::Deserializer::from_slice(bytes);

        let tensor = Tensor::deserialize(&mut de).map_err(|source| DecodeError::Json {
            part: "tensor payload",
            source,
        })?;
        let dt = f64::deserialize(&mut de).map_err(|source| DecodeError::Json {
            part: "sampling interval",
            source,
        })?;
        let stf =
            SourceTimeFunction::deserialize(&mut de).map_err(|source| DecodeError::Json {
                part: "source-time-function",
                source,
            })?;
        de.end().map_err(|source| DecodeError::Json {
            part: "end of bundle",
            source,
        })?;

        let bundle = Self { tensor, dt, stf };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Encode in the fixed three-object order.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::with_capacity(self.tensor.data.len() * 12 + self.stf.len() * 12 + 64);
        serde_json::to_writer(&mut buf, &self.tensor)?;
        buf.push(b'\n');
        serde_json::to_writer(&mut buf, &self.dt)?;
        buf.push(b'\n');
        serde_json::to_writer(&mut buf, &self.stf)?;
        buf.push(b'\n');
        Ok(buf)
    }

    fn validate(&self) -> Result<(), DecodeError> {
        let expected = self
            .tensor
            .element_count()
            .ok_or_else(|| DecodeError::ShapeOverflow(self.tensor.shape.clone()))?;
        if expected != self.tensor.data.len() {
            return Err(DecodeError::ShapeMismatch {
                shape: self.tensor.shape.clone(),
                expected,
                actual: self.tensor.data.len(),
            });
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(DecodeError::BadSamplingInterval(self.dt));
        }
        Ok(())
    }
}
