//! Seam to the Green's-function engine.
//!
//! The engine turns a fetched tensor into Green's functions or synthetic
//! waveforms. Its numerics (tensor synthesis, source convolution, rotation)
//! live outside this crate; [`GreensEngine`] is the contract the façade calls.

use serde::{Deserialize, Serialize};

use crate::bundle::{SourceTimeFunction, Tensor};
use crate::error::SeisResult;
use crate::types::{Origin, Station};

/// Component convention of synthesized waveforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// East, north, vertical.
    #[default]
    Enz,
    /// Radial, transverse, vertical.
    Rtz,
}

/// Moment tensor in the RTP convention, in N·m:
/// `[Mrr, Mtt, Mpp, Mrt, Mrp, Mtp]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentTensor(pub [f64; 6]);

impl MomentTensor {
    pub fn new(mrr: f64, mtt: f64, mpp: f64, mrt: f64, mrp: f64, mtp: f64) -> Self {
        Self([mrr, mtt, mpp, mrt, mrp, mtp])
    }

    /// Convert from dyne·cm (CMTSOLUTION units) to N·m.
    pub fn from_dyne_cm(components: [f64; 6]) -> Self {
        Self(components.map(|c| c / 1e7))
    }

    pub fn components(&self) -> &[f64; 6] {
        &self.0
    }
}

/// Point force in the ENZ convention, in N.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceVector {
    pub east: f64,
    pub north: f64,
    pub vertical: f64,
}

impl ForceVector {
    pub fn new(east: f64, north: f64, vertical: f64) -> Self {
        Self {
            east,
            north,
            vertical,
        }
    }
}

/// One channel of engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub channel: String,
    pub data: Vec<f64>,
}

impl Trace {
    pub fn new(channel: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            channel: channel.into(),
            data,
        }
    }
}

/// Multi-channel engine output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waveforms {
    pub traces: Vec<Trace>,
}

impl Waveforms {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self { traces }
    }

    /// Trace for a channel, if present.
    pub fn select(&self, channel: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.channel == channel)
    }

    /// Multiply every sample of every trace.
    pub fn scale(&mut self, factor: f64) {
        for trace in &mut self.traces {
            for sample in &mut trace.data {
                *sample *= factor;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Everything the engine needs from one fetched bundle.
#[derive(Debug, Clone, Copy)]
pub struct EngineInput<'a> {
    pub model: &'a str,
    pub tensor: &'a Tensor,
    pub dt: f64,
    pub stf: &'a SourceTimeFunction,
    pub station: &'a Station,
    pub origin: &'a Origin,
}

/// Green's-function and synthetic-waveform engine.
///
/// Implementations report their own failures as `SeisError::Engine`.
pub trait GreensEngine {
    /// FK-type Green's function from an SGT, in SI units (m/(N·m)).
    fn fk_greens(&self, input: EngineInput<'_>) -> SeisResult<Waveforms>;

    /// Full 3D moment-tensor Green's function from an SGT.
    fn greens_3d_mt(&self, input: EngineInput<'_>) -> SeisResult<Waveforms>;

    /// Synthetic waveform for a moment-tensor source, from an SGT.
    fn synthetic_mt(
        &self,
        input: EngineInput<'_>,
        moment_tensor: &MomentTensor,
        orientation: Orientation,
    ) -> SeisResult<Waveforms>;

    /// Green's function for unit forces, from a DGF.
    fn greens_force(&self, input: EngineInput<'_>) -> SeisResult<Waveforms>;

    /// Synthetic waveform for a force source, from a DGF.
    fn synthetic_force(
        &self,
        input: EngineInput<'_>,
        force: &ForceVector,
        orientation: Orientation,
    ) -> SeisResult<Waveforms>;
}

impl<E: GreensEngine + ?Sized> GreensEngine for &E {
    fn fk_greens(&self, input: EngineInput<'_>) -> SeisResult<Waveforms> {
        (**self).fk_greens(input)
    }

    fn greens_3d_mt(&self, input: EngineInput<'_>) -> SeisResult<Waveforms> {
        (**self).greens_3d_mt(input)
    }

    fn synthetic_mt(
        &self,
        input: EngineInput<'_>,
        moment_tensor: &MomentTensor,
        orientation: Orientation,
    ) -> SeisResult<Waveforms> {
        (**self).synthetic_mt(input, moment_tensor, orientation)
    }

    fn greens_force(&self, input: EngineInput<'_>) -> SeisResult<Waveforms> {
        (**self).greens_force(input)
    }

    fn synthetic_force(
        &self,
        input: EngineInput<'_>,
        force: &ForceVector,
        orientation: Orientation,
    ) -> SeisResult<Waveforms> {
        (**self).synthetic_force(input, force, orientation)
    }
}
