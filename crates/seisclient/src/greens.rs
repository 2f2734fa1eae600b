//! Green's functions and synthetic waveforms.
//!
//! SGT and DGF come from SeisCloud through the read-through cache; the
//! engine computes everything else.

use std::path::Path;

use tracing::debug;

use crate::bundle::FetchedBundle;
use crate::client::SeisClient;
use crate::engine::{
    EngineInput, ForceVector, GreensEngine, MomentTensor, Orientation, Waveforms,
};
use crate::error::{SeisError, SeisResult};
use crate::types::{DataType, ModelInfo, Origin, Station};

/// Converts FK Green's functions from m/(N·m) to 10^-20 cm/(dyne·cm).
pub const FK_UNIT_FACTOR: f64 = 1e15;

/// One patch of a finite-fault model.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultPatch {
    pub origin: Origin,
    pub moment_tensor: MomentTensor,
}

/// Green's-function client: a [`SeisClient`] for data, an engine for numerics.
#[derive(Debug, Clone)]
pub struct GreensClient<E> {
    client: SeisClient,
    engine: E,
}

impl<E: GreensEngine> GreensClient<E> {
    pub fn new(client: SeisClient, engine: E) -> Self {
        Self { client, engine }
    }

    pub fn client(&self) -> &SeisClient {
        &self.client
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Grid bounds of a model, with a printable summary.
    pub async fn get_model_info(&self, model: &str) -> SeisResult<(ModelInfo, String)> {
        self.client.get_model_info(model).await
    }

    /// FK-type Green's function in 10^-20 cm/(dyne·cm).
    pub async fn get_greens_fk(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
    ) -> SeisResult<Waveforms> {
        let sgt = self
            .client
            .fetch(model, station, origin, save_dir, DataType::Sgt)
            .await?;

        let mut fk = self
            .engine
            .fk_greens(engine_input(model, &sgt, station, origin))?;
        fk.scale(FK_UNIT_FACTOR);
        Ok(fk)
    }

    /// Full 3D moment-tensor Green's function.
    pub async fn get_greens_3d_mt(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
    ) -> SeisResult<Waveforms> {
        let sgt = self
            .client
            .fetch(model, station, origin, save_dir, DataType::Sgt)
            .await?;

        self.engine
            .greens_3d_mt(engine_input(model, &sgt, station, origin))
    }

    /// Synthetic waveform for a moment-tensor solution.
    pub async fn get_synthetic_mt_solution(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
        moment_tensor: &MomentTensor,
        orientation: Orientation,
    ) -> SeisResult<Waveforms> {
        let sgt = self
            .client
            .fetch(model, station, origin, save_dir, DataType::Sgt)
            .await?;

        self.engine.synthetic_mt(
            engine_input(model, &sgt, station, origin),
            moment_tensor,
            orientation,
        )
    }

    /// Green's function for unit-force sources.
    pub async fn get_greens_force(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
    ) -> SeisResult<Waveforms> {
        let dgf = self
            .client
            .fetch(model, station, origin, save_dir, DataType::Dgf)
            .await?;

        self.engine
            .greens_force(engine_input(model, &dgf, station, origin))
    }

    /// Synthetic waveform for a force solution given in ENZ.
    pub async fn get_synthetic_force_solution(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
        force: &ForceVector,
        orientation: Orientation,
    ) -> SeisResult<Waveforms> {
        let dgf = self
            .client
            .fetch(model, station, origin, save_dir, DataType::Dgf)
            .await?;

        self.engine.synthetic_force(
            engine_input(model, &dgf, station, origin),
            force,
            orientation,
        )
    }

    /// Mean synthetic waveform over the patches of a finite fault.
    ///
    /// Each patch is weighted 1/N. Channels follow the first patch; later
    /// patches must provide the same channels with the same length.
    pub async fn get_synthetic_finite_fault(
        &self,
        model: &str,
        station: &Station,
        patches: &[FaultPatch],
        save_dir: impl AsRef<Path>,
        orientation: Orientation,
    ) -> SeisResult<Waveforms> {
        if patches.is_empty() {
            return Err(SeisError::InvalidInput {
                message: "finite fault has no patches".to_string(),
            });
        }

        let save_dir = save_dir.as_ref();
        let weight = 1.0 / patches.len() as f64;
        let mut stacked: Option<Waveforms> = None;

        for (index, patch) in patches.iter().enumerate() {
            let syn = self
                .get_synthetic_mt_solution(
                    model,
                    station,
                    &patch.origin,
                    save_dir,
                    &patch.moment_tensor,
                    orientation,
                )
                .await?;
            debug!(patch = index, channels = syn.len(), "synthesized patch");

            match stacked.as_mut() {
                None => {
                    let mut first = syn;
                    first.scale(weight);
                    stacked = Some(first);
                }
                Some(sum) => accumulate(sum, &syn, weight, index)?,
            }
        }

        Ok(stacked.unwrap_or_default())
    }
}

fn engine_input<'a>(
    model: &'a str,
    bundle: &'a FetchedBundle,
    station: &'a Station,
    origin: &'a Origin,
) -> EngineInput<'a> {
    EngineInput {
        model,
        tensor: &bundle.tensor,
        dt: bundle.dt,
        stf: &bundle.stf,
        station,
        origin,
    }
}

fn accumulate(sum: &mut Waveforms, syn: &Waveforms, weight: f64, index: usize) -> SeisResult<()> {
    for trace in &mut sum.traces {
        let other = syn.select(&trace.channel).ok_or_else(|| SeisError::Engine {
            message: format!("patch {} has no channel {}", index, trace.channel),
        })?;
        if other.data.len() != trace.data.len() {
            return Err(SeisError::Engine {
                message: format!(
                    "patch {} channel {} has {} samples, expected {}",
                    index,
                    trace.channel,
                    other.data.len(),
                    trace.data.len()
                ),
            });
        }
        for (acc, sample) in trace.data.iter_mut().zip(&other.data) {
            *acc += weight * sample;
        }
    }
    Ok(())
}
