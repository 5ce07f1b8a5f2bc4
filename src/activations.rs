//! The fourteen scalar activation kinds a node's `output` may be computed
//! with. Stateless kinds mirror the pool the teacher lists in
//! `genes/nodes/activations.rs`; the stateful kinds (`Latch`,
//! `Differential`, `Integrator`, `Inhibitory`, `SoftLatch`) are BIOME-specific
//! and need `previous_output`/`dt`, which is why `apply` takes them as
//! arguments instead of dispatching to a bare `fn(f64) -> f64` table.

use serde::{Deserialize, Serialize};

/// Activation function attached to a node.
///
/// `Identity` and `Linear` are kept distinct kinds, as the teacher's pool
/// also keeps near-duplicate activations (`Inverse`/`Absolute` sit beside
/// `Linear`) apart: mutation bookkeeping (e.g. "did changing the
/// activation actually change anything") wants to see them as different
/// choices even though they compute the same value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    Identity,
    Linear,
    Sigmoid,
    TanH,
    Sine,
    ReLU,
    Gaussian,
    Abs,
    Latch,
    Differential,
    Integrator,
    Inhibitory,
    Mult,
    SoftLatch,
}

impl Activation {
    /// All fourteen kinds, used to seed mutation-pool defaults.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Identity,
            Self::Linear,
            Self::Sigmoid,
            Self::TanH,
            Self::Sine,
            Self::ReLU,
            Self::Gaussian,
            Self::Abs,
            Self::Latch,
            Self::Differential,
            Self::Integrator,
            Self::Inhibitory,
            Self::Mult,
            Self::SoftLatch,
        ]
    }

    /// The subset a hidden-node mutation (add-node split, change-activation)
    /// is allowed to pick from. `Identity` is reserved for genes and fixed
    /// catalogue outputs, so it is excluded here per spec.md §3.
    pub fn hidden_suitable() -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|a| *a != Self::Identity)
            .collect()
    }

    pub fn is_stateful(self) -> bool {
        matches!(
            self,
            Self::Latch
                | Self::Differential
                | Self::Integrator
                | Self::Inhibitory
                | Self::SoftLatch
        )
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// `apply(kind, raw, bias, previous_output, dt) -> output`.
///
/// `raw` is the node's accumulator for this tick; `x = raw + bias` is the
/// pre-activation value stateless kinds consume. Stateful kinds consume
/// `raw` and/or `previous_output`/`dt` directly, per spec.md §4.1.
pub fn apply(kind: Activation, raw: f64, bias: f64, previous_output: f64, dt: f64) -> f64 {
    let x = raw + bias;
    match kind {
        Activation::Identity | Activation::Linear => x,
        Activation::Sigmoid => sigmoid(x),
        Activation::TanH => x.tanh(),
        Activation::Sine => x.sin(),
        Activation::ReLU => x.max(0.0),
        Activation::Gaussian => 1.0 / (x * x + 1.0),
        Activation::Abs => x.abs(),
        Activation::Latch => {
            if x > 1.0 {
                1.0
            } else if x < 0.0 {
                0.0
            } else {
                previous_output
            }
        }
        Activation::Differential => {
            if dt <= 0.0 {
                0.0
            } else {
                (x - previous_output) / dt
            }
        }
        Activation::Integrator => previous_output + raw * dt,
        Activation::Inhibitory => {
            let k = bias.max(0.1);
            let d = (-k * dt).exp();
            previous_output * d + raw * (1.0 - d)
        }
        Activation::Mult => (x * bias).clamp(0.0, 1.0),
        Activation::SoftLatch => {
            let k = bias.max(0.1);
            lerp(previous_output, sigmoid(x * k), 1.0 / (1.0 + k))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        assert_eq!(apply(Activation::Identity, 0.7, 0.3, 0.0, 0.016), 1.0);
    }

    #[test]
    fn relu_clamps_negative() {
        assert_eq!(apply(Activation::ReLU, -5.0, 0.0, 0.0, 0.016), 0.0);
        assert_eq!(apply(Activation::ReLU, 5.0, 0.0, 0.0, 0.016), 5.0);
    }

    #[test]
    fn latch_holds_between_thresholds() {
        assert_eq!(apply(Activation::Latch, 0.5, 0.0, 0.42, 0.016), 0.42);
        assert_eq!(apply(Activation::Latch, 2.0, 0.0, 0.42, 0.016), 1.0);
        assert_eq!(apply(Activation::Latch, -2.0, 0.0, 0.42, 0.016), 0.0);
    }

    #[test]
    fn differential_zero_dt_is_zero() {
        assert_eq!(apply(Activation::Differential, 1.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn integrator_uses_raw_not_x() {
        // bias must not leak into the integral per spec.md §4.1.
        let out = apply(Activation::Integrator, 2.0, 100.0, 1.0, 0.5);
        assert_eq!(out, 1.0 + 2.0 * 0.5);
    }

    #[test]
    fn inhibitory_decays_toward_raw() {
        let out = apply(Activation::Inhibitory, 1.0, 10.0, 0.0, 1_000_000.0);
        assert!((out - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mult_clamps_to_unit_interval() {
        assert_eq!(apply(Activation::Mult, 10.0, 10.0, 0.0, 0.016), 1.0);
        assert_eq!(apply(Activation::Mult, -10.0, 10.0, 0.0, 0.016), 0.0);
    }
}
