//! Integral-kernel variants for the Contin inversion.
//!
//! The kernel `K(t, τ)` relates the unknown spectral distribution to the
//! observed signal via `y(t) = ∫ K(t, τ) s(τ) dτ`. The supported variants
//! form a small closed set; adding one is a local extension (new variant
//! plus one `evaluate` arm).
use crate::inversion::errors::ContinError;
use std::f64::consts::FRAC_1_PI;
use std::str::FromStr;

/// Closed set of integral kernels.
///
/// Variants:
/// - `MultiExponential`: `K(t, τ) = exp(−t/τ)` — relaxation decays.
/// - `MultiLorentzian`: `K(t, τ) = (1/π)·τ / (t² + τ²)` — spectral lines.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MultiExponential"`, `"MultiLorentzian"`). Unknown names return
/// [`ContinError::InvalidKernelName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    MultiExponential,
    MultiLorentzian,
}

impl KernelKind {
    /// Evaluate `K(t, τ)` for this kernel variant.
    pub fn evaluate(&self, t: f64, tau: f64) -> f64 {
        match self {
            KernelKind::MultiExponential => (-t / tau).exp(),
            KernelKind::MultiLorentzian => FRAC_1_PI * tau / (t * t + tau * tau),
        }
    }
}

impl FromStr for KernelKind {
    type Err = ContinError;

    /// Parse a kernel choice from a string (case-insensitive).
    ///
    /// Accepts:
    /// - `"MultiExponential"`
    /// - `"MultiLorentzian"`
    /// - Any case variant (e.g., `"multiexponential"`).
    ///
    /// Any other value returns [`ContinError::InvalidKernelName`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiexponential" => Ok(KernelKind::MultiExponential),
            "multilorentzian" => Ok(KernelKind::MultiLorentzian),
            _ => Err(ContinError::InvalidKernelName {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MultiExponential' or 'MultiLorentzian'.",
            }),
        }
    }
}
