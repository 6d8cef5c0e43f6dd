//! Sensory dissonance of timbres, following the roughness model by Plomp, Levelt and Sethares.

/// Exponents below this value are treated as if `exp` returned exactly 0.
const EXP_SATURATION: f64 = -88.0;

const D_STAR: f64 = 0.24;
const S1: f64 = 0.0207;
const S2: f64 = 18.96;
const C1: f64 = 5.0;
const C2: f64 = -5.0;
const A1: f64 = -3.51;
const A2: f64 = -5.75;

/// A single sinusoidal component of a timbre.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Partial {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Partial {
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }

    /// Returns a copy of `self` with the frequency multiplied by `ratio`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use disscalc::dissonance::Partial;
    /// let raised = Partial::new(440.0, 0.5).scaled_by(1.5);
    /// assert_eq!(raised, Partial::new(660.0, 0.5));
    /// ```
    pub fn scaled_by(self, ratio: f64) -> Self {
        Self {
            frequency: self.frequency * ratio,
            amplitude: self.amplitude,
        }
    }

    /// Pairs up `frequencies` and `amplitudes` in input order.
    ///
    /// Surplus items of the longer list are ignored. Callers are expected to check that both lists have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use disscalc::dissonance::Partial;
    /// let partials = Partial::zip(&[220.0, 440.0], &[1.0, 0.5]);
    /// assert_eq!(partials, [Partial::new(220.0, 1.0), Partial::new(440.0, 0.5)]);
    /// ```
    pub fn zip(frequencies: &[f64], amplitudes: &[f64]) -> Vec<Partial> {
        frequencies
            .iter()
            .zip(amplitudes)
            .map(|(&frequency, &amplitude)| Partial::new(frequency, amplitude))
            .collect()
    }
}

/// Calculates the roughness between two partials.
///
/// The result is 0 for partials of equal frequency, peaks at a frequency difference of roughly a quarter of the critical bandwidth and decays towards 0 for large differences.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use disscalc::dissonance::{self, Partial};
/// let a4 = Partial::new(440.0, 1.0);
/// assert_approx_eq!(dissonance::pair_dissonance(a4, a4), 0.0);
/// assert_approx_eq!(dissonance::pair_dissonance(a4, Partial::new(460.0, 1.0)), 0.873030);
///
/// // The quieter partial determines the weight
/// assert_approx_eq!(dissonance::pair_dissonance(a4, Partial::new(460.0, 0.5)), 0.436515);
/// ```
pub fn pair_dissonance(a: Partial, b: Partial) -> f64 {
    let least_amp = a.amplitude.min(b.amplitude);
    let least_freq = a.frequency.min(b.frequency);
    let freq_diff = (b.frequency - a.frequency).abs();

    let s = D_STAR / (S1 * least_freq + S2);

    least_amp * (C1 * saturating_exp(A1 * s * freq_diff) + C2 * saturating_exp(A2 * s * freq_diff))
}

fn saturating_exp(exponent: f64) -> f64 {
    if exponent < EXP_SATURATION {
        0.0
    } else {
        exponent.exp()
    }
}

/// Calculates the aggregate dissonance of two partial sets when the `mobile` partials are raised by `interval`.
///
/// Every stable partial is paired with every raised mobile partial, including itself if both sets are the same.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use disscalc::dissonance::{self, Partial};
/// let partials = [Partial::new(440.0, 1.0), Partial::new(880.0, 0.5)];
/// assert_approx_eq!(dissonance::dissonance(&partials, &partials, 1.05), 1.322606);
/// assert_approx_eq!(dissonance::dissonance(&partials, &partials, 1.5), 0.015097);
/// ```
pub fn dissonance(stable: &[Partial], mobile: &[Partial], interval: f64) -> f64 {
    let mut dissonance = 0.0;
    for &stable_partial in stable {
        for &mobile_partial in mobile {
            dissonance += pair_dissonance(stable_partial, mobile_partial.scaled_by(interval));
        }
    }
    dissonance
}

/// The two partial sets between which dissonance is evaluated.
#[derive(Clone, Debug)]
pub struct Timbre {
    stable: Vec<Partial>,
    mobile: Vec<Partial>,
}

impl Timbre {
    pub fn new(stable: Vec<Partial>, mobile: Vec<Partial>) -> Self {
        Self { stable, mobile }
    }

    /// Creates a [`Timbre`] where the same partials are used in the stable and the mobile role.
    pub fn symmetric(partials: Vec<Partial>) -> Self {
        Self::new(partials.clone(), partials)
    }

    pub fn stable(&self) -> &[Partial] {
        &self.stable
    }

    pub fn mobile(&self) -> &[Partial] {
        &self.mobile
    }

    pub fn dissonance_at(&self, interval: f64) -> f64 {
        dissonance(&self.stable, &self.mobile, interval)
    }
}
