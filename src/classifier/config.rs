/// Smoothing parameter used by classifiers when none is configured
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Settings passed through, unvalidated, to the classifier
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClassifierConfig {
    pub(super) alpha: Option<f64>,
}

impl ClassifierConfig {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_alpha(alpha: f64) -> Self {
        Self::new().alpha(alpha)
    }

    #[inline]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// [`None`] if the classifier default must be used
    #[inline]
    pub fn get_alpha(&self) -> Option<f64> {
        self.alpha
    }

    #[inline]
    pub fn alpha_or_default(&self) -> f64 {
        self.alpha.unwrap_or(DEFAULT_ALPHA)
    }
}
