/// Thresholds accelerometer samples into shake signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeDetector {
    threshold: f64,
}

impl ShakeDetector {
    /// Detector firing when any axis exceeds `threshold` in magnitude.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Whether the sample `(x, y, z)` is a shake.
    pub fn is_shake(&self, x: f64, y: f64, z: f64) -> bool {
        [x, y, z].iter().any(|axis| axis.abs() > self.threshold)
    }
}
