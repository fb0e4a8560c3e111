#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Calibration {
    // Cell output in mV when exposed to the reference atmosphere
    pub baseline_millivolts: f32,

    // Oxygen percentage of the reference atmosphere
    pub ambient_percent: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            baseline_millivolts: 1000.0,
            // Typical ambient air
            ambient_percent: 20.9,
        }
    }
}
