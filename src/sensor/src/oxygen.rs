use crate::config::Calibration;

static MAX_CODE: f64 = 32767.0;

pub fn to_millivolts(sample: i16, full_scale_volts: f64) -> f32 {
    //                 sample * full_scale
    // millivolts  =  --------------------  * 1000
    //                       32767
    //
    // The negative limit of -32768 lands slightly past the full scale range.
    // Volts are computed in double precision and stored as f32 before
    // scaling, the reported decimals depend on that rounding.
    let volts = (f64::from(sample) * full_scale_volts / MAX_CODE) as f32;
    volts * 1000.0
}

/// Galvanic cells are linear in oxygen partial pressure, so the percentage
/// scales with the ratio to the baseline reading. Out of range input is not
/// clamped.
pub fn to_oxygen_percent(millivolts: f32, calibration: &Calibration) -> f32 {
    (millivolts / calibration.baseline_millivolts) * calibration.ambient_percent
}
