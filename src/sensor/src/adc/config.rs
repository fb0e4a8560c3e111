/// Input multiplexer, differential pairs or single-ended against GND
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalogInput {
    DifferentialAin0Ain1,
    DifferentialAin0Ain3,
    DifferentialAin1Ain3,
    DifferentialAin2Ain3,
    SingleEndedAin0,
    SingleEndedAin1,
    SingleEndedAin2,
    SingleEndedAin3,
}

/// Programmable gain, named by full-scale range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    Fsr6_144,
    Fsr4_096,
    Fsr2_048,
    Fsr1_024,
    Fsr0_512,
    Fsr0_256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Continuous,
    SingleShot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    SPS8,
    SPS16,
    SPS32,
    SPS64,
    SPS128,
    SPS250,
    SPS475,
    SPS860,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparatorMode {
    Traditional,
    Window,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparatorPolarity {
    ActiveLow,
    ActiveHigh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparatorLatching {
    NonLatching,
    Latching,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparatorQueue {
    SingleConversion,
    DoubleConversion,
    QuadConversion,
    Disable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComparatorConfig {
    pub mode: ComparatorMode,
    pub polarity: ComparatorPolarity,
    pub latching: ComparatorLatching,
    pub queue: ComparatorQueue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdcConfig {
    pub address: u8,
    pub input: AnalogInput,
    pub gain: Gain,
    pub mode: Mode,
    pub rate: DataRate,
    pub comparator: ComparatorConfig,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        ComparatorConfig {
            mode: ComparatorMode::Traditional,
            polarity: ComparatorPolarity::ActiveLow,
            latching: ComparatorLatching::NonLatching,
            queue: ComparatorQueue::Disable,
        }
    }
}

impl From<ComparatorConfig> for u8 {
    fn from(input: ComparatorConfig) -> u8 {
        u8::from(input.mode)
            | u8::from(input.polarity)
            | u8::from(input.latching)
            | u8::from(input.queue)
    }
}

impl AdcConfig {
    /// Encode as (MSB, LSB). `begin` sets the OS bit, which starts a
    /// single-shot conversion when written.
    pub fn to_u8_array(&self, begin: bool) -> [u8; 2] {
        let start_bit: u8 = match begin {
            true => 0b1,
            false => 0b0,
        };
        let config_high = start_bit << 7
            | u8::from(self.input)
            | u8::from(self.gain)
            | u8::from(self.mode);
        let config_low = u8::from(self.rate) | u8::from(self.comparator);

        [config_high, config_low]
    }
}

impl Default for AdcConfig {
    // Oxygen cell on AIN0, +/-4.096 V, single-shot, 128 SPS, comparator off
    fn default() -> Self {
        AdcConfig {
            address: 0b1001000,
            input: AnalogInput::SingleEndedAin0,
            gain: Gain::Fsr4_096,
            mode: Mode::SingleShot,
            rate: DataRate::SPS128,
            comparator: ComparatorConfig::default(),
        }
    }
}

impl From<AnalogInput> for u8 {
    fn from(input: AnalogInput) -> u8 {
        let value: u8 = match input {
            AnalogInput::DifferentialAin0Ain1 => 0b000,
            AnalogInput::DifferentialAin0Ain3 => 0b001,
            AnalogInput::DifferentialAin1Ain3 => 0b010,
            AnalogInput::DifferentialAin2Ain3 => 0b011,
            AnalogInput::SingleEndedAin0 => 0b100,
            AnalogInput::SingleEndedAin1 => 0b101,
            AnalogInput::SingleEndedAin2 => 0b110,
            AnalogInput::SingleEndedAin3 => 0b111,
        };
        value << 4
    }
}

impl Gain {
    /// Input voltage that maps to the largest positive code
    pub fn full_scale_volts(&self) -> f64 {
        match self {
            Gain::Fsr6_144 => 6.144,
            Gain::Fsr4_096 => 4.096,
            Gain::Fsr2_048 => 2.048,
            Gain::Fsr1_024 => 1.024,
            Gain::Fsr0_512 => 0.512,
            Gain::Fsr0_256 => 0.256,
        }
    }
}

impl From<Gain> for u8 {
    fn from(input: Gain) -> u8 {
        let value: u8 = match input {
            Gain::Fsr6_144 => 0b000,
            Gain::Fsr4_096 => 0b001,
            Gain::Fsr2_048 => 0b010,
            Gain::Fsr1_024 => 0b011,
            Gain::Fsr0_512 => 0b100,
            Gain::Fsr0_256 => 0b101,
        };
        value << 1
    }
}

impl From<Mode> for u8 {
    fn from(input: Mode) -> u8 {
        match input {
            Mode::Continuous => 0b0,
            Mode::SingleShot => 0b1,
        }
    }
}

impl From<DataRate> for u8 {
    fn from(input: DataRate) -> u8 {
        let value: u8 = match input {
            DataRate::SPS8 => 0b000,
            DataRate::SPS16 => 0b001,
            DataRate::SPS32 => 0b010,
            DataRate::SPS64 => 0b011,
            DataRate::SPS128 => 0b100,
            DataRate::SPS250 => 0b101,
            DataRate::SPS475 => 0b110,
            DataRate::SPS860 => 0b111,
        };
        value << 5
    }
}

impl From<ComparatorMode> for u8 {
    fn from(input: ComparatorMode) -> u8 {
        let value: u8 = match input {
            ComparatorMode::Traditional => 0b0,
            ComparatorMode::Window => 0b1,
        };
        value << 4
    }
}

impl From<ComparatorPolarity> for u8 {
    fn from(input: ComparatorPolarity) -> u8 {
        let value: u8 = match input {
            ComparatorPolarity::ActiveLow => 0b0,
            ComparatorPolarity::ActiveHigh => 0b1,
        };
        value << 3
    }
}

impl From<ComparatorLatching> for u8 {
    fn from(input: ComparatorLatching) -> u8 {
        let value: u8 = match input {
            ComparatorLatching::NonLatching => 0b0,
            ComparatorLatching::Latching => 0b1,
        };
        value << 2
    }
}

impl From<ComparatorQueue> for u8 {
    fn from(input: ComparatorQueue) -> u8 {
        match input {
            ComparatorQueue::SingleConversion => 0b00,
            ComparatorQueue::DoubleConversion => 0b01,
            ComparatorQueue::QuadConversion => 0b10,
            ComparatorQueue::Disable => 0b11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_word() {
        let config = AdcConfig::default();
        assert_eq!(config.to_u8_array(true), [0xC3, 0x83]);
        assert_eq!(config.address, 0x48);
    }

    #[test]
    fn test_config_word_without_start_bit() {
        let config = AdcConfig::default();
        assert_eq!(config.to_u8_array(false), [0x43, 0x83]);
    }

    #[test]
    fn test_continuous_differential_config_word() {
        let config = AdcConfig {
            input: AnalogInput::DifferentialAin0Ain1,
            gain: Gain::Fsr2_048,
            mode: Mode::Continuous,
            rate: DataRate::SPS860,
            ..AdcConfig::default()
        };
        assert_eq!(config.to_u8_array(false), [0x04, 0xE3]);
    }

    #[test]
    fn test_comparator_bits() {
        let comparator = ComparatorConfig {
            mode: ComparatorMode::Window,
            polarity: ComparatorPolarity::ActiveHigh,
            latching: ComparatorLatching::Latching,
            queue: ComparatorQueue::SingleConversion,
        };
        assert_eq!(u8::from(comparator), 0b0001_1100);
    }

    #[test]
    fn test_full_scale_volts() {
        assert_eq!(Gain::Fsr4_096.full_scale_volts(), 4.096);
        assert_eq!(Gain::Fsr0_256.full_scale_volts(), 0.256);
    }
}
