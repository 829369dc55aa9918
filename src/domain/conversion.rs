//! Unit conversion domain service
//!
//! Maps the raw fields cached by the sensor driver to one reporting unit.

use super::reading::MeasurementUnit;

/// Last values cached by the sensor driver after a successful reading
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Temperature in °C
    pub temperature_c: f32,
    /// Relative humidity in %RH
    pub humidity_pct: f32,
    /// Pressure in Pa
    pub pressure_pa: f32,
    /// Gas resistance in Ω
    pub gas_resistance_ohm: f32,
}

/// Which quantity a logical sensor reports, and in which unit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionType {
    /// Humidity as-is (`DIRECT_PERCENT`)
    Percent,
    /// Temperature as-is (`DIRECT_CELSIUS`)
    Celsius,
    /// Pressure divided by 100 (`DIRECT_HEKTOPASCAL`)
    Hectopascal,
    /// Gas resistance as-is (`DIRECT_OHM`)
    Ohm,
    /// Gas resistance divided by 1000 (`DIRECT_KOHM`)
    Kilohm,
}

impl ConversionType {
    /// All conversions, in configuration order
    pub const ALL: [ConversionType; 5] = [
        Self::Percent,
        Self::Celsius,
        Self::Hectopascal,
        Self::Ohm,
        Self::Kilohm,
    ];

    /// Configuration name used by the backend
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percent => "DIRECT_PERCENT",
            Self::Celsius => "DIRECT_CELSIUS",
            Self::Hectopascal => "DIRECT_HEKTOPASCAL",
            Self::Ohm => "DIRECT_OHM",
            Self::Kilohm => "DIRECT_KOHM",
        }
    }

    /// Unit of the converted value
    pub const fn unit(&self) -> MeasurementUnit {
        match self {
            Self::Percent => MeasurementUnit::RelativeHumidity,
            Self::Celsius => MeasurementUnit::Celsius,
            Self::Hectopascal => MeasurementUnit::Hectopascal,
            Self::Ohm => MeasurementUnit::Ohm,
            Self::Kilohm => MeasurementUnit::Kilohm,
        }
    }

    /// Derive the reported value from a raw sample
    #[inline]
    pub fn apply(&self, sample: &RawSample) -> f32 {
        match self {
            Self::Percent => sample.humidity_pct,
            Self::Celsius => sample.temperature_c,
            Self::Hectopascal => sample.pressure_pa / 100.0,
            Self::Ohm => sample.gas_resistance_ohm,
            Self::Kilohm => sample.gas_resistance_ohm / 1000.0,
        }
    }
}

/// Returned when a configuration string names no known conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownConversion;

impl core::str::FromStr for ConversionType {
    type Err = UnknownConversion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|conversion| conversion.as_str() == s)
            .ok_or(UnknownConversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: RawSample = RawSample {
        temperature_c: 22.5,
        humidity_pct: 55.2,
        pressure_pa: 101325.0,
        gas_resistance_ohm: 125000.0,
    };

    #[test]
    fn test_conversions() {
        assert_eq!(ConversionType::Celsius.apply(&SAMPLE), 22.5);
        assert_eq!(ConversionType::Percent.apply(&SAMPLE), 55.2);
        assert_eq!(ConversionType::Hectopascal.apply(&SAMPLE), 1013.25);
        assert_eq!(ConversionType::Ohm.apply(&SAMPLE), 125000.0);
        assert_eq!(ConversionType::Kilohm.apply(&SAMPLE), 125.0);
    }

    #[test]
    fn test_parse_config_names() {
        for conversion in ConversionType::ALL {
            assert_eq!(conversion.as_str().parse::<ConversionType>(), Ok(conversion));
        }
        assert_eq!(
            "DIRECT_KOHM".parse::<ConversionType>(),
            Ok(ConversionType::Kilohm)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("DIRECT_FAHRENHEIT".parse::<ConversionType>(), Err(UnknownConversion));
        assert_eq!("direct_ohm".parse::<ConversionType>(), Err(UnknownConversion));
        assert_eq!("".parse::<ConversionType>(), Err(UnknownConversion));
    }

    #[test]
    fn test_units() {
        assert_eq!(ConversionType::Percent.unit(), MeasurementUnit::RelativeHumidity);
        assert_eq!(ConversionType::Kilohm.unit(), MeasurementUnit::Kilohm);
    }
}
