use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::LookupError;

/// Manufacturer label derived from a model number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manufacturer {
    #[serde(rename = "GE")]
    Ge,
    #[serde(rename = "Whirlpool")]
    Whirlpool,
    #[serde(rename = "Frigidaire")]
    Frigidaire,
    #[serde(rename = "LG")]
    Lg,
    #[serde(rename = "Samsung")]
    Samsung,
    #[serde(rename = "Maytag")]
    Maytag,
    #[serde(rename = "Bosch/Gaggenau/Siemens/Thermador")]
    BoschGroup,
    #[serde(rename = "Miele")]
    Miele,
    #[serde(rename = "Wolf/SubZero/Cove")]
    WolfSubZeroCove,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Manufacturer {
    pub const ALL: [Manufacturer; 10] = [
        Manufacturer::Ge,
        Manufacturer::Whirlpool,
        Manufacturer::Frigidaire,
        Manufacturer::Lg,
        Manufacturer::Samsung,
        Manufacturer::Maytag,
        Manufacturer::BoschGroup,
        Manufacturer::Miele,
        Manufacturer::WolfSubZeroCove,
        Manufacturer::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Manufacturer::Ge => "GE",
            Manufacturer::Whirlpool => "Whirlpool",
            Manufacturer::Frigidaire => "Frigidaire",
            Manufacturer::Lg => "LG",
            Manufacturer::Samsung => "Samsung",
            Manufacturer::Maytag => "Maytag",
            Manufacturer::BoschGroup => "Bosch/Gaggenau/Siemens/Thermador",
            Manufacturer::Miele => "Miele",
            Manufacturer::WolfSubZeroCove => "Wolf/SubZero/Cove",
            Manufacturer::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Manufacturer {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Some(found) = Manufacturer::ALL
            .iter()
            .find(|m| m.label().to_ascii_lowercase() == wanted)
        {
            return Ok(*found);
        }

        // Short names for the grouped labels.
        match wanted.as_str() {
            "bosch" | "gaggenau" | "siemens" | "thermador" => Ok(Manufacturer::BoschGroup),
            "wolf" | "subzero" | "sub-zero" | "cove" => Ok(Manufacturer::WolfSubZeroCove),
            _ => Err(LookupError::UnknownManufacturerLabel {
                label: s.to_string(),
            }),
        }
    }
}

pub const SERIAL_UNDECODABLE: &str = "Could not determine manufacture date from serial number";
pub const UNKNOWN_MANUFACTURER: &str =
    "Could not determine manufacture date: unknown manufacturer";
pub const MIELE_CONTACT_SUPPORT: &str = "Date of manufacture for Miele appliances cannot be \
determined from the serial number alone. Please contact Miele support.";

/// Outcome of decoding a serial number.
///
/// Every variant renders to the user-facing description through `Display`;
/// the last three are final "undeterminable" answers rather than errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ManufactureDate {
    /// "January 2024"
    MonthYear { month: Month, year: i32 },
    /// "Week 45 of 2018"
    Week { week: u32, year: i32 },
    /// "05/1997". The month is not range checked.
    NumericMonth { month: u32, year: i32 },
    /// Year resolved, month letter not in the table.
    UnknownMonthCode { code: char, year: i32 },
    /// Month resolved, year letter not in the table.
    UnknownYearCode { month: Month, code: char },
    SerialUndecodable,
    UnknownManufacturer,
    ContactSupport,
}

impl ManufactureDate {
    pub fn is_determined(&self) -> bool {
        !matches!(
            self,
            ManufactureDate::SerialUndecodable
                | ManufactureDate::UnknownManufacturer
                | ManufactureDate::ContactSupport
        )
    }
}

impl fmt::Display for ManufactureDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManufactureDate::MonthYear { month, year } => write!(f, "{} {}", month.name(), year),
            ManufactureDate::Week { week, year } => write!(f, "Week {} of {}", week, year),
            ManufactureDate::NumericMonth { month, year } => write!(f, "{:02}/{}", month, year),
            ManufactureDate::UnknownMonthCode { code, year } => {
                write!(f, "Unknown month code {}, {}", code, year)
            }
            ManufactureDate::UnknownYearCode { month, code } => {
                write!(f, "{}, unknown year code {}", month.name(), code)
            }
            ManufactureDate::SerialUndecodable => f.write_str(SERIAL_UNDECODABLE),
            ManufactureDate::UnknownManufacturer => f.write_str(UNKNOWN_MANUFACTURER),
            ManufactureDate::ContactSupport => f.write_str(MIELE_CONTACT_SUPPORT),
        }
    }
}

impl From<ManufactureDate> for String {
    fn from(date: ManufactureDate) -> Self {
        date.to_string()
    }
}

/// A (model, serial) pair as an input provider yields it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
}

impl Reading {
    pub fn new(model: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            serial: Some(serial.into()),
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or("")
    }

    pub fn serial(&self) -> &str {
        self.serial.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    pub model: String,
    pub serial: String,
    pub manufacturer: Manufacturer,
    #[serde(rename = "date_of_manufacture")]
    pub date: ManufactureDate,
    pub determined: bool,
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub lookups: Vec<Lookup>,
    pub csv_output: String,
    pub json_output: String,
}
