use crate::core::decoder::DecoderTable;
use crate::core::detector::{self, PrefixRule};
use crate::domain::model::{Lookup, Reading};

/// Detection followed by decoding, over a configurable rule table and
/// decoder routing.
#[derive(Debug, Clone)]
pub struct LookupEngine {
    rules: &'static [PrefixRule],
    decoders: DecoderTable,
}

impl Default for LookupEngine {
    fn default() -> Self {
        Self::new(detector::RULES, DecoderTable::default())
    }
}

impl LookupEngine {
    pub fn new(rules: &'static [PrefixRule], decoders: DecoderTable) -> Self {
        Self { rules, decoders }
    }

    pub fn lookup(&self, reading: &Reading) -> Lookup {
        let manufacturer = detector::detect_with_rules(self.rules, reading.model());
        let date = self.decoders.decode(manufacturer, reading.serial());
        tracing::debug!(
            model = reading.model(),
            serial = reading.serial(),
            %manufacturer,
            %date,
            "lookup complete"
        );

        Lookup {
            model: reading.model().to_string(),
            serial: reading.serial().to_string(),
            manufacturer,
            determined: date.is_determined(),
            date,
        }
    }
}

/// Convenience composition of detection and decoding.
pub fn get_date_of_manufacture(model: &str, serial: &str) -> String {
    let manufacturer = detector::detect_manufacturer(model);
    crate::core::decoder::decode_manufacture_date(manufacturer, serial)
}
