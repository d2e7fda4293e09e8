use std::collections::HashMap;
use std::fmt;

use crate::core::decoders;
use crate::domain::model::{ManufactureDate, Manufacturer};

pub type DecodeFn = fn(&str) -> ManufactureDate;

/// The built-in routing from manufacturer to serial decoding routine.
pub fn standard_decoder(manufacturer: Manufacturer) -> DecodeFn {
    match manufacturer {
        Manufacturer::Ge => decoders::ge,
        Manufacturer::Whirlpool => decoders::whirlpool,
        Manufacturer::Frigidaire => decoders::frigidaire,
        Manufacturer::Lg => decoders::lg,
        Manufacturer::Samsung => decoders::samsung,
        Manufacturer::Maytag => decoders::maytag,
        Manufacturer::BoschGroup => decoders::bosch,
        Manufacturer::Miele => decoders::miele,
        Manufacturer::WolfSubZeroCove => decoders::wolf_subzero_cove,
        Manufacturer::Unknown => decoders::unknown_manufacturer,
    }
}

/// Manufacturer to routine map. Starts out with the standard routing and can
/// be overridden per manufacturer; a label with no route decodes as
/// `UnknownManufacturer`.
#[derive(Clone)]
pub struct DecoderTable {
    routes: HashMap<Manufacturer, DecodeFn>,
}

impl fmt::Debug for DecoderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.routes.keys()).finish()
    }
}

impl DecoderTable {
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn with_route(mut self, manufacturer: Manufacturer, decode: DecodeFn) -> Self {
        self.routes.insert(manufacturer, decode);
        self
    }

    pub fn decode(&self, manufacturer: Manufacturer, serial: &str) -> ManufactureDate {
        match self.routes.get(&manufacturer) {
            Some(decode) => decode(serial),
            None => ManufactureDate::UnknownManufacturer,
        }
    }
}

impl Default for DecoderTable {
    fn default() -> Self {
        Manufacturer::ALL
            .into_iter()
            .fold(Self::empty(), |table, m| table.with_route(m, standard_decoder(m)))
    }
}

pub fn decode(manufacturer: Manufacturer, serial: &str) -> ManufactureDate {
    standard_decoder(manufacturer)(serial)
}

/// Human-readable manufacture date for a serial number of the given make.
pub fn decode_manufacture_date(manufacturer: Manufacturer, serial: &str) -> String {
    decode(manufacturer, serial).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SERIAL_UNDECODABLE, UNKNOWN_MANUFACTURER};

    #[test]
    fn test_dispatch_by_manufacturer() {
        assert_eq!(decode_manufacture_date(Manufacturer::Ge, "AZ"), "January 2024");
        assert_eq!(decode_manufacture_date(Manufacturer::Maytag, "XCA"), "January 2013");
        assert_eq!(decode_manufacture_date(Manufacturer::Lg, "312"), "12/2013");
        assert_eq!(
            decode_manufacture_date(Manufacturer::Unknown, "AZ"),
            UNKNOWN_MANUFACTURER
        );
    }

    #[test]
    fn test_empty_serial_fails_for_every_decoding_manufacturer() {
        for m in Manufacturer::ALL {
            if matches!(m, Manufacturer::Miele | Manufacturer::Unknown) {
                continue;
            }
            assert_eq!(decode_manufacture_date(m, ""), SERIAL_UNDECODABLE, "{}", m);
        }
    }

    #[test]
    fn test_default_table_agrees_with_standard_routing() {
        let table = DecoderTable::default();
        for m in Manufacturer::ALL {
            for serial in ["AZ", "XCA", "0512", "312", "A5", "4519", "1845", ""] {
                assert_eq!(table.decode(m, serial), decode(m, serial));
            }
        }
    }

    #[test]
    fn test_table_override_and_missing_route() {
        let table = DecoderTable::empty().with_route(Manufacturer::Miele, decoders::bosch);
        assert_eq!(table.decode(Manufacturer::Miele, "4519").to_string(), "Week 45 of 2019");
        assert_eq!(table.decode(Manufacturer::Ge, "AZ"), ManufactureDate::UnknownManufacturer);
    }
}
