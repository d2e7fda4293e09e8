//! Per-manufacturer serial number decoding routines.
//!
//! Each routine is total: malformed or short serials map to
//! [`ManufactureDate::SerialUndecodable`] instead of an error. Positions are
//! counted in characters and numeric fields accept decimal digits of any
//! script.

use chrono::Month;

use crate::domain::model::ManufactureDate;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

// GE uses the same twelve letters for the month and the year position.
const GE_CODES: [char; 12] = ['A', 'D', 'F', 'G', 'H', 'L', 'M', 'R', 'S', 'T', 'V', 'Z'];
const GE_FIRST_YEAR: i32 = 2013;

// S, T, V, W and X reuse years already covered by F, G, H, J and K.
const WHIRLPOOL_YEARS: [(char, i32); 22] = [
    ('Y', 2009),
    ('Z', 2010),
    ('A', 2011),
    ('B', 2012),
    ('C', 2013),
    ('D', 2014),
    ('E', 2015),
    ('F', 2016),
    ('G', 2017),
    ('H', 2018),
    ('J', 2019),
    ('K', 2020),
    ('L', 2021),
    ('M', 2022),
    ('N', 2023),
    ('P', 2024),
    ('R', 2025),
    ('S', 2016),
    ('T', 2017),
    ('V', 2018),
    ('W', 2019),
    ('X', 2020),
];
const WHIRLPOOL_MONTH_CODES: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M'];

const SAMSUNG_YEAR_CODES: &str = "ABCDEFGHJKLMNPQRSTUWXYZ";
const SAMSUNG_MONTH_CODES: &str = "123456789ABC";
const SAMSUNG_FIRST_YEAR: i32 = 1997;

const LG_DECADE: i32 = 2010;

fn chars(serial: &str) -> Vec<char> {
    serial.chars().collect()
}

/// Upper-cases a single code character; a character whose upper-case form
/// is more than one character cannot be a code.
fn upper(c: char) -> Option<char> {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

// First code point of every block of ten Unicode decimal digits (category
// Nd). Each block runs zero through nine in order.
const DECIMAL_ZEROS: [u32; 68] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Value of a decimal digit in any script. Superscripts, fractions and other
/// numeric characters outside category Nd are not digits.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let cp = c as u32;
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&cp))
        .map(|zero| cp - zero)
}

/// Parses a run of decimal digits. Empty or non-digit input yields `None`.
fn digits(field: &[char]) -> Option<u32> {
    if field.is_empty() {
        return None;
    }
    field
        .iter()
        .try_fold(0u32, |acc, &c| Some(acc * 10 + decimal_value(c)?))
}

fn month_for(codes: &[char; 12], code: char) -> Option<Month> {
    codes.iter().position(|&c| c == code).map(|i| MONTHS[i])
}

/// First character is the month code, second the year code.
pub fn ge(serial: &str) -> ManufactureDate {
    let trimmed = serial.trim();
    if trimmed.chars().count() < 2 {
        return ManufactureDate::SerialUndecodable;
    }
    let normalized = chars(&trimmed.to_uppercase());
    let (month_code, year_code) = (normalized[0], normalized[1]);

    let month = month_for(&GE_CODES, month_code);
    let year = GE_CODES
        .iter()
        .position(|&c| c == year_code)
        .map(|i| GE_FIRST_YEAR + i as i32);

    match (month, year) {
        (Some(month), Some(year)) => ManufactureDate::MonthYear { month, year },
        (None, Some(year)) => ManufactureDate::UnknownMonthCode {
            code: month_code,
            year,
        },
        (Some(month), None) => ManufactureDate::UnknownYearCode {
            month,
            code: year_code,
        },
        (None, None) => ManufactureDate::SerialUndecodable,
    }
}

/// Letter scheme first (year letter at position 1, month letter at 2), then
/// the numeric year/week scheme at positions 2..4 and 4..6.
pub fn whirlpool(serial: &str) -> ManufactureDate {
    let s = chars(serial);

    if s.len() >= 3 {
        let year = upper(s[1]).and_then(|code| {
            WHIRLPOOL_YEARS
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, y)| *y)
        });
        let month = upper(s[2]).and_then(|code| month_for(&WHIRLPOOL_MONTH_CODES, code));
        if let (Some(year), Some(month)) = (year, month) {
            return ManufactureDate::MonthYear { month, year };
        }
    }

    if s.len() >= 6 {
        if let (Some(yy), Some(week)) = (digits(&s[2..4]), digits(&s[4..6])) {
            let year = if yy >= 90 { 1900 + yy } else { 2000 + yy };
            return ManufactureDate::Week {
                week,
                year: year as i32,
            };
        }
    }

    ManufactureDate::SerialUndecodable
}

pub fn maytag(serial: &str) -> ManufactureDate {
    whirlpool(serial)
}

/// Two-digit year then two-digit week.
pub fn frigidaire(serial: &str) -> ManufactureDate {
    let s = chars(serial);
    if s.len() < 4 {
        return ManufactureDate::SerialUndecodable;
    }
    match (digits(&s[0..2]), digits(&s[2..4])) {
        (Some(yy), Some(week)) => {
            let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
            ManufactureDate::Week {
                week,
                year: year as i32,
            }
        }
        _ => ManufactureDate::SerialUndecodable,
    }
}

/// Single year digit within the 2010s, then a two-digit month.
pub fn lg(serial: &str) -> ManufactureDate {
    let s = chars(serial);
    if s.len() < 3 {
        return ManufactureDate::SerialUndecodable;
    }
    match (digits(&s[0..1]), digits(&s[1..3])) {
        (Some(y), Some(month)) => ManufactureDate::NumericMonth {
            month,
            year: LG_DECADE + y as i32,
        },
        _ => ManufactureDate::SerialUndecodable,
    }
}

pub fn samsung(serial: &str) -> ManufactureDate {
    let s = chars(serial);
    if s.len() < 2 {
        return ManufactureDate::SerialUndecodable;
    }
    let year_index = upper(s[0]).and_then(|c| SAMSUNG_YEAR_CODES.chars().position(|y| y == c));
    let month_index = upper(s[1]).and_then(|c| SAMSUNG_MONTH_CODES.chars().position(|m| m == c));

    match (year_index, month_index) {
        (Some(y), Some(m)) => ManufactureDate::NumericMonth {
            month: m as u32 + 1,
            year: SAMSUNG_FIRST_YEAR + y as i32,
        },
        _ => ManufactureDate::SerialUndecodable,
    }
}

/// Two-digit week then two-digit year of the 2000s.
pub fn bosch(serial: &str) -> ManufactureDate {
    let s = chars(serial);
    if s.len() < 4 {
        return ManufactureDate::SerialUndecodable;
    }
    match (digits(&s[0..2]), digits(&s[2..4])) {
        (Some(week), Some(yy)) => ManufactureDate::Week {
            week,
            year: 2000 + yy as i32,
        },
        _ => ManufactureDate::SerialUndecodable,
    }
}

pub fn wolf_subzero_cove(serial: &str) -> ManufactureDate {
    let s = chars(serial);
    if s.len() < 4 || digits(&s[0..4]).is_none() {
        return ManufactureDate::SerialUndecodable;
    }
    match (digits(&s[0..2]), digits(&s[2..4])) {
        (Some(yy), Some(week)) => ManufactureDate::Week {
            week,
            year: 2000 + yy as i32,
        },
        _ => ManufactureDate::SerialUndecodable,
    }
}

pub fn miele(_serial: &str) -> ManufactureDate {
    ManufactureDate::ContactSupport
}

pub fn unknown_manufacturer(_serial: &str) -> ManufactureDate {
    ManufactureDate::UnknownManufacturer
}
