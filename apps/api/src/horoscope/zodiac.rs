#![allow(dead_code)]

//! The tropical zodiac table and sign lookup by birth date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn element(&self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }

    pub fn date_range(&self) -> &'static str {
        match self {
            Self::Aries => "Mar 21 - Apr 19",
            Self::Taurus => "Apr 20 - May 20",
            Self::Gemini => "May 21 - Jun 20",
            Self::Cancer => "Jun 21 - Jul 22",
            Self::Leo => "Jul 23 - Aug 22",
            Self::Virgo => "Aug 23 - Sep 22",
            Self::Libra => "Sep 23 - Oct 22",
            Self::Scorpio => "Oct 23 - Nov 21",
            Self::Sagittarius => "Nov 22 - Dec 21",
            Self::Capricorn => "Dec 22 - Jan 19",
            Self::Aquarius => "Jan 20 - Feb 18",
            Self::Pisces => "Feb 19 - Mar 20",
        }
    }

    /// The sign covering a calendar date. Capricorn wraps the year
    /// boundary.
    pub fn for_date(date: NaiveDate) -> Self {
        match (date.month(), date.day()) {
            (1, d) if d <= 19 => Self::Capricorn,
            (1, _) => Self::Aquarius,
            (2, d) if d <= 18 => Self::Aquarius,
            (2, _) => Self::Pisces,
            (3, d) if d <= 20 => Self::Pisces,
            (3, _) => Self::Aries,
            (4, d) if d <= 19 => Self::Aries,
            (4, _) => Self::Taurus,
            (5, d) if d <= 20 => Self::Taurus,
            (5, _) => Self::Gemini,
            (6, d) if d <= 20 => Self::Gemini,
            (6, _) => Self::Cancer,
            (7, d) if d <= 22 => Self::Cancer,
            (7, _) => Self::Leo,
            (8, d) if d <= 22 => Self::Leo,
            (8, _) => Self::Virgo,
            (9, d) if d <= 22 => Self::Virgo,
            (9, _) => Self::Libra,
            (10, d) if d <= 22 => Self::Libra,
            (10, _) => Self::Scorpio,
            (11, d) if d <= 21 => Self::Scorpio,
            (11, _) => Self::Sagittarius,
            (12, d) if d <= 21 => Self::Sagittarius,
            _ => Self::Capricorn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(ZodiacSign::for_date(date(1990, 1, 19)), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::for_date(date(1990, 1, 20)), ZodiacSign::Aquarius);
        assert_eq!(ZodiacSign::for_date(date(1990, 3, 20)), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::for_date(date(1990, 3, 21)), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::for_date(date(1990, 12, 21)), ZodiacSign::Sagittarius);
        assert_eq!(ZodiacSign::for_date(date(1990, 12, 22)), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::for_date(date(1990, 12, 31)), ZodiacSign::Capricorn);
    }

    #[test]
    fn test_mid_may_is_taurus() {
        assert_eq!(ZodiacSign::for_date(date(1990, 5, 15)), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::for_date(date(1990, 5, 15)).element(), Element::Earth);
    }

    #[test]
    fn test_every_sign_has_a_range_and_element() {
        // Three signs per element across the twelve.
        let mut fire = 0;
        for sign in ZodiacSign::iter() {
            assert!(!sign.date_range().is_empty());
            if sign.element() == Element::Fire {
                fire += 1;
            }
        }
        assert_eq!(fire, 3);
    }

    #[test]
    fn test_display_renders_plain_names() {
        assert_eq!(ZodiacSign::Sagittarius.to_string(), "Sagittarius");
    }
}
