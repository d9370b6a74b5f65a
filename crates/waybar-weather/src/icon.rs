//! Condition-code to glyph mapping (Font Awesome private-use code points as
//! shipped by Nerd Fonts).

use chrono::{DateTime, Utc};

use crate::model::ConditionSnapshot;

pub const THUNDERSTORM: &str = "\u{f76c}";
pub const DRIZZLE: &str = "\u{f73d}";
pub const RAIN_DAY: &str = "\u{f743}";
pub const RAIN_NIGHT: &str = "\u{f73c}";
pub const HEAVY_RAIN: &str = "\u{f740}";
pub const SNOW: &str = "\u{f2dc}";
pub const FOG: &str = "\u{f75f}";
pub const VOLCANIC_ASH: &str = "\u{f770}";
pub const SQUALLS: &str = "\u{f72e}";
pub const TORNADO: &str = "\u{f76f}";
pub const CLEAR_DAY: &str = "\u{f185}";
pub const CLEAR_NIGHT: &str = "\u{f186}";
pub const FEW_CLOUDS_DAY: &str = "\u{f6c4}";
pub const FEW_CLOUDS_NIGHT: &str = "\u{f6c3}";
pub const CLOUDS: &str = "\u{f0c2}";
pub const DEFAULT_GLYPH: &str = CLEAR_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRule {
    pub first: i32,
    pub last: i32,
    pub day: &'static str,
    pub night: &'static str,
}

impl GlyphRule {
    const fn range(first: i32, last: i32, day: &'static str, night: &'static str) -> Self {
        Self {
            first,
            last,
            day,
            night,
        }
    }

    const fn exact(code: i32, glyph: &'static str) -> Self {
        Self::range(code, code, glyph, glyph)
    }

    pub fn matches(&self, code: i32) -> bool {
        (self.first..=self.last).contains(&code)
    }
}

/// Evaluated top-down; the first matching rule wins.
pub const GLYPH_TABLE: &[GlyphRule] = &[
    GlyphRule::range(200, 299, THUNDERSTORM, THUNDERSTORM),
    GlyphRule::range(300, 399, DRIZZLE, DRIZZLE),
    GlyphRule::range(500, 504, RAIN_DAY, RAIN_NIGHT),
    GlyphRule::exact(505, SNOW),
    GlyphRule::range(506, 599, HEAVY_RAIN, HEAVY_RAIN),
    GlyphRule::range(600, 699, SNOW, SNOW),
    GlyphRule::range(700, 761, FOG, FOG),
    GlyphRule::exact(762, VOLCANIC_ASH),
    GlyphRule::exact(771, SQUALLS),
    GlyphRule::exact(781, TORNADO),
    GlyphRule::range(763, 799, FOG, FOG),
    GlyphRule::range(800, 800, CLEAR_DAY, CLEAR_NIGHT),
    GlyphRule::range(801, 801, FEW_CLOUDS_DAY, FEW_CLOUDS_NIGHT),
    GlyphRule::range(802, 899, CLOUDS, CLOUDS),
];

pub fn select_glyph(code: i32, is_night: bool) -> &'static str {
    GLYPH_TABLE
        .iter()
        .find(|rule| rule.matches(code))
        .map(|rule| if is_night { rule.night } else { rule.day })
        .unwrap_or(DEFAULT_GLYPH)
}

/// How "night" is derived from a snapshot's sunrise/sunset pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NightPolicy {
    /// After sunset AND before sunrise. With a same-day pair (sunrise <
    /// sunset) this is never true; kept because it is what the module has
    /// always rendered.
    #[default]
    AsObserved,
    /// Before sunrise OR after sunset.
    OutsideDaylight,
}

impl NightPolicy {
    pub fn is_night(self, now: DateTime<Utc>, snapshot: &ConditionSnapshot) -> bool {
        let (Some(sunrise), Some(sunset)) = (snapshot.sunrise(), snapshot.sunset()) else {
            return false;
        };

        match self {
            Self::AsObserved => now > sunset && now < sunrise,
            Self::OutsideDaylight => now < sunrise || now > sunset,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::{Readings, SunTimes};

    fn snapshot(sunrise: i64, sunset: i64) -> ConditionSnapshot {
        ConditionSnapshot {
            weather: Vec::new(),
            main: Readings::default(),
            sys: SunTimes { sunrise, sunset },
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, hour, minute, 0)
            .single()
            .expect("time")
    }

    #[test]
    fn glyph_thunderstorm_ignores_night_flag() {
        assert_eq!(select_glyph(200, false), THUNDERSTORM);
        assert_eq!(select_glyph(200, true), THUNDERSTORM);
        assert_eq!(select_glyph(232, true), THUNDERSTORM);
    }

    #[test]
    fn glyph_clear_sky_has_day_and_night_variants() {
        assert_eq!(select_glyph(800, false), CLEAR_DAY);
        assert_eq!(select_glyph(800, true), CLEAR_NIGHT);
        assert_eq!(select_glyph(801, false), FEW_CLOUDS_DAY);
        assert_eq!(select_glyph(801, true), FEW_CLOUDS_NIGHT);
    }

    #[test]
    fn glyph_rain_splits_at_505() {
        assert_eq!(select_glyph(500, false), RAIN_DAY);
        assert_eq!(select_glyph(504, true), RAIN_NIGHT);
        assert_eq!(select_glyph(505, false), SNOW);
        assert_eq!(select_glyph(505, true), SNOW);
        assert_eq!(select_glyph(511, false), HEAVY_RAIN);
        assert_eq!(select_glyph(531, true), HEAVY_RAIN);
    }

    #[test]
    fn glyph_atmosphere_single_code_branches() {
        assert_eq!(select_glyph(701, false), FOG);
        assert_eq!(select_glyph(761, false), FOG);
        assert_eq!(select_glyph(762, false), VOLCANIC_ASH);
        assert_eq!(select_glyph(771, true), SQUALLS);
        assert_eq!(select_glyph(781, false), TORNADO);
        assert_eq!(select_glyph(770, false), FOG);
        assert_eq!(select_glyph(799, false), FOG);
    }

    #[test]
    fn glyph_cloud_cover_is_flat_from_802() {
        for code in [802, 803, 804, 899] {
            assert_eq!(select_glyph(code, false), CLOUDS);
            assert_eq!(select_glyph(code, true), CLOUDS);
        }
    }

    #[test]
    fn glyph_unmatched_codes_use_default() {
        for code in [999, 0, -1, 150, 400, 450, 900] {
            assert_eq!(select_glyph(code, false), DEFAULT_GLYPH);
            assert_eq!(select_glyph(code, true), DEFAULT_GLYPH);
        }
    }

    #[test]
    fn glyph_selection_is_deterministic() {
        for code in 0..1000 {
            for night in [false, true] {
                assert_eq!(select_glyph(code, night), select_glyph(code, night));
            }
        }
    }

    #[test]
    fn glyph_table_single_code_rules_precede_overlapping_ranges() {
        let tornado = GLYPH_TABLE
            .iter()
            .position(|rule| rule.first == 781)
            .expect("tornado rule");
        let tail = GLYPH_TABLE
            .iter()
            .position(|rule| rule.first == 763)
            .expect("atmosphere tail rule");
        assert!(tornado < tail);
    }

    #[test]
    fn as_observed_policy_is_never_night_for_same_day_pair() {
        let data = snapshot(at(6, 0).timestamp(), at(18, 0).timestamp());

        for now in [at(3, 0), at(12, 0), at(23, 0)] {
            assert!(!NightPolicy::AsObserved.is_night(now, &data));
        }
    }

    #[test]
    fn as_observed_policy_matches_when_sunrise_follows_sunset() {
        let next_sunrise = at(6, 0).timestamp() + 24 * 3600;
        let data = snapshot(next_sunrise, at(18, 0).timestamp());

        assert!(NightPolicy::AsObserved.is_night(at(23, 0), &data));
        assert!(!NightPolicy::AsObserved.is_night(at(17, 0), &data));
    }

    #[test]
    fn outside_daylight_policy_covers_both_ends_of_the_day() {
        let data = snapshot(at(6, 0).timestamp(), at(18, 0).timestamp());

        assert!(NightPolicy::OutsideDaylight.is_night(at(3, 0), &data));
        assert!(NightPolicy::OutsideDaylight.is_night(at(23, 0), &data));
        assert!(!NightPolicy::OutsideDaylight.is_night(at(12, 0), &data));
        assert!(!NightPolicy::OutsideDaylight.is_night(at(6, 0), &data));
    }

    #[test]
    fn night_policy_defaults_to_as_observed() {
        assert_eq!(NightPolicy::default(), NightPolicy::AsObserved);
    }
}
