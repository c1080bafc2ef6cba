//! Locale-aware date rendering on top of chrono's localized strftime.

use std::fmt;

use chrono::{
    DateTime,
    NaiveDate,
    NaiveTime,
    TimeZone,
    Utc,
};

use crate::types::RegionalTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `6/15/2024`, `15/06/2024`
    #[default]
    Short,
    /// `Jun 15, 2024`, `15 de jun. de 2024`
    Medium,
    /// `June 15, 2024`, `15 de junho de 2024`
    Long,
    /// Long plus the weekday.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFormatOptions {
    pub style: DateStyle,
    pub include_time: bool,
}

impl DateFormatOptions {
    #[must_use]
    pub const fn new(style: DateStyle) -> Self {
        Self { style, include_time: false }
    }

    #[must_use]
    pub const fn with_time(mut self) -> Self {
        self.include_time = true;
        self
    }
}

/// chrono pattern for the date part.
const fn date_pattern(tag: RegionalTag, style: DateStyle) -> &'static str {
    match (tag, style) {
        (RegionalTag::EnUs, DateStyle::Short) => "%-m/%-d/%Y",
        (RegionalTag::EnUs, DateStyle::Medium) => "%b %-d, %Y",
        (RegionalTag::EnUs, DateStyle::Long) => "%B %-d, %Y",
        (RegionalTag::EnUs, DateStyle::Full) => "%A, %B %-d, %Y",
        (RegionalTag::PtBr, DateStyle::Short) => "%d/%m/%Y",
        (RegionalTag::PtBr, DateStyle::Medium) => "%-d de %b. de %Y",
        (RegionalTag::PtBr, DateStyle::Long) => "%-d de %B de %Y",
        (RegionalTag::PtBr, DateStyle::Full) => "%A, %-d de %B de %Y",
    }
}

/// chrono pattern appended when the time is included, separator first.
const fn time_pattern(tag: RegionalTag) -> &'static str {
    match tag {
        RegionalTag::EnUs => ", %-I:%M %p",
        RegionalTag::PtBr => " %H:%M",
    }
}

/// Renders `value` in its own time zone under the conventions of `tag`.
#[must_use]
pub fn format_date<Tz>(value: &DateTime<Tz>, tag: RegionalTag, options: &DateFormatOptions) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut pattern = date_pattern(tag, options.style).to_string();
    if options.include_time {
        pattern.push_str(time_pattern(tag));
    }

    value.format_localized(&pattern, tag.chrono_locale()).to_string()
}

/// Calendar dates have no time of day; `include_time` renders midnight.
#[must_use]
pub fn format_naive_date(date: NaiveDate, tag: RegionalTag, options: &DateFormatOptions) -> String {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
    format_date(&midnight, tag, options)
}
