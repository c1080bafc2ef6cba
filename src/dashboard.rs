//! Summary cards shown at the top of the dashboard.
//!
//! Card data is static; [`SummaryCard::localize`] turns a card into the
//! strings a view renders for the store's current locale.

use serde::Serialize;

use crate::format::NumberFormatOptions;
use crate::store::LocaleStore;
use crate::types::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Currency,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPoint {
    /// Key under `dashboard.months`.
    pub month: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryCard {
    /// Key under `dashboard.cards`.
    pub id: &'static str,
    pub value: f64,
    pub kind: ValueKind,
    pub trend: Trend,
    /// Change shown next to the trend arrow, already a percentage.
    pub percentage: &'static str,
    pub chart: &'static [MonthlyPoint],
}

const fn point(month: &'static str, value: f64) -> MonthlyPoint {
    MonthlyPoint { month, value }
}

pub const SUMMARY_CARDS: [SummaryCard; 4] = [
    SummaryCard {
        id: "netWorth",
        value: 124_571.0,
        kind: ValueKind::Currency,
        trend: Trend::Up,
        percentage: "2.5",
        chart: &[
            point("jan", 110_000.0),
            point("feb", 115_000.0),
            point("mar", 112_000.0),
            point("apr", 118_000.0),
            point("may", 120_000.0),
            point("jun", 124_571.0),
        ],
    },
    SummaryCard {
        id: "monthlyIncome",
        value: 8250.0,
        kind: ValueKind::Currency,
        trend: Trend::Up,
        percentage: "5",
        chart: &[
            point("jan", 7200.0),
            point("feb", 7500.0),
            point("mar", 7800.0),
            point("apr", 7600.0),
            point("may", 7850.0),
            point("jun", 8250.0),
        ],
    },
    SummaryCard {
        id: "monthlyExpenses",
        value: 4125.0,
        kind: ValueKind::Currency,
        trend: Trend::Down,
        percentage: "3",
        chart: &[
            point("jan", 4500.0),
            point("feb", 4300.0),
            point("mar", 4600.0),
            point("apr", 4400.0),
            point("may", 4250.0),
            point("jun", 4125.0),
        ],
    },
    SummaryCard {
        id: "savingsRate",
        value: 50.0,
        kind: ValueKind::Percentage,
        trend: Trend::Up,
        percentage: "2",
        chart: &[
            point("jan", 45.0),
            point("feb", 46.0),
            point("mar", 44.0),
            point("apr", 47.0),
            point("may", 49.0),
            point("jun", 50.0),
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedPoint {
    pub label: String,
    pub value: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCard {
    pub label: String,
    pub value: String,
    pub change: String,
    pub percentage: String,
    pub trend: Trend,
    pub chart: Vec<LocalizedPoint>,
}

impl SummaryCard {
    #[must_use]
    pub fn label_key(&self) -> String {
        format!("dashboard.cards.{}.label", self.id)
    }

    #[must_use]
    pub fn change_key(&self) -> String {
        format!("dashboard.cards.{}.change", self.id)
    }

    /// Relative change from the first to the last chart point, in percent.
    ///
    /// `None` with fewer than two points or a zero starting value.
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn change_percentage(&self) -> Option<f64> {
        let (first, last) = (self.chart.first()?, self.chart.last()?);
        if self.chart.len() < 2 || first.value == 0.0 {
            return None;
        }
        Some((last.value - first.value) / first.value * 100.0)
    }

    #[must_use]
    pub fn localize(&self, store: &LocaleStore) -> LocalizedCard {
        let chart = self
            .chart
            .iter()
            .map(|point| LocalizedPoint {
                label: store.translate(&format!("dashboard.months.{}", point.month)),
                value: point.value,
                formatted: format_card_value(store, self.kind, point.value),
            })
            .collect();

        LocalizedCard {
            label: store.translate(&self.label_key()),
            value: format_card_value(store, self.kind, self.value),
            change: store.translate(&self.change_key()),
            percentage: self.percentage.to_string(),
            trend: self.trend,
            chart,
        }
    }
}

/// Currency values get the locale's currency sign glued to the plain number;
/// percentages get a trailing `%`.
#[must_use]
pub fn format_card_value(store: &LocaleStore, kind: ValueKind, value: f64) -> String {
    let number = store.format_number(value, &NumberFormatOptions::default());
    match kind {
        ValueKind::Currency => {
            let sign = match store.locale() {
                Locale::En => "$",
                Locale::Pt => "R$",
            };
            format!("{sign}{number}")
        }
        ValueKind::Percentage => format!("{number}%"),
    }
}

/// All cards localized for the current locale.
#[must_use]
pub fn localized_cards(store: &LocaleStore) -> Vec<LocalizedCard> {
    SUMMARY_CARDS.iter().map(|card| card.localize(store)).collect()
}
