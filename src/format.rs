//! Number and date formatting keyed by [`RegionalTag`](crate::types::RegionalTag).

pub mod date;
pub mod number;

pub use date::{
    DateFormatOptions,
    DateStyle,
    format_date,
    format_naive_date,
};
pub use number::{
    Currency,
    NumberFormatOptions,
    NumberStyle,
    UnknownCurrency,
    format_number,
};
