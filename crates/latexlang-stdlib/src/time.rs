//! The current date

#[cfg(feature = "time")]
use chrono::{DateTime, Datelike, Local};
use latexlang::command::{Arguments, Implementation};
use latexlang::output::Backend;
use latexlang::prelude as txl;
use latexlang::vm::Interpreter;

pub const TODAY_DOC: &str = r"Print the current date, as in `October 17, 2026`";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl Date {
    /// The current date in the local time zone.
    #[cfg(feature = "time")]
    pub fn today() -> Option<Date> {
        let now: DateTime<Local> = Local::now();
        Some(Date {
            day: now.day(),
            month: now.month(),
            year: now.year(),
        })
    }

    #[cfg(not(feature = "time"))]
    pub fn today() -> Option<Date> {
        None
    }

    pub fn new_with_values(day: u32, month: u32, year: i32) -> Date {
        Date { day, month, year }
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let month = self
            .month
            .checked_sub(1)
            .and_then(|i| MONTHS.get(i as usize))
            .copied()
            .unwrap_or("?");
        write!(f, "{} {}, {}", month, self.day, self.year)
    }
}

pub fn get_today<B: Backend>() -> Implementation<B> {
    Implementation::new(today_fn).with_doc(TODAY_DOC)
}

fn today_fn<B: Backend>(interpreter: &mut Interpreter<B>, _: Arguments<B::Node>) -> txl::Result<Vec<B::Node>> {
    match Date::today() {
        Some(date) => Ok(vec![interpreter.text(&date.to_string())]),
        None => {
            interpreter.warn("the current date is not available in this build");
            Ok(vec![])
        }
    }
}
