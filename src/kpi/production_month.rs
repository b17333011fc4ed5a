use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Books close on this day; anything written after it is produced next month.
pub const CLOSING_DAY: u32 = 25;

/// Accounting month an order's premium counts toward.
///
/// `month_index` is zero based (January = 0) to line up with the monthly
/// target arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionMonth {
    pub year: i32,
    pub month_index: u32,
}

impl ProductionMonth {
    pub fn new(year: i32, month_index: u32) -> Self {
        ProductionMonth { year, month_index }
    }

    pub fn of(order_date: NaiveDate) -> Self {
        let calendar = ProductionMonth::new(order_date.year(), order_date.month0());
        if order_date.day() > CLOSING_DAY {
            calendar.next()
        } else {
            calendar
        }
    }

    pub fn next(self) -> Self {
        if self.month_index == 11 {
            ProductionMonth::new(self.year + 1, 0)
        } else {
            ProductionMonth::new(self.year, self.month_index + 1)
        }
    }
}
