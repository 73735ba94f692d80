use std::collections::HashSet;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use log::error;

use crate::db::Db;
use crate::model::{
    error::ApiError,
    transaction::{Payment, Transaction, TransactionType},
};

// Every report covers the same fixed window: the local calendar day that
// contains the current moment, start inclusive, end exclusive.
#[derive(Debug, Clone, Copy)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn today() -> DayWindow {
        let today = Local::now().date_naive();

        DayWindow {
            start: day_start(today),
            end: day_start(today.succ_opt().unwrap()),
        }
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    day_start_in(&Local, date)
}

// local midnight can be skipped or doubled on DST changeover days; the day
// starts at the earliest instant the wall clock actually reads, found by
// scanning forward a minute at a time through any gap
fn day_start_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);

    for minutes in 0..48 * 60 {
        let candidate = midnight + Duration::minutes(minutes);
        if let Some(start) = tz.from_local_datetime(&candidate).earliest() {
            return start.with_timezone(&Utc);
        }
    }

    Utc.from_utc_datetime(&midnight)
}

#[derive(Debug, PartialEq, Eq)]
pub struct TypeSummary {
    pub total_amount: i64,
    pub distinct_count: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RevenueSummary {
    pub total_revenue: i64,
    pub due_to_customers: i64,
    pub due_from_suppliers: i64,
}

pub fn total_by_type(db: &Db, tx_type: TransactionType) -> Result<i64, ApiError> {
    let window = DayWindow::today();
    let records = db.get_transactions_in_range(tx_type, window.start, window.end)?;

    sum_amounts(&records)
}

pub fn summary_by_type(db: &Db, tx_type: TransactionType) -> Result<TypeSummary, ApiError> {
    let window = DayWindow::today();
    let records = db.get_transactions_in_range(tx_type, window.start, window.end)?;

    let counterparts: HashSet<&str> = records.iter().map(|t| t.counterpart.id()).collect();

    Ok(TypeSummary {
        total_amount: sum_amounts(&records)?,
        distinct_count: counterparts.len(),
    })
}

pub fn revenue_summary(db: &Db) -> Result<RevenueSummary, ApiError> {
    let window = DayWindow::today();
    let sells = db.get_transactions_in_range(TransactionType::Sell, window.start, window.end)?;
    let buys = db.get_transactions_in_range(TransactionType::Buy, window.start, window.end)?;

    let (sell_cash, sell_due) = totals_by_payment(&sells)?;
    let (_, buy_due) = totals_by_payment(&buys)?;

    Ok(RevenueSummary {
        total_revenue: add_amount(sell_cash, sell_due)?,
        due_to_customers: sell_due,
        due_from_suppliers: buy_due,
    })
}

fn sum_amounts(records: &[Transaction]) -> Result<i64, ApiError> {
    records
        .iter()
        .try_fold(0, |total, t| add_amount(total, t.amount))
}

// (cash, due) sums; a payment method with no records contributes zero
fn totals_by_payment(records: &[Transaction]) -> Result<(i64, i64), ApiError> {
    records
        .iter()
        .try_fold((0, 0), |(cash, due), t| match t.payment {
            Payment::Cash => Ok((add_amount(cash, t.amount)?, due)),
            Payment::Due => Ok((cash, add_amount(due, t.amount)?)),
        })
}

// single amounts go up to i64::MAX, so a day's records can exceed the type;
// an unrepresentable total surfaces as a server error, not a wrapped sum
fn add_amount(total: i64, amount: i64) -> Result<i64, ApiError> {
    match total.checked_add(amount) {
        Some(total) => Ok(total),
        None => {
            error!("amount total overflowed adding {}", amount);
            Err(ApiError::InternalError(String::from("Internal Error")))
        }
    }
}
