use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use log::error;
use rusqlite::{params, Connection};

use crate::model::{
    error::ApiError,
    transaction::{Counterpart, Payment, Transaction, TransactionDraft, TransactionType},
};

pub struct Db {
    connection: Mutex<Connection>,
}

impl Db {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db, rusqlite::Error> {
        Db::initialize(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Db, rusqlite::Error> {
        Db::initialize(Connection::open_in_memory()?)
    }

    fn initialize(connection: Connection) -> Result<Db, rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                tx_type TEXT NOT NULL,
                payment TEXT NOT NULL,
                counterpart_id TEXT NOT NULL,
                amount INTEGER NOT NULL,
                recorded_at INTEGER NOT NULL
            )",
            (),
        )?;
        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transactions_type_date
                ON transactions (tx_type, recorded_at)",
            (),
        )?;

        Ok(Db {
            connection: Mutex::new(connection),
        })
    }

    // Single atomic insert; the row is committed before this returns. The
    // record's date is the moment of insertion unless the caller supplies one.
    pub fn save(
        &self,
        draft: TransactionDraft,
        date: Option<DateTime<Utc>>,
    ) -> Result<Transaction, ApiError> {
        let conn = self.connection.lock().unwrap();
        let date = date.unwrap_or_else(Utc::now);

        conn.execute(
            "INSERT INTO transactions (tx_type, payment, counterpart_id, amount, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.tx_type().serialize_for_db(),
                draft.payment.serialize_for_db(),
                draft.counterpart.id(),
                draft.amount,
                date.timestamp_millis(),
            ],
        )?;

        Ok(Transaction::new(
            conn.last_insert_rowid(),
            draft.counterpart,
            draft.payment,
            draft.amount,
            date,
        ))
    }

    pub fn get_transactions_in_range(
        &self,
        tx_type: TransactionType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let conn = self.connection.lock().unwrap();
        let mut transactions: Vec<Transaction> = Vec::new();

        let mut stmt = conn.prepare(
            "SELECT id, tx_type, payment, counterpart_id, amount, recorded_at
                FROM transactions
                WHERE tx_type = ?1 AND recorded_at >= ?2 AND recorded_at < ?3",
        )?;

        let mut rows = stmt.query(params![
            tx_type.serialize_for_db(),
            start.timestamp_millis(),
            end.timestamp_millis(),
        ])?;

        while let Some(row) = rows.next()? {
            let recorded_at = Utc
                .timestamp_millis_opt(row.get::<usize, i64>(5)?)
                .single()
                .unwrap();

            transactions.push(Transaction::new(
                row.get::<usize, i64>(0)?,
                counterpart_from_row(&row.get::<usize, String>(1)?, row.get::<usize, String>(3)?)?,
                payment_from_row(&row.get::<usize, String>(2)?)?,
                row.get::<usize, i64>(4)?,
                recorded_at,
            ));
        }

        Ok(transactions)
    }
}

fn counterpart_from_row(tx_type: &str, id: String) -> Result<Counterpart, ApiError> {
    match TransactionType::deserialize_from_db(tx_type) {
        Some(tx_type) => Ok(Counterpart::new(tx_type, id)),
        None => {
            error!("unrecognized tx_type '{}' in store", tx_type);
            Err(ApiError::InternalError(String::from("Internal Error")))
        }
    }
}

fn payment_from_row(payment: &str) -> Result<Payment, ApiError> {
    match Payment::deserialize_from_db(payment) {
        Some(payment) => Ok(payment),
        None => {
            error!("unrecognized payment '{}' in store", payment);
            Err(ApiError::InternalError(String::from("Internal Error")))
        }
    }
}
