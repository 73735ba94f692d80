pub mod path_not_found;
pub mod record_transaction;
pub mod reports;
