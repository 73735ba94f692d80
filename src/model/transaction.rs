use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn serialize_for_db(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
        }
    }

    pub fn deserialize_from_db(value: &str) -> Option<TransactionType> {
        match value {
            "buy" => Some(TransactionType::Buy),
            "sell" => Some(TransactionType::Sell),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payment {
    Cash,
    Due,
}

impl Payment {
    pub fn serialize_for_db(&self) -> &'static str {
        match self {
            Payment::Cash => "cash",
            Payment::Due => "due",
        }
    }

    pub fn deserialize_from_db(value: &str) -> Option<Payment> {
        match value {
            "cash" => Some(Payment::Cash),
            "due" => Some(Payment::Due),
            _ => None,
        }
    }
}

// Which side a record names follows from its type: buys carry the purchased
// product's id, sells carry the paying customer's id. Holding the id inside
// the variant makes a record with both (or neither) unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterpart {
    Product(String),
    Entity(String),
}

impl Counterpart {
    pub fn new(tx_type: TransactionType, id: String) -> Counterpart {
        match tx_type {
            TransactionType::Buy => Counterpart::Product(id),
            TransactionType::Sell => Counterpart::Entity(id),
        }
    }

    pub fn tx_type(&self) -> TransactionType {
        match self {
            Counterpart::Product(_) => TransactionType::Buy,
            Counterpart::Entity(_) => TransactionType::Sell,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Counterpart::Product(id) => id,
            Counterpart::Entity(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub counterpart: Counterpart,
    pub payment: Payment,
    pub amount: i64,
}

impl TransactionDraft {
    pub fn tx_type(&self) -> TransactionType {
        self.counterpart.tx_type()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub counterpart: Counterpart,
    pub payment: Payment,
    pub amount: i64,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: i64,
        counterpart: Counterpart,
        payment: Payment,
        amount: i64,
        date: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id,
            counterpart,
            payment,
            amount,
            date,
        }
    }

    pub fn tx_type(&self) -> TransactionType {
        self.counterpart.tx_type()
    }
}
