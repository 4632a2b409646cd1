// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db::{
    self, SLOT_BANKS, SLOT_CATEGORIES, SLOT_FIADOS, SLOT_HISTORY, SLOT_LAST_CHECK,
    SLOT_TRANSACTIONS,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Bank, Category, Fiado, MonthHistory, NewFiado, NewTransaction, SALE_CATEGORY_ID, Transaction,
    TransactionType, default_banks, default_categories,
};
use crate::rollover;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub banks: Vec<Bank>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub fiados: Vec<Fiado>,
    pub history: Vec<MonthHistory>,
    pub last_check: NaiveDateTime,
}

impl Ledger {
    pub fn seeded(now: NaiveDateTime) -> Self {
        Ledger {
            banks: default_banks(),
            categories: default_categories(),
            transactions: Vec::new(),
            fiados: Vec::new(),
            history: Vec::new(),
            last_check: now,
        }
    }

    pub fn bank(&self, id: &str) -> Option<&Bank> {
        self.banks.iter().find(|b| b.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn fiado(&self, id: &str) -> Option<&Fiado> {
        self.fiados.iter().find(|f| f.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiadoPayment {
    pub fiado: Fiado,
    pub transaction: Transaction,
}

struct Closing {
    entry: MonthHistory,
    history: Vec<MonthHistory>,
    at: NaiveDateTime,
}

impl Closing {
    fn write(&self, conn: &Connection) -> LedgerResult<()> {
        db::write_slot(conn, SLOT_HISTORY, &self.history)?;
        db::write_slot(conn, SLOT_LAST_CHECK, &self.at)
    }
}

pub struct Store {
    conn: Connection,
    clock: Clock,
    ledger: Ledger,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn positive(amount: Decimal) -> LedgerResult<Decimal> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

fn non_empty(name: &str, what: &'static str) -> LedgerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        Err(LedgerError::EmptyName(what))
    } else {
        Ok(name.to_string())
    }
}

impl Store {
    pub fn open(conn: Connection) -> LedgerResult<Self> {
        Self::open_with_clock(conn, Clock::System)
    }

    pub fn open_with_clock(conn: Connection, clock: Clock) -> LedgerResult<Self> {
        db::init_schema(&conn)?;
        let ledger = Self::load(&conn, clock.now())?;
        let mut store = Store {
            conn,
            clock,
            ledger,
        };
        store.ensure_checkpoint()?;
        store.check_rollover()?;
        Ok(store)
    }

    fn ensure_checkpoint(&mut self) -> LedgerResult<()> {
        if db::read_slot::<NaiveDateTime>(&self.conn, SLOT_LAST_CHECK)?.is_none() {
            db::write_slot(&self.conn, SLOT_LAST_CHECK, &self.ledger.last_check)?;
        }
        Ok(())
    }

    fn load(conn: &Connection, now: NaiveDateTime) -> LedgerResult<Ledger> {
        let seeded = Ledger::seeded(now);
        Ok(Ledger {
            banks: db::read_slot(conn, SLOT_BANKS)?.unwrap_or(seeded.banks),
            categories: db::read_slot(conn, SLOT_CATEGORIES)?.unwrap_or(seeded.categories),
            transactions: db::read_slot(conn, SLOT_TRANSACTIONS)?.unwrap_or_default(),
            fiados: db::read_slot(conn, SLOT_FIADOS)?.unwrap_or_default(),
            history: db::read_slot(conn, SLOT_HISTORY)?.unwrap_or_default(),
            last_check: db::read_slot(conn, SLOT_LAST_CHECK)?.unwrap_or(now),
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Appends last month's snapshot when the calendar month moved on since
    /// the checkpoint. Running it again in the same month is a no-op.
    pub fn check_rollover(&mut self) -> LedgerResult<Option<MonthHistory>> {
        let Some(closing) = self.closing_for(&self.ledger.transactions) else {
            return Ok(None);
        };
        let tx = self.conn.unchecked_transaction()?;
        closing.write(&tx)?;
        tx.commit()?;
        Ok(Some(self.apply_closing(closing)))
    }

    fn closing_for(&self, transactions: &[Transaction]) -> Option<Closing> {
        let now = self.clock.now();
        let entry = rollover::check(transactions, self.ledger.last_check, now)?;
        let mut history = self.ledger.history.clone();
        history.push(entry.clone());
        Some(Closing {
            entry,
            history,
            at: now,
        })
    }

    fn apply_closing(&mut self, closing: Closing) -> MonthHistory {
        tracing::info!(
            month = %closing.entry.month_year,
            sold = %closing.entry.total_sold,
            cost = %closing.entry.total_cost,
            "month closed"
        );
        self.ledger.history = closing.history;
        self.ledger.last_check = closing.at;
        closing.entry
    }

    // The month snapshot commits with the transaction slot or not at all.
    fn save_transactions(&mut self, transactions: Vec<Transaction>) -> LedgerResult<()> {
        let closing = self.closing_for(&transactions);
        let tx = self.conn.unchecked_transaction()?;
        db::write_slot(&tx, SLOT_TRANSACTIONS, &transactions)?;
        if let Some(c) = &closing {
            c.write(&tx)?;
        }
        tx.commit()?;

        self.ledger.transactions = transactions;
        if let Some(c) = closing {
            self.apply_closing(c);
        }
        Ok(())
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> LedgerResult<Transaction> {
        let t = Transaction {
            id: new_id(),
            date: new.date,
            description: new.description.trim().to_string(),
            amount: positive(new.amount)?,
            kind: new.kind,
            bank_id: new.bank_id,
            category_id: new.category_id,
            is_paid: new.is_paid,
            quantity: new.quantity,
        };
        let mut transactions = self.ledger.transactions.clone();
        transactions.push(t.clone());
        self.save_transactions(transactions)?;
        Ok(t)
    }

    pub fn remove_transaction(&mut self, id: &str) -> LedgerResult<bool> {
        let before = self.ledger.transactions.len();
        let transactions: Vec<Transaction> = self
            .ledger
            .transactions
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        let removed = transactions.len() != before;
        if removed {
            self.save_transactions(transactions)?;
        }
        Ok(removed)
    }

    pub fn add_bank(&mut self, name: &str, color: &str, initial_balance: Decimal) -> LedgerResult<Bank> {
        let bank = Bank {
            id: new_id(),
            name: non_empty(name, "bank")?,
            color: color.trim().to_string(),
            initial_balance,
        };
        let mut banks = self.ledger.banks.clone();
        banks.push(bank.clone());
        db::write_slot(&self.conn, SLOT_BANKS, &banks)?;
        self.ledger.banks = banks;
        Ok(bank)
    }

    pub fn remove_bank(&mut self, id: &str) -> LedgerResult<bool> {
        let banks: Vec<Bank> = self.ledger.banks.iter().filter(|b| b.id != id).cloned().collect();
        if banks.len() == self.ledger.banks.len() {
            return Ok(false);
        }
        db::write_slot(&self.conn, SLOT_BANKS, &banks)?;
        self.ledger.banks = banks;
        Ok(true)
    }

    pub fn add_category(&mut self, name: &str) -> LedgerResult<Category> {
        let category = Category {
            id: new_id(),
            name: non_empty(name, "category")?,
        };
        let mut categories = self.ledger.categories.clone();
        categories.push(category.clone());
        db::write_slot(&self.conn, SLOT_CATEGORIES, &categories)?;
        self.ledger.categories = categories;
        Ok(category)
    }

    pub fn remove_category(&mut self, id: &str) -> LedgerResult<bool> {
        let categories: Vec<Category> = self
            .ledger
            .categories
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        if categories.len() == self.ledger.categories.len() {
            return Ok(false);
        }
        db::write_slot(&self.conn, SLOT_CATEGORIES, &categories)?;
        self.ledger.categories = categories;
        Ok(true)
    }

    pub fn add_fiado(&mut self, new: NewFiado) -> LedgerResult<Fiado> {
        let fiado = Fiado {
            id: new_id(),
            customer_name: non_empty(&new.customer_name, "customer")?,
            amount: positive(new.amount)?,
            date: new.date,
            is_paid: false,
            notes: new.notes.filter(|n| !n.trim().is_empty()),
        };
        let mut fiados = self.ledger.fiados.clone();
        fiados.push(fiado.clone());
        db::write_slot(&self.conn, SLOT_FIADOS, &fiados)?;
        self.ledger.fiados = fiados;
        Ok(fiado)
    }

    /// Marks the fiado paid and books the matching income into `bank_id`.
    /// Unknown ids are a no-op.
    pub fn pay_fiado(&mut self, fiado_id: &str, bank_id: &str) -> LedgerResult<Option<FiadoPayment>> {
        let Some(found) = self.ledger.fiado(fiado_id) else {
            return Ok(None);
        };
        if found.is_paid {
            return Err(LedgerError::FiadoAlreadyPaid(fiado_id.to_string()));
        }
        let paid = Fiado {
            is_paid: true,
            ..found.clone()
        };
        let income = Transaction {
            id: new_id(),
            date: self.today(),
            description: format!("Fiado payment: {}", paid.customer_name),
            amount: paid.amount,
            kind: TransactionType::Income,
            bank_id: bank_id.to_string(),
            category_id: SALE_CATEGORY_ID.to_string(),
            is_paid: true,
            quantity: None,
        };

        let fiados: Vec<Fiado> = self
            .ledger
            .fiados
            .iter()
            .map(|f| if f.id == fiado_id { paid.clone() } else { f.clone() })
            .collect();
        let mut transactions = self.ledger.transactions.clone();
        transactions.push(income.clone());

        let closing = self.closing_for(&transactions);

        let tx = self.conn.unchecked_transaction()?;
        db::write_slot(&tx, SLOT_FIADOS, &fiados)?;
        db::write_slot(&tx, SLOT_TRANSACTIONS, &transactions)?;
        if let Some(c) = &closing {
            c.write(&tx)?;
        }
        tx.commit()?;

        self.ledger.fiados = fiados;
        self.ledger.transactions = transactions;
        tracing::info!(fiado = fiado_id, bank = bank_id, amount = %paid.amount, "fiado settled");
        if let Some(c) = closing {
            self.apply_closing(c);
        }
        Ok(Some(FiadoPayment {
            fiado: paid,
            transaction: income,
        }))
    }

    #[deprecated(note = "use pay_fiado; toggling back does not retract the booked income")]
    pub fn toggle_fiado_paid(&mut self, id: &str) -> LedgerResult<bool> {
        if self.ledger.fiado(id).is_none() {
            return Ok(false);
        }
        tracing::warn!(fiado = id, "toggle_fiado_paid does not book or retract income");
        let fiados: Vec<Fiado> = self
            .ledger
            .fiados
            .iter()
            .map(|f| {
                if f.id == id {
                    Fiado {
                        is_paid: !f.is_paid,
                        ..f.clone()
                    }
                } else {
                    f.clone()
                }
            })
            .collect();
        db::write_slot(&self.conn, SLOT_FIADOS, &fiados)?;
        self.ledger.fiados = fiados;
        Ok(true)
    }

    pub fn remove_fiado(&mut self, id: &str) -> LedgerResult<bool> {
        let fiados: Vec<Fiado> = self.ledger.fiados.iter().filter(|f| f.id != id).cloned().collect();
        if fiados.len() == self.ledger.fiados.len() {
            return Ok(false);
        }
        db::write_slot(&self.conn, SLOT_FIADOS, &fiados)?;
        self.ledger.fiados = fiados;
        Ok(true)
    }

    pub fn reset_all_data(&mut self) -> LedgerResult<()> {
        let erased = db::clear_slots(&self.conn)?;
        tracing::info!(slots = erased, "all data erased");
        self.ledger = Self::load(&self.conn, self.clock.now())?;
        self.ensure_checkpoint()
    }
}
