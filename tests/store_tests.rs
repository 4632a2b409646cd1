// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use hora_do_frango::db::{self, SLOT_BANKS, SLOT_FIADOS, SLOT_LAST_CHECK, SLOT_TRANSACTIONS};
use hora_do_frango::error::LedgerError;
use hora_do_frango::models::{NewFiado, NewTransaction, TransactionType};
use hora_do_frango::store::{Clock, Store};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn d(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn clock() -> Clock {
    Clock::Fixed(at("2026-10-14 09:00"))
}

fn memory_store() -> Store {
    Store::open_with_clock(Connection::open_in_memory().unwrap(), clock()).unwrap()
}

fn sale(amount: &str) -> NewTransaction {
    NewTransaction {
        date: day("2026-10-14"),
        description: "Frango inteiro".into(),
        amount: d(amount),
        kind: TransactionType::Income,
        bank_id: "3".into(),
        category_id: "c1".into(),
        is_paid: true,
        quantity: Some(1),
    }
}

#[test]
fn fresh_store_is_seeded() {
    let store = memory_store();
    let ledger = store.ledger();
    assert_eq!(ledger.banks.len(), 7);
    assert_eq!(ledger.banks[1].name, "Nubank");
    assert_eq!(ledger.categories.len(), 8);
    assert_eq!(ledger.categories[0].id, "c1");
    assert!(ledger.transactions.is_empty());
    assert!(ledger.fiados.is_empty());
    assert!(ledger.history.is_empty());
    assert_eq!(ledger.last_check, at("2026-10-14 09:00"));

    // the checkpoint is persisted right away
    let raw = db::read_raw(store.connection(), SLOT_LAST_CHECK).unwrap();
    assert!(raw.unwrap().contains("2026-10-14T09:00:00"));
}

#[test]
fn collections_round_trip_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hdf.sqlite");

    let snapshot = {
        let conn = db::open_or_init(Some(&path)).unwrap();
        let mut store = Store::open_with_clock(conn, clock()).unwrap();
        let bank = store.add_bank("Inter", "#FF7A00", d("12.50")).unwrap();
        store.add_category("Frango Assado").unwrap();
        let mut t = sale("35.00");
        t.bank_id = bank.id.clone();
        store.add_transaction(t).unwrap();
        store
            .add_fiado(NewFiado {
                customer_name: "Dona Maria".into(),
                amount: d("70"),
                date: day("2026-10-01"),
                notes: Some("paga sexta".into()),
            })
            .unwrap();
        store.ledger().clone()
    };

    let conn = db::open_or_init(Some(&path)).unwrap();
    let reopened = Store::open_with_clock(conn, clock()).unwrap();
    assert_eq!(reopened.ledger(), &snapshot);
}

#[test]
fn slots_carry_a_version_tag() {
    let mut store = memory_store();
    store.add_transaction(sale("10")).unwrap();
    let raw = db::read_raw(store.connection(), SLOT_TRANSACTIONS)
        .unwrap()
        .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["data"][0]["type"], "INCOME");
    assert_eq!(doc["data"][0]["bankId"], "3");
}

#[test]
fn malformed_or_legacy_slots_do_not_fail_the_load() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO slots(key, value) VALUES(?1, ?2)",
        params![SLOT_BANKS, "{not json"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO slots(key, value) VALUES(?1, ?2)",
        params![
            SLOT_FIADOS,
            r#"[{"id":"f1","customerName":"Zé","amount":"15.5","date":"2026-10-01","isPaid":false,"extra":"ignored"}]"#
        ],
    )
    .unwrap();

    let store = Store::open_with_clock(conn, clock()).unwrap();
    assert_eq!(store.ledger().banks.len(), 7);
    assert_eq!(store.ledger().fiados.len(), 1);
    assert_eq!(store.ledger().fiados[0].amount, d("15.5"));
    assert_eq!(store.ledger().fiados[0].notes, None);
}

#[test]
fn amounts_must_be_positive() {
    let mut store = memory_store();
    let err = store.add_transaction(sale("0")).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    let err = store.add_transaction(sale("-5")).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert!(store.ledger().transactions.is_empty());

    let err = store
        .add_fiado(NewFiado {
            customer_name: "  ".into(),
            amount: d("5"),
            date: day("2026-10-01"),
            notes: None,
        })
        .unwrap_err();
    assert!(matches!(err, LedgerError::EmptyName("customer")));
}

#[test]
fn new_ids_are_unique() {
    let mut store = memory_store();
    let a = store.add_transaction(sale("1")).unwrap();
    let b = store.add_transaction(sale("1")).unwrap();
    assert_ne!(a.id, b.id);
    let c1 = store.add_category("Bebidas").unwrap();
    let c2 = store.add_category("Bebidas").unwrap();
    assert_ne!(c1.id, c2.id);
}

#[test]
fn removals_report_whether_something_went() {
    let mut store = memory_store();
    let t = store.add_transaction(sale("9")).unwrap();
    assert!(store.remove_transaction(&t.id).unwrap());
    assert!(!store.remove_transaction(&t.id).unwrap());
    assert!(store.remove_bank("7").unwrap());
    assert!(store.ledger().bank("7").is_none());
    assert!(store.remove_category("c8").unwrap());
    assert!(!store.remove_category("c8").unwrap());
}

#[test]
fn reset_restores_defaults_and_empties_everything_else() {
    let mut store = memory_store();
    store.add_transaction(sale("9")).unwrap();
    store.add_bank("Inter", "#000", Decimal::ZERO).unwrap();
    store.remove_category("c1").unwrap();
    store
        .add_fiado(NewFiado {
            customer_name: "Zé".into(),
            amount: d("5"),
            date: day("2026-10-01"),
            notes: None,
        })
        .unwrap();

    store.reset_all_data().unwrap();
    let ledger = store.ledger();
    assert!(ledger.transactions.is_empty());
    assert!(ledger.fiados.is_empty());
    assert_eq!(ledger.banks.len(), 7);
    assert_eq!(ledger.categories.len(), 8);

    let count: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM slots", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1, "only the fresh checkpoint remains");
}
