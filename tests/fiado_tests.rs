// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use hora_do_frango::aggregate::{bank_balance, total_overdue, total_pending};
use hora_do_frango::error::LedgerError;
use hora_do_frango::models::{NewFiado, SALE_CATEGORY_ID, TransactionType};
use hora_do_frango::store::{Clock, Store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> Store {
    let now = NaiveDateTime::parse_from_str("2026-10-18 12:00", "%Y-%m-%d %H:%M").unwrap();
    let mut store =
        Store::open_with_clock(Connection::open_in_memory().unwrap(), Clock::Fixed(now)).unwrap();
    store.add_bank("b1", "#111", d("100")).unwrap();
    store
}

fn owe(store: &mut Store, name: &str, amount: &str, date: &str) -> String {
    store
        .add_fiado(NewFiado {
            customer_name: name.into(),
            amount: d(amount),
            date: day(date),
            notes: None,
        })
        .unwrap()
        .id
}

fn bank_b1(store: &Store) -> Decimal {
    let ledger = store.ledger();
    let bank = ledger.banks.iter().find(|b| b.name == "b1").unwrap();
    bank_balance(bank, &ledger.transactions)
}

#[test]
fn paying_an_overdue_fiado_moves_it_into_the_bank() {
    let mut store = setup();
    let bank_id = store.ledger().banks.last().unwrap().id.clone();
    let id = owe(&mut store, "Seu João", "200", "2026-09-08");

    let today = store.today();
    assert_eq!(total_overdue(&store.ledger().fiados, today), d("200"));
    assert_eq!(bank_b1(&store), d("100"));

    let paid = store.pay_fiado(&id, &bank_id).unwrap().expect("known fiado");
    assert!(paid.fiado.is_paid);
    assert_eq!(paid.transaction.kind, TransactionType::Income);
    assert_eq!(paid.transaction.amount, d("200"));
    assert_eq!(paid.transaction.bank_id, bank_id);
    assert_eq!(paid.transaction.category_id, SALE_CATEGORY_ID);
    assert_eq!(paid.transaction.date, day("2026-10-18"));
    assert!(paid.transaction.description.contains("Seu João"));
    assert!(paid.transaction.is_paid);

    let ledger = store.ledger();
    assert!(ledger.fiado(&id).unwrap().is_paid);
    assert_eq!(ledger.transactions.len(), 1);
    assert_eq!(total_overdue(&ledger.fiados, today), Decimal::ZERO);
    assert_eq!(total_pending(&ledger.fiados), Decimal::ZERO);
    assert_eq!(bank_b1(&store), d("300"));
}

#[test]
fn both_halves_of_a_payment_are_persisted_together() {
    let mut store = setup();
    let id = owe(&mut store, "Ana", "45", "2026-10-10");
    store.pay_fiado(&id, "3").unwrap();
    let clock = store.clock();

    let reopened = Store::open_with_clock(store.into_connection(), clock).unwrap();
    let ledger = reopened.ledger();
    assert!(ledger.fiado(&id).unwrap().is_paid);
    assert_eq!(ledger.transactions.len(), 1);
    assert_eq!(ledger.transactions[0].amount, d("45"));
}

#[test]
fn unknown_fiado_is_a_silent_no_op() {
    let mut store = setup();
    owe(&mut store, "Ana", "45", "2026-10-10");
    let before = store.ledger().clone();
    assert!(store.pay_fiado("nope", "3").unwrap().is_none());
    assert_eq!(store.ledger(), &before);
}

#[test]
fn paid_is_terminal() {
    let mut store = setup();
    let id = owe(&mut store, "Ana", "45", "2026-10-10");
    store.pay_fiado(&id, "3").unwrap();
    let err = store.pay_fiado(&id, "3").unwrap_err();
    assert!(matches!(err, LedgerError::FiadoAlreadyPaid(ref f) if f == &id));
    assert_eq!(store.ledger().transactions.len(), 1);
}

#[test]
#[allow(deprecated)]
fn toggle_flips_the_flag_but_never_touches_income() {
    let mut store = setup();
    let id = owe(&mut store, "Ana", "45", "2026-10-10");
    store.pay_fiado(&id, "3").unwrap();

    assert!(store.toggle_fiado_paid(&id).unwrap());
    assert!(!store.ledger().fiado(&id).unwrap().is_paid);
    // the income booked by the payment is still there
    assert_eq!(store.ledger().transactions.len(), 1);
    assert!(!store.toggle_fiado_paid("nope").unwrap());
}

#[test]
fn removing_a_fiado_keeps_its_income() {
    let mut store = setup();
    let paid = owe(&mut store, "Ana", "45", "2026-10-10");
    let open = owe(&mut store, "Rui", "12", "2026-10-11");
    store.pay_fiado(&paid, "3").unwrap();

    assert!(store.remove_fiado(&paid).unwrap());
    assert!(store.remove_fiado(&open).unwrap());
    assert!(!store.remove_fiado(&open).unwrap());
    assert!(store.ledger().fiados.is_empty());
    assert_eq!(store.ledger().transactions.len(), 1);
}
