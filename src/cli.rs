// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("period")
            .long("period")
            .default_value("today")
            .value_parser(["today", "yesterday", "week", "month"])
            .help("Named window relative to today"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .requires("to")
            .help("Custom window start, YYYY-MM-DD (overrides --period)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .requires("from")
            .help("Custom window end, YYYY-MM-DD, inclusive"),
    )
}

pub fn build_cli() -> Command {
    Command::new("hdf")
        .about("Hora do Frango: cash book, fiados and purchase simulator")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Database file (overrides HDF_DB_PATH)"),
        )
        .subcommand(Command::new("init").about("Create the database and seed defaults"))
        .subcommand(
            Command::new("bank")
                .about("Manage banks")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color").default_value("#3b82f6"))
                        .arg(
                            Arg::new("initial")
                                .long("initial")
                                .default_value("0")
                                .help("Opening balance"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true)))
                .subcommand(json_flags(
                    Command::new("balances").about("Derived balance per bank"),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true)))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("bank").long("bank").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("qty")
                                .long("qty")
                                .value_parser(value_parser!(u32))
                                .help("Units sold or bought"),
                        )
                        .arg(
                            Arg::new("unpaid")
                                .long("unpaid")
                                .action(ArgAction::SetTrue)
                                .help("Pending; does not move bank balances"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("bank").long("bank"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("fiado")
                .about("Customer credit")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("customer").long("customer").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("pending")
                            .long("pending")
                            .action(ArgAction::SetTrue)
                            .help("Only unpaid entries"),
                    ),
                ))
                .subcommand(
                    Command::new("pay")
                        .about("Settle a fiado into a bank")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("bank").long("bank").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(json_flags(period_args(
            Command::new("dashboard")
                .about("Key figures for a window and a month")
                .after_help(
                    "Unit figures count transactions whose category name contains \
                     HDF_PRODUCT_KEYWORD (default 'frango'). No seeded category matches it, \
                     so add one first, e.g. `hdf category add --name Frango`.",
                )
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("YYYY-MM for the monthly figures, defaults to this month"),
                ),
        )))
        .subcommand(
            Command::new("report")
                .about("Breakdowns and history")
                .subcommand(json_flags(period_args(
                    Command::new("categories").arg(
                        Arg::new("by-type")
                            .long("by-type")
                            .action(ArgAction::SetTrue)
                            .help("Keep income and expense apart per category"),
                    ),
                )))
                .subcommand(json_flags(period_args(
                    Command::new("series").about("Income and expense per day"),
                )))
                .subcommand(json_flags(
                    Command::new("history").about("Closed months"),
                )),
        )
        .subcommand(json_flags(
            Command::new("forecast")
                .about("Purchase and break-even simulator")
                .arg(Arg::new("lot-cost").long("lot-cost").required(true))
                .arg(
                    Arg::new("units-per-lot")
                        .long("units-per-lot")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("price").long("price").required(true))
                .arg(
                    Arg::new("target-qty")
                        .long("target-qty")
                        .default_value("0")
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("target-revenue").long("target-revenue"))
                .arg(Arg::new("target-profit").long("target-profit"))
                .arg(
                    Arg::new("with-overhead")
                        .long("with-overhead")
                        .action(ArgAction::SetTrue)
                        .help("Spread this month's expenses over this month's units"),
                ),
        ))
        .subcommand(Command::new("alerts").about("Overdue fiados and dangling references"))
        .subcommand(
            Command::new("reset")
                .about("Erase everything and restore defaults")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm; this cannot be undone"),
                ),
        )
}
