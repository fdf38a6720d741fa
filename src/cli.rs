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
            .help("Print as JSON lines"),
    )
}

fn profile_arg(required: bool) -> Arg {
    Arg::new("profile")
        .long("profile")
        .short('p')
        .required(required)
        .help("Profile id or name")
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .help("week | month | year (anything else: trailing 30 days / 365 days)")
}

fn card_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("name")
            .long("name")
            .required(required)
            .help("Card name"),
    )
    .arg(
        Arg::new("limit")
            .long("limit")
            .required(required)
            .help("Credit limit"),
    )
    .arg(
        Arg::new("billing-day")
            .long("billing-day")
            .required(required)
            .value_parser(value_parser!(u32))
            .help("Day of month the billing cycle starts (1-31)"),
    )
    .arg(
        Arg::new("last-four")
            .long("last-four")
            .help("Last four digits of the card number"),
    )
    .arg(
        Arg::new("color")
            .long("color")
            .help("Display color as #RRGGBB (default #4A90E2)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("familyspend")
        .about("Household expense tracking with per-profile dashboards and card billing cycles")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Settings file (TOML)"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .global(true)
                .value_parser(["sqlite", "workbook"])
                .help("Storage backend"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .help("SQLite file or workbook directory"),
        )
        .subcommand(Command::new("init").about("Create storage and seed profiles and categories"))
        .subcommand(
            Command::new("profile")
                .about("Household members")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("category")
                .about("Spending categories")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("expense")
                .about("Record, list and delete expenses")
                .subcommand(
                    Command::new("add")
                        .arg(profile_arg(false))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .required(true)
                                .help("Category id or name"),
                        )
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .short('d')
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("note").long("note").short('n'))
                        .arg(
                            Arg::new("card")
                                .long("card")
                                .help("Card id; omit for cash/UPI"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(profile_arg(false))
                        .arg(Arg::new("from").long("from").help("Start date, inclusive"))
                        .arg(Arg::new("to").long("to").help("End date, inclusive"))
                        .arg(Arg::new("card").long("card").help("Card id"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("card")
                .about("Credit cards and their billing cycles")
                .subcommand(card_fields(
                    Command::new("add").arg(profile_arg(false)),
                    true,
                ))
                .subcommand(json_flags(Command::new("list").arg(profile_arg(false))))
                .subcommand(card_fields(
                    Command::new("update").arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Current billing cycle, utilization and recent spend")
                        .arg(Arg::new("id").required(true)),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Spending budgets")
                .subcommand(
                    Command::new("set")
                        .arg(profile_arg(false))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .help("Category id or name; omit for all categories"),
                        )
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .required(true)
                                .help("Budget period label, e.g. monthly"),
                        ),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Spending summary for one profile")
                .arg(profile_arg(false))
                .arg(period_arg()),
        ))
        .subcommand(json_flags(
            Command::new("family")
                .about("Spending summary across the household")
                .arg(period_arg()),
        ))
        .subcommand(
            Command::new("export").subcommand(
                Command::new("expenses")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").short('o').required(true))
                    .arg(profile_arg(false))
                    .arg(Arg::new("from").long("from"))
                    .arg(Arg::new("to").long("to")),
            ),
        )
}
