// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use familyspend::commands::{self, Ctx};
use familyspend::settings::{Backend, Settings};
use familyspend::{cli, logging, store, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut settings = Settings::load(matches.get_one::<String>("config").map(Path::new))
        .context("Could not load settings")?;
    match matches.get_one::<String>("backend").map(String::as_str) {
        Some("workbook") => settings.storage.backend = Backend::Workbook,
        Some("sqlite") => settings.storage.backend = Backend::Sqlite,
        _ => {}
    }
    if let Some(data) = matches.get_one::<String>("data") {
        settings.storage.path = Some(PathBuf::from(data));
    }
    logging::init(&settings.logging)?;

    let store = store::open(&settings)?;
    let ctx = Ctx::new(store.as_ref(), &settings.defaults, utils::today());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Storage ready at {}", store.location());
        }
        Some(("profile", sub)) => commands::profiles::handle(&ctx, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ctx, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&ctx, sub)?,
        Some(("card", sub)) => commands::cards::handle(&ctx, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&ctx, sub)?,
        Some(("dashboard", sub)) => commands::reports::dashboard(&ctx, sub)?,
        Some(("family", sub)) => commands::reports::family(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
