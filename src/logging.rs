// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::settings::Logging;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Install the global logger. A log4rs file in the settings wins over the
/// built-in stderr logger. Stdout stays reserved for command output.
pub fn init(cfg: &Logging) -> Result<()> {
    if let Some(path) = &cfg.config_file {
        log4rs::init_file(path, Default::default())
            .with_context(|| format!("Could not initialize logging from {}", path.display()))?;
        return Ok(());
    }

    let level = LevelFilter::from_str(&cfg.level)
        .with_context(|| format!("Invalid log level '{}'", cfg.level))?;
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .context("Invalid logging configuration")?;
    log4rs::init_config(config).context("Could not initialize logging")?;
    Ok(())
}
