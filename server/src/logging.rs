/*
 * Copyright (c) 2021 gematik GmbH
 * 
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 * 
 *    http://www.apache.org/licenses/LICENSE-2.0
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::path::Path;

use log::{warn, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Logger, Root},
    file::Deserializers,
    init_config, load_config_file,
};

use crate::error::Error;

pub const TARGET: &str = "erx_auth_server";

/// Initializes log4rs from the passed YAML file.
///
/// If the file can not be loaded, a console logger at level `Info` is used and
/// a warning is emitted once the logger is up.
pub fn init_logger(path: &Path) -> Result<(), Error> {
    let loaded = load_config_file(path, Deserializers::default());
    let fallback = loaded.is_err();
    let config = match loaded {
        Ok(config) => config,
        Err(_) => create_default_config()?,
    };

    init_config(config)?;

    if fallback {
        warn!(target: TARGET, "Unable to load log config from {}, logging to console", path.display());
    }

    Ok(())
}

fn create_default_config() -> Result<Config, Error> {
    let stdout = ConsoleAppender::builder().build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .logger(Logger::builder().build("access_log", LevelFilter::Info))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;

    Ok(config)
}
