// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.


mod args;
mod invoke;
mod local;

use anyhow::Result;
use clap::{crate_version, Command};

fn app() -> Command<'static> {
    Command::new("salary-filter")
        .version(crate_version!())
        .about("Command line front-end for the salary filter")
        .author("UMD Database Group")
        .args(args::get_args())
        .subcommand(local::command_args())
        .subcommand(invoke::command_args())
}

#[tokio::main]
pub async fn main() -> Result<()> {
    let matches = app().get_matches();

    match matches.subcommand() {
        Some(("filter", sub)) => {
            args::get_logging(&matches, sub)?.init();
            local::command(sub).await
        }
        Some(("invoke", sub)) => {
            args::get_logging(&matches, sub)?.init();
            invoke::command(sub).await
        }
        _ => {
            app().print_help()?;
            Ok(())
        }
    }
}
