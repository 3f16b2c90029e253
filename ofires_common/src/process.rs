/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! running external tools

use std::fmt;
use tokio::process::Command;
use tracing::{debug,info};

use crate::define_error;

define_error!{ pub OfiresProcessError = 
    SpawnError(String, std::io::Error) : "failed to run '{0}': {1}",
    ExitError(String, String) : "command '{0}' failed: {1}"
}

pub type Result<T> = std::result::Result<T, OfiresProcessError>;

/// a program with its argument list. We keep arguments separate so that nothing has to go through a shell
#[derive(Debug,Clone,PartialEq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new (program: impl ToString)->Self {
        CommandLine { program: program.to_string(), args: Vec::new() }
    }

    pub fn arg (mut self, arg: impl ToString)->Self {
        self.args.push( arg.to_string());
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}", self.program)?;
        for a in &self.args { write!( f, " {}", a)?; }
        Ok(())
    }
}

/// run command to completion and return its stdout. Non-zero exit status is reported as `ExitError`
/// that includes the stderr output
pub async fn run_command (cmd: &CommandLine)->Result<String> {
    info!("running: {cmd}");
    let output = Command::new( &cmd.program)
        .args( &cmd.args)
        .output()
        .await
        .map_err( |e| OfiresProcessError::SpawnError( cmd.to_string(), e))?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy( &output.stdout).to_string();
        debug!("{} output: {}", cmd.program, stdout);
        Ok(stdout)
    } else {
        let stderr = String::from_utf8_lossy( &output.stderr);
        Err( OfiresProcessError::ExitError( cmd.to_string(), format!("{} {}", output.status, stderr.trim())))
    }
}
