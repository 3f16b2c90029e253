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
#![allow(unused)]

use ofires_common::process::{CommandLine, run_command, OfiresProcessError};

#[test]
fn test_command_line() {
    let cmd = CommandLine::new("mb-util").arg("--image_format=pbf").arg("in.mbtiles").arg("out");
    assert_eq!( cmd.to_string(), "mb-util --image_format=pbf in.mbtiles out");
}

#[tokio::test]
async fn test_run_command() {
    let out = run_command( &CommandLine::new("sh").arg("-c").arg("echo tiles")).await.unwrap();
    assert_eq!( out.trim(), "tiles");

    match run_command( &CommandLine::new("sh").arg("-c").arg("echo failed >&2; exit 3")).await {
        Err(OfiresProcessError::ExitError(cmd,msg)) => { println!("{cmd}: {msg}"); assert!( msg.contains("failed")) }
        other => panic!("unexpected result {other:?}")
    }

    match run_command( &CommandLine::new("no-such-program-ofires")).await {
        Err(OfiresProcessError::SpawnError(..)) => {}
        other => panic!("unexpected result {other:?}")
    }
}
