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

//! slack web api and incoming webhook abstraction

use reqwest::Client;
use serde::{Serialize,Deserialize};
use serde_json::json;

use crate::net::{self, OfiresNetError};

pub type SlackResult<T> = Result<T,OfiresNetError>;

#[derive(Deserialize,Debug)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// send chat text message via the `chat.postMessage` web api
/// note - icon replaces avatar, but ony in the first of a sequence of messages from the same sender
pub async fn send_msg (client: &Client, token: &str, channel_id: &str, msg: &str, icon: Option<&str>) -> SlackResult<()> {
    let mut params: Vec<(&str,&str)> = Vec::new();
    params.push( ("channel", channel_id) );
    params.push( ("text", msg) );
    if let Some(icon_name) = icon { params.push( ("icon_emoji", icon_name) ); }

    let response = client.post("https://slack.com/api/chat.postMessage")
        .bearer_auth( token)
        .query( &params)
        .send()
        .await?;

    // the web api reports errors with a 200 status
    let resp: PostMessageResponse = net::from_json(response).await?;
    if resp.ok {
        Ok(())
    } else {
        Err( OfiresNetError::OpFailed( format!("slack postMessage failed: {}", resp.error.unwrap_or_default())))
    }
}

/// send chat text message to an incoming webhook URL (which already encodes workspace and channel)
pub async fn send_webhook_msg (client: &Client, webhook_url: &str, msg: &str) -> SlackResult<()> {
    net::post_json( client, webhook_url, &json!({ "text": msg })).await?;
    Ok(())
}
