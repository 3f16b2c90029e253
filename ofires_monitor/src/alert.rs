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

//! alert delivery for the monitoring workflows

use std::env;
use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::{info,warn};

use ofires_common::slack;
use crate::errors::{Result, alert_error};

pub const SLACK_WEBHOOK_ENV: &'static str = "SLACK_WEBHOOK_URL";
pub const SLACK_TOKEN_ENV: &'static str = "SLACK_TOKEN";

#[derive(Deserialize,Serialize,Debug,Clone,Default)]
pub struct AlertConfig {
    /// print alerts to stdout
    #[serde(default)]
    pub console: bool,
    /// incoming webhook (falls back to the SLACK_WEBHOOK_URL env var)
    #[serde(default)]
    pub slack_webhook_url: Option<String>,
    /// web api token (falls back to the SLACK_TOKEN env var). Only used if a channel is set
    #[serde(default)]
    pub slack_token: Option<String>,
    #[serde(default)]
    pub slack_channel: Option<String>,
    #[serde(default)]
    pub slack_icon: Option<String>,
}

/// abstract interface for alert channels. We use `async_trait` so that messengers can be kept as trait objects
#[async_trait]
pub trait AlertMessenger: Send + Sync {
    fn name (&self)->&str;

    async fn send_alert (&self, msg: &str)->Result<()>;
}

pub struct ConsoleAlertMessenger {}

#[async_trait]
impl AlertMessenger for ConsoleAlertMessenger {
    fn name (&self)->&str { "console" }

    async fn send_alert (&self, msg: &str)->Result<()> {
        println!("{} {}", Local::now().format("%Y-%m-%d %H:%M:%S"), msg);
        Ok(())
    }
}

pub struct SlackWebhookMessenger {
    client: Client,
    url: String,
}

impl SlackWebhookMessenger {
    pub fn new (client: Client, url: impl ToString)->Self { SlackWebhookMessenger { client, url: url.to_string() } }
}

#[async_trait]
impl AlertMessenger for SlackWebhookMessenger {
    fn name (&self)->&str { "slack-webhook" }

    async fn send_alert (&self, msg: &str)->Result<()> {
        slack::send_webhook_msg( &self.client, &self.url, msg).await?;
        Ok(())
    }
}

pub struct SlackChannelMessenger {
    client: Client,
    token: String,
    channel_id: String,
    icon: Option<String>,
}

impl SlackChannelMessenger {
    pub fn new (client: Client, token: impl ToString, channel_id: impl ToString, icon: Option<String>)->Self {
        SlackChannelMessenger { client, token: token.to_string(), channel_id: channel_id.to_string(), icon }
    }
}

#[async_trait]
impl AlertMessenger for SlackChannelMessenger {
    fn name (&self)->&str { "slack-channel" }

    async fn send_alert (&self, msg: &str)->Result<()> {
        slack::send_msg( &self.client, &self.token, &self.channel_id, msg, self.icon.as_deref()).await?;
        Ok(())
    }
}

fn secret (value: &Option<String>, env_var: &str)->Option<String> {
    value.clone().filter( |s| !s.is_empty()).or_else( || env::var(env_var).ok().filter( |s| !s.is_empty()))
}

/// all messengers that are configured (or have their secrets set in the environment)
pub fn create_messengers (config: &AlertConfig, client: &Client)->Vec<Box<dyn AlertMessenger>> {
    let mut messengers: Vec<Box<dyn AlertMessenger>> = Vec::new();

    if config.console {
        messengers.push( Box::new( ConsoleAlertMessenger{}));
    }
    if let Some(url) = secret( &config.slack_webhook_url, SLACK_WEBHOOK_ENV) {
        messengers.push( Box::new( SlackWebhookMessenger::new( client.clone(), url)));
    }
    if let Some(channel) = &config.slack_channel {
        match secret( &config.slack_token, SLACK_TOKEN_ENV) {
            Some(token) => messengers.push( Box::new( SlackChannelMessenger::new( client.clone(), token, channel, config.slack_icon.clone()))),
            None => warn!("slack channel {} configured without token, ignored", channel)
        }
    }

    if messengers.is_empty() { warn!("no alert messengers configured") }
    messengers
}

/// send each message through each messenger. All deliveries are attempted, the result is an error if any of them failed
pub async fn send_alerts (messengers: &[Box<dyn AlertMessenger>], msgs: &[String])->Result<()> {
    let mut n_failed = 0;
    for msg in msgs {
        for m in messengers {
            if let Err(e) = m.send_alert( msg).await {
                warn!("{} failed to send alert: {}", m.name(), e);
                n_failed += 1;
            }
        }
    }

    if n_failed > 0 {
        Err( alert_error( format!("{n_failed} alert deliveries failed")))
    } else {
        info!("sent {} alerts to {} messengers", msgs.len(), messengers.len());
        Ok(())
    }
}
