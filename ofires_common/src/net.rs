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

//! common utility functions for HTTP GET/POST operations

use std::time::Duration;
use reqwest::{header::{HeaderMap,HeaderValue,CONTENT_TYPE}, Client, StatusCode, Response};
use serde::{de::DeserializeOwned,Serialize};
use tracing::{debug,warn};

use crate::define_error;

define_error!{ pub OfiresNetError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, OfiresNetError>;

fn check_status (url: &str, response: Response)->Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err( OfiresNetError::NotFoundError(url.to_string())),
        other => Err( OfiresNetError::OpFailed(format!("response status {other:?} for {url}")))
    }
}

/// HTTP GET with optional query parameters. Any non-OK response status is an error
pub async fn get_response (client: &Client, url: &str, query: &[(&str,String)])->Result<Response> {
    debug!("GET {url} {query:?}");
    let response = client.get(url).query(query).send().await?;
    check_status( url, response)
}

pub async fn get_text (client: &Client, url: &str, query: &[(&str,String)])->Result<String> {
    let response = get_response( client, url, query).await?;
    Ok( response.text().await? )
}

pub async fn get_json<T> (client: &Client, url: &str, query: &[(&str,String)])->Result<T> where T: DeserializeOwned {
    let response = get_response( client, url, query).await?;
    from_json(response).await
}

/// GET JSON with a fixed number of retries and a fixed delay between attempts
pub async fn get_json_with_retry<T> (client: &Client, url: &str, query: &[(&str,String)], max_retries: usize, delay: Duration)->Result<T> 
    where T: DeserializeOwned
{
    let mut attempt = 0;
    loop {
        match get_json( client, url, query).await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                warn!("request to {url} failed ({e}), retry {attempt}/{max_retries} in {delay:?}");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e)
        }
    }
}

pub async fn post_json<T> (client: &Client, url: &str, data: &T) -> Result<Response> where T: Serialize {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let response = client.post( url)
        .headers( headers)
        .json( data)
        .send().await?;

    check_status( url, response)
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| OfiresNetError::ParseError(e.to_string()))
}
