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

//! AWS S3 backend of the [`ObjectStore`] abstraction

use async_trait::async_trait;
use aws_sdk_s3::{Client, primitives::ByteStream};
use aws_config::{Region,meta::region::RegionProviderChain};
use tracing::debug;

use crate::store::{ObjectStore, OfiresStoreError, Result, normalize_key, normalize_prefix};

pub type S3Client = Client;

fn backend_error (e: impl std::fmt::Display)->OfiresStoreError {
    OfiresStoreError::BackendError( e.to_string())
}

/// split "bucket/path/to/object" into ("bucket", "path/to/object")
pub fn split_bucket_key (key: &str)->Result<(String,String)> {
    let key = normalize_key(key);
    match key.split_once('/') {
        Some((bucket,rest)) if !bucket.is_empty() => Ok( (bucket.to_string(), rest.to_string()) ),
        _ => Err( OfiresStoreError::InvalidKeyError(key))
    }
}

/// create S3 Client for given (or the default) region, using the default credentials provider chain
pub async fn create_s3_client (region: Option<String>) -> Client {
    let region_provider = RegionProviderChain::first_try( region.map(Region::new)).or_default_provider();
    let aws_config = aws_config::from_env().region(region_provider).load().await;
    Client::new(&aws_config)
}

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub async fn new (region: Option<String>)->Self {
        S3Store { client: create_s3_client(region).await }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn location (&self)->String { "s3:/".to_string() }

    async fn get (&self, key: &str)->Result<Vec<u8>> {
        let (bucket,obj_key) = split_bucket_key(key)?;
        let output = self.client.get_object().bucket(&bucket).key(&obj_key).send().await
            .map_err( |e| {
                if e.as_service_error().map( |se| se.is_no_such_key()).unwrap_or(false) {
                    OfiresStoreError::NotFoundError( key.to_string())
                } else {
                    backend_error(e)
                }
            })?;
        let data = output.body.collect().await.map_err(backend_error)?;
        Ok( data.into_bytes().to_vec() )
    }

    async fn put (&self, key: &str, data: Vec<u8>)->Result<()> {
        let (bucket,obj_key) = split_bucket_key(key)?;
        debug!("put s3://{bucket}/{obj_key} ({} bytes)", data.len());
        self.client.put_object().bucket(&bucket).key(&obj_key).body( ByteStream::from(data)).send().await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn list (&self, prefix: &str)->Result<Vec<String>> {
        let prefix = normalize_prefix(prefix);
        let (bucket, obj_prefix) = match prefix.split_once('/') {
            Some((b,p)) => (b.to_string(), p.to_string()),
            None => (prefix.clone(), String::new())
        };

        let mut keys: Vec<String> = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let mut req = self.client.list_objects_v2().bucket(&bucket).prefix(&obj_prefix);
            if let Some(t) = &token { req = req.continuation_token(t) }
            let resp = req.send().await.map_err(backend_error)?;

            for obj in resp.contents() {
                if let Some(k) = obj.key() { keys.push( format!("{bucket}/{k}")) }
            }

            token = resp.next_continuation_token().map( |t| t.to_string());
            if token.is_none() { break }
        }

        keys.sort();
        Ok(keys)
    }

    async fn remove (&self, key: &str)->Result<()> {
        let (bucket,obj_key) = split_bucket_key(key)?;
        self.client.delete_object().bucket(&bucket).key(&obj_key).send().await.map_err(backend_error)?;
        Ok(())
    }
}
