// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::error::{Error, Result};
use crate::kv::keys;

/// Show the effective API endpoint, set the override, or clear it.
pub fn run(ctx: &Context, url: Option<String>, clear: bool) -> Result<()> {
    if clear {
        ctx.store.remove(keys::API_BASE_URL)?;
        println!("Endpoint override cleared, using {}", ctx.api_url());
        return Ok(());
    }

    match url {
        Some(url) => {
            let url = normalize_endpoint(&url)?;
            ctx.store.set(keys::API_BASE_URL, &url)?;
            println!("Endpoint set to {}", url);
        }
        None => println!("{}", ctx.api_url()),
    }
    Ok(())
}

/// Trim whitespace and trailing slashes, and require an http(s) scheme.
pub fn normalize_endpoint(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if has_host {
        Ok(trimmed.to_string())
    } else {
        Err(Error::InvalidEndpoint(url.to_string()))
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
