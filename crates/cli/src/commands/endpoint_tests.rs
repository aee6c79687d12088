// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::memory_context;
use yare::parameterized;

#[parameterized(
    plain = { "http://10.0.0.2:3001/api", "http://10.0.0.2:3001/api" },
    trailing_slash = { "http://10.0.0.2:3001/api/", "http://10.0.0.2:3001/api" },
    whitespace = { "  https://pos.example.com/api ", "https://pos.example.com/api" },
)]
fn test_normalize_endpoint_accepts(input: &str, expected: &str) {
    assert_eq!(normalize_endpoint(input).unwrap(), expected);
}

#[parameterized(
    no_scheme = { "10.0.0.2:3001/api" },
    websocket = { "ws://10.0.0.2:3001/ws" },
    empty_host = { "http://" },
    blank = { "   " },
)]
fn test_normalize_endpoint_rejects(input: &str) {
    assert!(matches!(
        normalize_endpoint(input),
        Err(Error::InvalidEndpoint(_))
    ));
}

#[test]
fn test_set_then_clear_override() {
    let ctx = memory_context();

    run(&ctx, Some("http://192.168.1.20:3001/api/".into()), false).unwrap();
    assert_eq!(ctx.api_url(), "http://192.168.1.20:3001/api");

    run(&ctx, None, true).unwrap();
    assert_eq!(ctx.api_url(), "http://localhost:3001/api");
    assert_eq!(ctx.store.get(keys::API_BASE_URL).unwrap(), None);
}

#[test]
fn test_invalid_endpoint_is_not_saved() {
    let ctx = memory_context();
    assert!(run(&ctx, Some("localhost".into()), false).is_err());
    assert_eq!(ctx.store.get(keys::API_BASE_URL).unwrap(), None);
}
