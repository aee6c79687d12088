// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::memory_context;
use crate::kv::keys;

#[tokio::test]
async fn test_show_mode_defaults_to_local() {
    let ctx = memory_context();
    run(&ctx, None).await.unwrap();
    assert_eq!(OperatingMode::load(ctx.store.as_ref()), OperatingMode::Local);
}

#[tokio::test]
async fn test_switch_to_local_persists() {
    let ctx = memory_context();
    ctx.store.set(keys::MODE, "networked").unwrap();

    run(&ctx, Some(OperatingMode::Local)).await.unwrap();

    assert_eq!(
        ctx.store.get(keys::MODE).unwrap(),
        Some("local".to_string())
    );
}

#[tokio::test]
async fn test_switch_to_local_when_local_is_ok() {
    let ctx = memory_context();
    run(&ctx, Some(OperatingMode::Local)).await.unwrap();
    run(&ctx, Some(OperatingMode::Local)).await.unwrap();
    assert_eq!(OperatingMode::load(ctx.store.as_ref()), OperatingMode::Local);
}
