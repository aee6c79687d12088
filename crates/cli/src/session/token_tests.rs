// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;
use yare::parameterized;

#[parameterized(
    zero = { 0, "0" },
    nine = { 9, "9" },
    ten = { 10, "a" },
    thirty_five = { 35, "z" },
    thirty_six = { 36, "10" },
    large = { 1_700_000_000_000, "loyw3v28" },
)]
fn test_to_base36(n: u64, expected: &str) {
    assert_eq!(to_base36(n), expected);
}

#[test]
fn test_token_is_lowercase_base36() {
    let token = generate_session_token();
    assert!(token.len() > 8);
    assert!(token
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn test_tokens_are_unique() {
    let tokens: HashSet<String> = (0..200).map(|_| generate_session_token()).collect();
    assert_eq!(tokens.len(), 200);
}
