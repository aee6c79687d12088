// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh session token.
///
/// A random base-36 part followed by the current time in milliseconds,
/// also base-36. Not a secret; uniqueness is what matters.
pub fn generate_session_token() -> String {
    let random: u64 = rand::thread_rng().gen();
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let mut token = to_base36(random);
    token.push_str(&to_base36(millis));
    token
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
