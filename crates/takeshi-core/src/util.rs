//! Small shared helpers: randomness, timestamps, session credentials.

use rand::Rng;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::TakeshiError;

/// Uniform random integer in `min..=max`.
pub fn get_random_number(min: u32, max: u32) -> u32 {
    rand::thread_rng().gen_range(min..=max)
}

/// Random numeric file name, with an extension when one is given.
pub fn get_random_name(extension: Option<&str>) -> String {
    let name = get_random_number(0, 999_999);
    match extension {
        Some(ext) if !ext.is_empty() => format!("{name}.{ext}"),
        _ => name.to_string(),
    }
}

const DELAYS_MS: [u64; 3] = [1000, 2000, 3000];

/// Sleep one, two or three seconds, picked at random.
pub async fn random_delay() {
    let idx = get_random_number(0, (DELAYS_MS.len() - 1) as u32) as usize;
    tokio::time::sleep(Duration::from_millis(DELAYS_MS[idx])).await;
}

/// Whether `timestamp` (Unix seconds) lies at least `minimum_minutes` whole
/// minutes before now.
pub fn is_at_least_minutes_in_past(timestamp: i64, minimum_minutes: i64) -> bool {
    is_at_least_minutes_before(timestamp, chrono::Utc::now().timestamp(), minimum_minutes)
}

/// Same as [`is_at_least_minutes_in_past`] against an explicit `now`.
pub fn is_at_least_minutes_before(timestamp: i64, now: i64, minimum_minutes: i64) -> bool {
    now.saturating_sub(timestamp).div_euclid(60) >= minimum_minutes
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Creds {
    #[serde(default)]
    last_account_sync_timestamp: Option<i64>,
}

/// Path of the session credential file under the assets directory.
pub fn creds_path(assets_dir: &Path) -> std::path::PathBuf {
    assets_dir.join("auth").join("baileys").join("creds.json")
}

/// Read `lastAccountSyncTimestamp` from the session credential file.
pub fn last_creds_timestamp(assets_dir: &Path) -> Result<Option<i64>, TakeshiError> {
    let content = std::fs::read_to_string(creds_path(assets_dir))?;
    let creds: Creds = serde_json::from_str(&content)?;
    Ok(creds.last_account_sync_timestamp)
}
