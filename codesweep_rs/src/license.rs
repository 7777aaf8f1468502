//! License activation and premium gating.
//!
//! Talks to the license API for activation and re-verification, with a
//! bounded offline grace window so a flaky connection does not lock paying
//! users out. State lives next to the analysis cache under `~/.codesweep`.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store;

const LICENSE_FILE: &str = "license.json";
const DEFAULT_API_URL: &str = "https://api.codesweep.dev/v1/verify";
const API_URL_ENV: &str = "CODESWEEP_API_URL";
/// Offline grace period after the last successful verification.
const OFFLINE_GRACE_DAYS: i64 = 7;

const ACTIVATE_TIMEOUT: Duration = Duration::from_secs(10);
const REFRESH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub key: String,
    pub activated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<DateTime<Utc>>,
    pub plan: String,
    pub last_verified: DateTime<Utc>,
}

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
    #[serde(default)]
    expire_date: Option<DateTime<Utc>>,
    #[serde(default)]
    plan: Option<String>,
}

/// Snapshot of the current tier for `csw status`.
#[derive(Clone, Debug, Serialize)]
pub struct LicenseStatus {
    pub is_premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<DateTime<Utc>>,
    pub plan: String,
}

fn api_url() -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

fn license_path() -> Result<PathBuf> {
    Ok(store::state_dir()?.join(LICENSE_FILE))
}

/// The stored license record, if any. Unreadable or malformed state is
/// treated as no license.
pub fn load_license() -> Option<LicenseRecord> {
    let path = license_path().ok()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn save_license(record: &LicenseRecord) -> Result<()> {
    let dir = store::state_dir()?;
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let json = serde_json::to_string_pretty(record).context("Failed to serialize license")?;
    let path = dir.join(LICENSE_FILE);
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))
}

async fn verify_key(key: &str, timeout: Duration) -> Result<VerifyResponse> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let response = client
        .post(api_url())
        .json(&serde_json::json!({ "key": key }))
        .send()
        .await
        .context("Failed to reach the license server")?;
    response
        .json::<VerifyResponse>()
        .await
        .context("Failed to parse the license server response")
}

/// Run the async verification on a runtime created for the call.
fn verify_key_blocking(key: &str, timeout: Duration) -> Result<VerifyResponse> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(verify_key(key, timeout))
}

/// Activate a license key against the license server and store the record.
pub fn activate(key: &str) -> Result<LicenseRecord> {
    let response = verify_key_blocking(key, ACTIVATE_TIMEOUT)?;
    if !response.valid {
        anyhow::bail!("License key rejected by the license server");
    }

    let now = Utc::now();
    let record = LicenseRecord {
        key: key.to_string(),
        activated_at: now,
        expire_date: response.expire_date,
        plan: response.plan.unwrap_or_else(|| "pro".to_string()),
        last_verified: now,
    };
    save_license(&record)?;
    Ok(record)
}

/// Whether the caller is entitled to premium behavior. Tries an online
/// re-verification first and falls back to the offline window when the
/// server is unreachable.
pub fn is_premium() -> bool {
    let Some(mut record) = load_license() else {
        return false;
    };

    match verify_key_blocking(&record.key, REFRESH_TIMEOUT) {
        Ok(response) => {
            if !response.valid {
                return false;
            }
            record.last_verified = Utc::now();
            if let Some(expire) = response.expire_date {
                record.expire_date = Some(expire);
            }
            if let Err(err) = save_license(&record) {
                eprintln!("[csw][warn] Failed to refresh the license record: {}", err);
            }
            true
        }
        Err(_) => offline_is_valid(&record, Utc::now()),
    }
}

fn offline_is_valid(record: &LicenseRecord, now: DateTime<Utc>) -> bool {
    let recently_verified = now.signed_duration_since(record.last_verified)
        <= chrono::Duration::days(OFFLINE_GRACE_DAYS);
    let not_expired = record.expire_date.map(|expire| expire > now).unwrap_or(true);
    recently_verified && not_expired
}

/// Keep the first characters of the key visible, hide the rest.
fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    format!("{}...", prefix)
}

pub fn status() -> LicenseStatus {
    match load_license() {
        Some(record) => LicenseStatus {
            is_premium: is_premium(),
            license_key: Some(mask_key(&record.key)),
            expire_date: record.expire_date,
            plan: record.plan,
        },
        None => LicenseStatus {
            is_premium: false,
            license_key: None,
            expire_date: None,
            plan: "free".to_string(),
        },
    }
}
