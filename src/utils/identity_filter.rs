use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures::StreamExt;
use once_cell::sync::Lazy;
use sqlx::SqlitePool;
use std::sync::RwLock;
use tracing::info;

use super::normalize;

const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

static IDENTITY_FILTER: Lazy<RwLock<CuckooFilter<String>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

/// Check if a roll number or email might be registered (false positives possible).
/// A poisoned lock answers "maybe", which sends the caller to the database.
pub fn might_exist(identity: &str) -> bool {
    let identity = normalize(identity);
    IDENTITY_FILTER
        .read()
        .map(|filter| filter.contains(&identity))
        .unwrap_or(true)
}

pub fn insert(identity: &str) {
    let identity = normalize(identity);
    if let Ok(mut filter) = IDENTITY_FILTER.write() {
        filter.add(&identity);
    }
}

/// Warm up the filter with every registered roll number and email
pub async fn warmup_identity_filter(pool: &SqlitePool, batch_size: usize) -> Result<()> {
    let mut stream =
        sqlx::query_as::<_, (Option<String>, String)>("SELECT roll, email FROM users").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (roll, email) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

        batch.extend(roll.as_deref().map(normalize));
        batch.push(normalize(&email));
        total += 1;

        if batch.len() >= batch_size {
            insert_batch(&batch)?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_batch(&batch)?;
    }

    info!(users = total, "Identity filter warmup complete");
    Ok(())
}

fn insert_batch(identities: &[String]) -> Result<()> {
    let mut filter = IDENTITY_FILTER
        .write()
        .map_err(|_| anyhow!("identity filter poisoned"))?;

    for identity in identities {
        filter.add(identity);
    }
    Ok(())
}
