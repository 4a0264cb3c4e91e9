use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::info;

use super::normalize;

/// true => roll number / email is TAKEN
/// only taken identities are stored
pub static IDENTITY_CACHE: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Mark a single roll number or email as taken
pub async fn mark_taken(identity: &str) {
    IDENTITY_CACHE.insert(normalize(identity), true).await;
}

pub async fn is_taken(identity: &str) -> bool {
    IDENTITY_CACHE
        .get(&normalize(identity))
        .await
        .unwrap_or(false)
}

async fn batch_mark(identities: &[String]) {
    let futures: Vec<_> = identities
        .iter()
        .map(|i| IDENTITY_CACHE.insert(normalize(i), true))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load identities of RECENTLY registered users into the cache (batched)
pub async fn warmup_identity_cache(pool: &SqlitePool, days: i64, batch_size: usize) -> Result<()> {
    let since = Utc::now() - ChronoDuration::days(days);

    let mut stream = sqlx::query_as::<_, (Option<String>, String)>(
        r#"
        SELECT roll, email
        FROM users
        WHERE created_at >= ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(since)
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (roll, email) = row?;
        batch.extend(roll);
        batch.push(email);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_mark(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        batch_mark(&batch).await;
    }

    info!(users = total_count, days, "Identity cache warmup complete");

    Ok(())
}
