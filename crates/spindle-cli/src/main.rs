use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spindle_core::app::{ClaimConfig, ClaimStrategy, Claimer};
use spindle_core::domain::{JobDefinition, JobName, JobRecord, SchedulerContext};
use spindle_core::impls::{BroadcastEventSink, InMemoryJobStore};
use spindle_core::ports::{IdGenerator, SystemClock, UlidGenerator};

#[derive(Parser, Debug)]
#[command(name = "spindle")]
#[command(about = "Race several workers claiming jobs from one in-memory job table")]
struct Args {
    /// Number of simulated worker processes
    #[arg(long, default_value = "4")]
    workers: usize,

    /// Jobs that are due now
    #[arg(long, default_value = "20")]
    jobs: usize,

    /// Jobs whose lock was abandoned by a dead worker
    #[arg(long, default_value = "3")]
    abandoned: usize,

    /// Lock lifetime of the demo job type, in seconds
    #[arg(long, default_value = "600")]
    lock_lifetime_secs: u64,

    /// Reclaim abandoned locks before admitting due jobs
    #[arg(long)]
    two_step: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    strategy: &'static str,
    claimed_per_worker: BTreeMap<String, usize>,
    total_claimed: usize,
    total_jobs: usize,
}

async fn seed(
    store: &InMemoryJobStore,
    name: &JobName,
    definition: &JobDefinition,
    args: &Args,
) {
    let ids = UlidGenerator::new(SystemClock);
    let now = Utc::now();
    let deadline = definition.lock_deadline(now);
    let stale = deadline
        .checked_sub_signed(TimeDelta::minutes(1))
        .unwrap_or(deadline);

    for i in 0..args.jobs {
        let record = JobRecord::new(ids.generate_job_id(), name.clone(), now)
            .with_data(serde_json::json!({ "to": format!("user{i}@example.com") }));
        store.insert(record).await;
    }
    for _ in 0..args.abandoned {
        let record = JobRecord::new(ids.generate_job_id(), name.clone(), now)
            .with_locked_at(stale);
        store.insert(record).await;
    }
}

/// Minimal polling loop: one scan, claim until nothing is left.
async fn worker_loop(claimer: Claimer, name: JobName, definition: JobDefinition) -> (String, usize) {
    let worker = claimer.scheduler().name().to_string();
    let scan_horizon = Utc::now();
    let mut claimed = 0;

    loop {
        match claimer.claim_next(&name, &definition, scan_horizon).await {
            Ok(Some(job)) => {
                info!(worker = %worker, job_id = %job.id(), "claimed");
                claimed += 1;
                tokio::task::yield_now().await;
            }
            Ok(None) => break,
            Err(e) => {
                warn!(worker = %worker, "claim failed: {e}");
                break;
            }
        }
    }

    (worker, claimed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ClaimConfig::from_env();
    if args.two_step {
        config = config.with_strategy(ClaimStrategy::TwoStep);
    }

    let name = JobName::new("send-email");
    let definition = JobDefinition::new(Duration::from_secs(args.lock_lifetime_secs));

    let store = Arc::new(InMemoryJobStore::new());
    seed(&store, &name, &definition, &args).await;

    let events = Arc::new(BroadcastEventSink::default());
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            warn!(error = event.is_error(), "scheduler event: {event}");
        }
    });

    let mut joins = Vec::with_capacity(args.workers);
    for i in 0..args.workers {
        let claimer = Claimer::new(
            store.clone(),
            Arc::new(SchedulerContext::new(format!("worker-{i}"))),
            config.clone(),
        )
        .with_event_sink(events.clone());
        joins.push(tokio::spawn(worker_loop(
            claimer,
            name.clone(),
            definition.clone(),
        )));
    }

    let mut claimed_per_worker = BTreeMap::new();
    for join in joins {
        let (worker, claimed) = join.await?;
        claimed_per_worker.insert(worker, claimed);
    }

    let summary = Summary {
        strategy: config.strategy.as_str(),
        total_claimed: claimed_per_worker.values().sum(),
        claimed_per_worker,
        total_jobs: store.len().await,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
