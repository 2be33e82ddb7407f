use crate::enricher::hardware::HardwareLookupError;
use crate::enricher::{enrich_instance_type, EnrichContext};
use anyhow::Result;
use ec2_catalog_common::InstanceTypeRecord;
use futures_util::{stream, StreamExt};
use tracing::{error, info};

/// Enrich every instance type with at most `max_workers` tasks in flight.
///
/// Results come back in completion order. A task that panics or cannot build
/// its record is logged and left out. A failed hardware lookup aborts the
/// batch with that error.
pub async fn enrich_all(
    ctx: EnrichContext,
    instance_types: Vec<String>,
    max_workers: usize,
) -> Result<Vec<InstanceTypeRecord>> {
    let submitted = instance_types.len();

    // Tasks are spawned lazily, only when the buffer has a free slot.
    let mut completions = stream::iter(instance_types)
        .map(|instance_type| {
            let ctx = ctx.clone();
            let task_type = instance_type.clone();
            let handle = tokio::spawn(async move { enrich_instance_type(&ctx, &task_type).await });
            async move { (instance_type, handle.await) }
        })
        .buffer_unordered(max_workers.max(1));

    let mut records = Vec::with_capacity(submitted);
    while let Some((instance_type, outcome)) = completions.next().await {
        match outcome {
            Ok(Ok(Some(record))) => records.push(record),
            Ok(Ok(None)) => {}
            Ok(Err(e)) if e.is::<HardwareLookupError>() => {
                error!("Error processing {}: {:#}", instance_type, e);
                return Err(e);
            }
            Ok(Err(e)) => error!("Error processing {}: {:#}", instance_type, e),
            Err(join_err) => error!("Error processing {}: {}", instance_type, join_err),
        }
    }

    info!("Enriched {} of {} instance types", records.len(), submitted);
    Ok(records)
}
