//! Scheduled task factories

use std::sync::Arc;

use application::ports::{AlertSinkPort, ObservationStorePort, WeatherProviderPort};
use application::services::CollectorService;

/// Build the recurring collection task for [`super::TaskScheduler::add_task`]
///
/// Each invocation runs one collector tick. Individual location failures
/// are already logged and isolated inside the tick; the task itself only
/// reports failure when every configured location failed, which points at
/// a provider or store outage rather than a flaky site.
pub fn collection_task<P, S, A>(
    collector: Arc<CollectorService<P, S, A>>,
) -> impl Fn() -> futures::future::BoxFuture<'static, Result<(), String>>
where
    P: WeatherProviderPort + 'static,
    S: ObservationStorePort + 'static,
    A: AlertSinkPort + 'static,
{
    move || {
        let collector = Arc::clone(&collector);
        Box::pin(async move {
            let summary = collector.tick().await;
            if summary.total() > 0 && summary.failed == summary.total() {
                return Err(format!("all {} locations failed", summary.failed));
            }
            Ok(())
        })
    }
}
