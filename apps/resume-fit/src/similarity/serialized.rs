use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::similarity::{ModelError, SimilarityModel};

/// Admits one call at a time into the wrapped model.
///
/// For providers that are shareable as values but not documented as safe to call
/// concurrently (single-session native runtimes, strict per-key rate limits).
pub struct SerializedModel {
    inner: Arc<dyn SimilarityModel>,
    gate: Mutex<()>,
}

impl SerializedModel {
    pub fn new(inner: Arc<dyn SimilarityModel>) -> Self {
        Self {
            inner,
            gate: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SimilarityModel for SerializedModel {
    async fn embed_and_compare(&self, text_a: &str, text_b: &str) -> Result<f32, ModelError> {
        let _permit = self.gate.lock().await;
        self.inner.embed_and_compare(text_a, text_b).await
    }

    fn backend(&self) -> &str {
        self.inner.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Records the highest number of calls that were ever in flight together.
    #[derive(Default)]
    struct ConcurrencyProbe {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl SimilarityModel for ConcurrencyProbe {
        async fn embed_and_compare(&self, _a: &str, _b: &str) -> Result<f32, ModelError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(0.5)
        }

        fn backend(&self) -> &str {
            "probe"
        }
    }

    #[tokio::test]
    async fn test_calls_never_overlap() {
        let probe = Arc::new(ConcurrencyProbe::default());
        let model = Arc::new(SerializedModel::new(probe.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let model = model.clone();
                tokio::spawn(async move { model.embed_and_compare("a", "b").await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 0.5);
        }
        assert_eq!(probe.peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backend_label_passes_through() {
        let model = SerializedModel::new(Arc::new(ConcurrencyProbe::default()));
        assert_eq!(model.backend(), "probe");
    }
}
