//! Provider and match handles.
//!
//! A [`Provider`] owns one loaded engine and a bounded pool of worksets.
//! Every [`Match`] leases one workset from that pool and gives it back when
//! it is released or dropped, so a workset returns to the pool on every exit
//! path, including early returns, `?` and panics.
//!
//! # Disposal
//!
//! [`Provider::dispose`] is refused while any match is outstanding. A live
//! lease counter is kept under the same lock as the disposed flag, so a
//! match can never observe a disposed provider and disposal can never pull
//! the dataset out from under a lease.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{DatasetInfo, MatchMethod, MatchOutcome};
use crate::error::{DetectionError, DetectionResult, InvalidStateError};
use crate::pool::{AcquireError, PoolStatus, WorksetPool};
use crate::ports::DetectionEngine;
use crate::settings::{ProviderConfig, validate_config};

/// Lifecycle bookkeeping guarded by one lock.
#[derive(Debug, Default)]
struct LeaseState {
    disposed: bool,
    outstanding: usize,
}

struct ProviderInner<E: DetectionEngine> {
    engine: RwLock<Option<Arc<E>>>,
    properties: Vec<String>,
    property_index: HashMap<String, usize>,
    pool: WorksetPool<E::Workset>,
    acquire_timeout: Option<Duration>,
    state: Mutex<LeaseState>,
}

impl<E: DetectionEngine> ProviderInner<E> {
    fn state(&self) -> MutexGuard<'_, LeaseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The engine, or `ProviderDisposed` once it has been released.
    fn engine(&self) -> Result<Arc<E>, InvalidStateError> {
        self.engine
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
            .ok_or(InvalidStateError::ProviderDisposed)
    }

    /// Register a new lease and hand back the engine it will use.
    fn begin_lease(&self) -> Result<Arc<E>, InvalidStateError> {
        let mut state = self.state();
        if state.disposed {
            return Err(InvalidStateError::ProviderDisposed);
        }
        let engine = self.engine()?;
        state.outstanding += 1;
        Ok(engine)
    }

    fn end_lease(&self) {
        let mut state = self.state();
        state.outstanding = state.outstanding.saturating_sub(1);
    }

    fn return_workset(&self, workset: E::Workset) {
        self.pool.release(workset);
        self.end_lease();
    }
}

/// Caller-facing owner of a loaded dataset and its workset pool.
///
/// Cloning a provider is cheap: clones share the same dataset and pool, so
/// one provider can serve many threads.
pub struct Provider<E: DetectionEngine> {
    inner: Arc<ProviderInner<E>>,
}

impl<E: DetectionEngine> Clone for Provider<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: DetectionEngine> Provider<E> {
    /// Wrap a loaded engine, building a pool sized by `config`.
    ///
    /// The engine is expected to have applied the property filter already;
    /// the provider resolves exactly the properties the engine exposes.
    pub fn new(engine: E, config: &ProviderConfig) -> DetectionResult<Self> {
        validate_config(config)?;

        let pool_size = config.effective_pool_size();
        let properties = engine.properties().to_vec();
        let property_index = properties
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        let pool = WorksetPool::new(pool_size, || engine.create_workset());

        info!(
            dataset = %engine.info().name,
            properties = properties.len(),
            pool_size,
            "Provider created"
        );

        Ok(Self {
            inner: Arc::new(ProviderInner {
                engine: RwLock::new(Some(Arc::new(engine))),
                properties,
                property_index,
                pool,
                acquire_timeout: config.acquire_timeout(),
                state: Mutex::new(LeaseState::default()),
            }),
        })
    }

    /// Match a single User-Agent string.
    ///
    /// Blocks while every workset is leased, up to the configured acquire
    /// timeout. Input that matches nothing still yields a [`Match`] whose
    /// properties hold their default values.
    pub fn match_user_agent(&self, user_agent: &str) -> DetectionResult<Match<E>> {
        let engine = self.inner.begin_lease()?;

        let mut workset = match self.inner.pool.acquire(self.inner.acquire_timeout) {
            Ok(workset) => workset,
            Err(err) => {
                self.inner.end_lease();
                return Err(match err {
                    AcquireError::Timeout(limit) => {
                        warn!(timeout = ?limit, "No workset became free in time");
                        DetectionError::Timeout(limit)
                    }
                    AcquireError::Closed => InvalidStateError::ProviderDisposed.into(),
                });
            }
        };

        let outcome = engine.detect(&mut workset, user_agent);
        debug!(method = %outcome.method, signature = ?outcome.signature, "Matched User-Agent");

        Ok(Match {
            provider: Arc::clone(&self.inner),
            engine,
            workset: Some(workset),
            user_agent: user_agent.to_string(),
            outcome,
        })
    }

    /// Async variant of [`Provider::match_user_agent`] for tokio callers.
    ///
    /// The potentially blocking acquire runs on the blocking thread pool. If
    /// the returned future is dropped early, the finished match is dropped
    /// with the task output and its workset still goes back to the pool.
    pub async fn match_async(&self, user_agent: impl Into<String>) -> DetectionResult<Match<E>> {
        let provider = self.clone();
        let user_agent = user_agent.into();
        tokio::task::spawn_blocking(move || provider.match_user_agent(&user_agent))
            .await
            .map_err(|e| DetectionError::Task(e.to_string()))?
    }

    /// Names of the properties this provider resolves, in order.
    pub fn available_properties(&self) -> DetectionResult<&[String]> {
        self.ensure_open()?;
        Ok(&self.inner.properties)
    }

    /// Metadata of the loaded dataset.
    pub fn dataset_info(&self) -> DetectionResult<DatasetInfo> {
        Ok(self.inner.engine()?.info())
    }

    /// Current pool usage.
    pub fn pool_status(&self) -> PoolStatus {
        let state = self.inner.state();
        PoolStatus {
            capacity: self.inner.pool.capacity(),
            idle: self.inner.pool.idle(),
            outstanding: state.outstanding,
            disposed: state.disposed,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state().disposed
    }

    /// Release the dataset and every pooled workset.
    ///
    /// Fails with [`InvalidStateError::LeasesOutstanding`] while any match is
    /// still held (release them first), and with
    /// [`InvalidStateError::ProviderDisposed`] when called a second time.
    /// After a successful dispose every clone of this provider refuses new
    /// matches.
    pub fn dispose(&self) -> DetectionResult<()> {
        let mut state = self.inner.state();
        if state.disposed {
            return Err(InvalidStateError::ProviderDisposed.into());
        }
        if state.outstanding > 0 {
            warn!(
                outstanding = state.outstanding,
                "Refusing to dispose provider with outstanding matches"
            );
            return Err(InvalidStateError::LeasesOutstanding {
                outstanding: state.outstanding,
            }
            .into());
        }

        state.disposed = true;
        let engine = self
            .inner
            .engine
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let freed = self.inner.pool.drain();
        drop(engine);

        info!(worksets = freed, "Provider disposed");
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), InvalidStateError> {
        if self.inner.state().disposed {
            Err(InvalidStateError::ProviderDisposed)
        } else {
            Ok(())
        }
    }
}

impl<E: DetectionEngine> fmt::Debug for Provider<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("properties", &self.inner.properties)
            .field("pool", &self.pool_status())
            .finish_non_exhaustive()
    }
}

/// The result of matching one User-Agent, holding a leased workset.
///
/// A `Match` is move-only. Releasing consumes it, so a released match can
/// neither be read nor released again; the compiler rejects both:
///
/// ```compile_fail
/// use devdetect_core::{DetectionEngine, Match};
///
/// fn release_twice<E: DetectionEngine>(found: Match<E>) {
///     found.release();
///     found.release();
/// }
/// ```
///
/// Dropping a match has the same effect as [`Match::release`].
pub struct Match<E: DetectionEngine> {
    provider: Arc<ProviderInner<E>>,
    engine: Arc<E>,
    workset: Option<E::Workset>,
    user_agent: String,
    outcome: MatchOutcome,
}

impl<E: DetectionEngine> Match<E> {
    /// Value of `property` for this match.
    ///
    /// Fails with [`DetectionError::PropertyNotFound`] for names outside the
    /// provider's enabled set.
    pub fn get_value(&self, property: &str) -> DetectionResult<&str> {
        let index = *self
            .provider
            .property_index
            .get(property)
            .ok_or_else(|| DetectionError::PropertyNotFound(property.to_string()))?;
        let workset = self.workset()?;
        Ok(self.engine.value(workset, index))
    }

    /// Every enabled property with its value, in provider order.
    pub fn values(&self) -> DetectionResult<Vec<(&str, &str)>> {
        let workset = self.workset()?;
        Ok(self
            .provider
            .properties
            .iter()
            .enumerate()
            .map(|(index, name)| (name.as_str(), self.engine.value(workset, index)))
            .collect())
    }

    /// The match rendered as a JSON object of property name to value.
    pub fn to_json(&self) -> DetectionResult<serde_json::Value> {
        let object = self
            .values()?
            .into_iter()
            .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
            .collect::<serde_json::Map<_, _>>();
        Ok(serde_json::Value::Object(object))
    }

    pub const fn method(&self) -> MatchMethod {
        self.outcome.method
    }

    /// Index of the signature that matched, if any.
    pub const fn signature_index(&self) -> Option<usize> {
        self.outcome.signature
    }

    /// The input this match was produced from.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Return the workset to the provider's pool.
    pub fn release(self) {
        drop(self);
    }

    fn workset(&self) -> Result<&E::Workset, InvalidStateError> {
        self.workset
            .as_ref()
            .ok_or(InvalidStateError::MatchReleased)
    }
}

impl<E: DetectionEngine> Drop for Match<E> {
    fn drop(&mut self) {
        if let Some(workset) = self.workset.take() {
            self.provider.return_workset(workset);
        }
    }
}

impl<E: DetectionEngine> fmt::Debug for Match<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("user_agent", &self.user_agent)
            .field("method", &self.outcome.method)
            .field("signature", &self.outcome.signature)
            .finish_non_exhaustive()
    }
}
