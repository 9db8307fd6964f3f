use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{config::Config, promotions::Promotions, registry::Registry, scheduler::Scheduler};
use crate::{
    clock::{Clock, SystemClock},
    events::Bus,
    policies::{EarliestEnd, Selector},
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Promotions`] service with optional collaborators.
pub struct PromotionsBuilder {
    cfg: Config,
    clock: Arc<dyn Clock>,
    selector: Arc<dyn Selector>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl PromotionsBuilder {
    /// Creates a new builder with the given configuration.
    ///
    /// Defaults: [`SystemClock`], [`EarliestEnd`], no subscribers.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            clock: Arc::new(SystemClock),
            selector: Arc::new(EarliestEnd),
            subscribers: Vec::new(),
        }
    }

    /// Replaces the time source (e.g. with a [`MockClock`](crate::MockClock) in tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the banner selection strategy.
    pub fn with_selector(mut self, selector: Arc<dyn Selector>) -> Self {
        self.selector = selector;
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds and returns the service.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - Event bus for broadcasting
    /// - Registry and transition scheduler
    /// - Subscriber workers
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Arc<Promotions> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(
            self.subscribers,
            bus.clone(),
            Arc::clone(&self.clock),
        ));
        let runtime_token = CancellationToken::new();
        let registry = Registry::new();
        let scheduler = Scheduler::new(
            Arc::clone(&self.clock),
            Arc::clone(&registry),
            bus.clone(),
            runtime_token.clone(),
        );
        let display = Arc::new(self.cfg.display_policy());

        let promos = Arc::new(Promotions::new_internal(
            self.cfg,
            self.clock,
            display,
            self.selector,
            bus,
            registry,
            scheduler,
            runtime_token,
        ));
        promos.subscriber_listener(subs);
        promos
    }
}
