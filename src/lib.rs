pub mod config;
pub mod core_banking;
pub mod domain {
    pub mod audit;
    pub mod event;
    pub mod payment;
}
pub mod error;
pub mod fx {
    pub mod rates;
}
pub mod guardrails {
    pub mod fraud;
    pub mod pipeline;
    pub mod rate_limit;
}
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod payments;
        pub mod webhooks;
    }
    pub mod middleware {
        pub mod principal;
    }
    pub mod router;
}
pub mod metrics {
    pub mod counters;
}
pub mod repo {
    pub mod audit_repo;
    pub mod payments_repo;
    pub mod webhook_repo;
}
pub mod service {
    pub mod payment_service;
    pub mod retry_orchestrator;
    pub mod settlement_worker;
    pub mod webhook_dispatcher;
}
pub mod webhooks;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub metrics: Arc<metrics::counters::Metrics>,
    pub audit: repo::audit_repo::AuditRepo,
}

impl AppState {
    pub fn new(
        cfg: &config::AppConfig,
        transport: Arc<dyn webhooks::WebhookTransport>,
        backend: Arc<dyn core_banking::CoreBankingBackend>,
    ) -> Self {
        let metrics = Arc::new(metrics::counters::Metrics::default());
        let audit = repo::audit_repo::AuditRepo::new();
        let payments_repo = repo::payments_repo::PaymentsRepo::new();
        let webhook_repo = repo::webhook_repo::WebhookRepo::new();

        let guardrails = guardrails::pipeline::GuardrailPipeline::new(
            &cfg.guardrails,
            fx::rates::FxRateTable::default(),
            metrics.clone(),
            audit.clone(),
        );
        let dispatcher = service::webhook_dispatcher::WebhookDispatcher {
            webhook_repo: webhook_repo.clone(),
            audit: audit.clone(),
            transport,
            policy: cfg.delivery.clone(),
        };
        let settlement_worker = service::settlement_worker::SettlementWorker {
            payments_repo: payments_repo.clone(),
            backend,
            dispatcher,
            audit: audit.clone(),
        };

        Self {
            payment_service: service::payment_service::PaymentService {
                guardrails,
                payments_repo,
                webhook_repo,
                settlement_worker,
                audit: audit.clone(),
            },
            metrics,
            audit,
        }
    }
}
