use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::info;

use crate::config::{AppConfig, FoundersConfig, JwtConfig, MongoConfig};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::finance_repo::MongoFinanceRepository;
use crate::repository::founder_transaction_repo::MongoFounderTransactionRepository;
use crate::repository::mongo::MongoGateway;
use crate::repository::profit_repo::MongoProfitRepository;
use crate::repository::transaction_repo::MongoTransactionRepository;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::auth_router::auth_router;
use crate::router::finance_router::finance_router;
use crate::router::founder_router::founder_router;
use crate::router::profit_router::profit_router;
use crate::router::transaction_router::transaction_router;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::finance_service::FinanceServiceImpl;
use crate::service::founder_service::FounderServiceImpl;
use crate::service::profit_service::ProfitServiceImpl;
use crate::service::transaction_service::TransactionServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let founders_config = FoundersConfig::from_env()?;

        // Single storage connection for the process lifetime.
        let gateway = MongoGateway::connect(&mongo_config).await?;
        gateway.ensure_indexes().await?;

        let user_repo = Arc::new(MongoUserRepository::new(&gateway));
        let finance_repo = Arc::new(MongoFinanceRepository::new(&gateway));
        let transaction_repo = Arc::new(MongoTransactionRepository::new(&gateway));
        let profit_repo = Arc::new(MongoProfitRepository::new(&gateway));
        let founder_repo = Arc::new(MongoFounderTransactionRepository::new(&gateway));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let auth_state = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
        });

        let auth_service = Arc::new(AuthServiceImpl::new(
            user_repo,
            finance_repo.clone(),
            jwt_utils,
        ));
        let finance_service = Arc::new(FinanceServiceImpl::new(finance_repo));
        let transaction_service = Arc::new(TransactionServiceImpl::new(transaction_repo.clone()));
        let profit_service = Arc::new(ProfitServiceImpl::new(profit_repo));
        let founder_service = Arc::new(FounderServiceImpl::new(
            founder_repo,
            transaction_repo,
            founders_config,
        ));

        let router = Router::new()
            .merge(auth_router(auth_service))
            .merge(finance_router(finance_service, auth_state.clone()))
            .merge(transaction_router(transaction_service, auth_state.clone()))
            .merge(profit_router(profit_service, auth_state.clone()))
            .merge(founder_router(founder_service, auth_state))
            .route("/health", get(|| async { "OK" }));

        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
