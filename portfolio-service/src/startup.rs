//! Application startup and lifecycle management.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::PortfolioConfig;
use crate::services::{init_metrics, Database, Mailer, SmtpMailer};
use crate::services::email::DisabledMailer;
use crate::utils::{hash_password, Password};
use crate::{build_router, AppState};
use service_core::error::AppError;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PortfolioConfig) -> Result<Self, AppError> {
        Self::build_internal(config, true).await
    }

    /// Build the application without running migrations.
    /// Use this in tests when migrations are already applied by the harness.
    pub async fn build_without_migrations(config: PortfolioConfig) -> Result<Self, AppError> {
        Self::build_internal(config, false).await
    }

    async fn build_internal(
        config: PortfolioConfig,
        run_migrations: bool,
    ) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        if run_migrations {
            db.run_migrations().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to run migrations");
                e
            })?;
        }

        // Bootstrap the owner account from configuration.
        let password_hash = hash_password(&Password::new(config.owner.password.clone()))
            .map_err(AppError::InternalError)?;
        db.upsert_owner(&config.owner.email, password_hash.as_str())
            .await?;

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => {
                tracing::warn!("No SMTP configuration; contact delivery disabled");
                Arc::new(DisabledMailer)
            }
        };

        let state = AppState {
            config: config.clone(),
            db: Arc::new(db),
            mailer,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Portfolio service listener bound");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        tracing::info!(
            service = "portfolio-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await
    }
}
