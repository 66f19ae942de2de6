//! Scoped database transaction.
//!
//! A `UnitOfWork` wraps a sea-orm transaction for the lifetime of one engine
//! operation. Calling [`UnitOfWork::commit`] persists the writes; any other exit
//! (an early `?` return, a panic) drops the guard and the transaction rolls back.
//! Holding the connection longer than the configured threshold logs a warning.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use std::time::{Duration, Instant};
use util::config::AppConfig;

pub struct UnitOfWork {
    txn: DatabaseTransaction,
    timer: CheckoutTimer,
}

struct CheckoutTimer {
    label: &'static str,
    started: Instant,
    warn_after: Duration,
    committed: bool,
}

impl Drop for CheckoutTimer {
    fn drop(&mut self) {
        let held = self.started.elapsed();
        if held > self.warn_after {
            tracing::warn!(
                operation = self.label,
                held_ms = held.as_millis() as u64,
                "Database connection held longer than {}ms",
                self.warn_after.as_millis()
            );
        }
        if !self.committed {
            tracing::debug!(operation = self.label, "Transaction rolled back");
        }
    }
}

impl UnitOfWork {
    /// Starts a transaction using the global checkout threshold.
    pub async fn begin(db: &DatabaseConnection, label: &'static str) -> Result<Self, DbErr> {
        let warn_ms = AppConfig::global().db_checkout_warn_ms;
        Self::begin_with_threshold(db, label, Duration::from_millis(warn_ms)).await
    }

    pub async fn begin_with_threshold(
        db: &DatabaseConnection,
        label: &'static str,
        warn_after: Duration,
    ) -> Result<Self, DbErr> {
        let started = Instant::now();
        let txn = db.begin().await?;
        Ok(Self {
            txn,
            timer: CheckoutTimer {
                label,
                started,
                warn_after,
                committed: false,
            },
        })
    }

    /// The transaction to run statements against.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.started.elapsed()
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        let UnitOfWork { txn, mut timer } = self;
        txn.commit().await?;
        timer.committed = true;
        Ok(())
    }
}
