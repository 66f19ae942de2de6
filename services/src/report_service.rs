//! Dashboard figures computed over the ticket table.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use db::models::tickets::{self, TicketStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Months shown by the trend chart, current month included.
pub const TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: u64,
    /// Tickets still in `new`.
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub percent_change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Abbreviated month name, e.g. `Jan`.
    pub name: String,
    pub total: u64,
}

/// Growth of `current` over `previous` in whole percent. A previous window
/// with no tickets counts as 100% growth.
pub fn percent_change(current: u64, previous: u64) -> i64 {
    if previous == 0 {
        return 100;
    }
    let delta = current as f64 - previous as f64;
    (delta / previous as f64 * 100.0).round() as i64
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

/// `(year, month)` of the month `back` months before `(year, month)`.
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn internal(msg: &str) -> ServiceError {
    ServiceError::Internal(msg.to_owned())
}

pub struct ReportService;

impl ReportService {
    pub async fn stats(db: &DatabaseConnection) -> Result<TicketStats, ServiceError> {
        Self::stats_at(db, Utc::now()).await
    }

    pub async fn stats_at(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
    ) -> Result<TicketStats, ServiceError> {
        let total = tickets::Entity::find().count(db).await?;
        let open = count_with_status(db, TicketStatus::New).await?;
        let in_progress = count_with_status(db, TicketStatus::InProgress).await?;
        let resolved = count_with_status(db, TicketStatus::Resolved).await?;

        let one_month_ago = now
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| internal("Date out of range"))?;
        let two_months_ago = now
            .checked_sub_months(Months::new(2))
            .ok_or_else(|| internal("Date out of range"))?;

        let last_month = tickets::Entity::find()
            .filter(tickets::Column::CreatedAt.gte(one_month_ago))
            .count(db)
            .await?;
        let month_before = tickets::Entity::find()
            .filter(tickets::Column::CreatedAt.gte(two_months_ago))
            .filter(tickets::Column::CreatedAt.lt(one_month_ago))
            .count(db)
            .await?;

        Ok(TicketStats {
            total,
            open,
            in_progress,
            resolved,
            percent_change: percent_change(last_month, month_before),
        })
    }

    /// Ticket counts per category, largest first.
    pub async fn categories(db: &DatabaseConnection) -> Result<Vec<CategoryCount>, ServiceError> {
        let rows: Vec<(String, i64)> = tickets::Entity::find()
            .select_only()
            .column(tickets::Column::Category)
            .column_as(Expr::col(tickets::Column::Id).count(), "total")
            .group_by(tickets::Column::Category)
            .into_tuple()
            .all(db)
            .await?;

        let mut counts: Vec<CategoryCount> = rows
            .into_iter()
            .map(|(category, total)| CategoryCount {
                category,
                total: total.max(0) as u64,
            })
            .collect();
        counts.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        Ok(counts)
    }

    pub async fn trends(db: &DatabaseConnection) -> Result<Vec<MonthlyTotal>, ServiceError> {
        Self::trends_at(db, Utc::now()).await
    }

    /// Tickets created per calendar month, oldest month first, ending with
    /// the month containing `now`. Empty months are reported as zero.
    pub async fn trends_at(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthlyTotal>, ServiceError> {
        let months: Vec<(i32, u32)> = (0..TREND_MONTHS)
            .rev()
            .map(|back| months_back(now.year(), now.month(), back))
            .collect();

        let (first_year, first_month) = months[0];
        let since = month_start(first_year, first_month).ok_or_else(|| internal("Date out of range"))?;

        let created = tickets::Entity::find()
            .filter(tickets::Column::CreatedAt.gte(since))
            .all(db)
            .await?;

        let mut totals = vec![0u64; months.len()];
        for ticket in &created {
            let key = (ticket.created_at.year(), ticket.created_at.month());
            if let Some(slot) = months.iter().position(|m| *m == key) {
                totals[slot] += 1;
            }
        }

        months
            .iter()
            .zip(totals)
            .map(|(&(year, month), total)| {
                let start = month_start(year, month).ok_or_else(|| internal("Date out of range"))?;
                Ok(MonthlyTotal {
                    name: start.format("%b").to_string(),
                    total,
                })
            })
            .collect()
    }
}

async fn count_with_status(db: &DatabaseConnection, status: TicketStatus) -> Result<u64, ServiceError> {
    Ok(tickets::Entity::find()
        .filter(tickets::Column::Status.eq(status))
        .count(db)
        .await?)
}
