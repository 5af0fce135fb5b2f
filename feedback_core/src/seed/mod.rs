//! Idempotent seeding of the sample feedback data.
//!
//! A run writes the whole [`SeedPlan`] inside one transaction. Every write is an
//! insert-if-absent keyed on the row's identity key, so running the seeder again
//! confirms the rows instead of duplicating them, and a failure anywhere leaves
//! the database as it was.

use std::collections::HashMap;
use std::fmt;

use futures::future::try_join_all;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::{info, warn};

use crate::error::SeedError;
use crate::ids::{CommentId, UserId};

pub mod plan;
pub mod upsert;

pub use plan::{CommentSeed, MemberSeed, PageSeed, ReactionSeed, ReportSeed, SeedPlan, UserSeed};
pub use upsert::Upserted;

/// Inserted vs. already present rows for one table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpsertCounts {
    pub inserted: usize,
    pub existing: usize,
}

impl UpsertCounts {
    fn record<M>(&mut self, row: &Upserted<M>) {
        if row.inserted {
            self.inserted += 1;
        } else {
            self.existing += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.inserted + self.existing
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: UpsertCounts,
    pub pages: UpsertCounts,
    pub page_members: UpsertCounts,
    pub comments: UpsertCounts,
    pub reactions: UpsertCounts,
    pub reports: UpsertCounts,
}

impl SeedSummary {
    fn tables(&self) -> [(&'static str, UpsertCounts); 6] {
        [
            ("users", self.users),
            ("pages", self.pages),
            ("page_members", self.page_members),
            ("comments", self.comments),
            ("reactions", self.reactions),
            ("reports", self.reports),
        ]
    }

    pub fn inserted(&self) -> usize {
        self.tables().iter().map(|(_, c)| c.inserted).sum()
    }

    pub fn existing(&self) -> usize {
        self.tables().iter().map(|(_, c)| c.existing).sum()
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (table, counts) in self.tables() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{table}: {} new/{} kept", counts.inserted, counts.existing)?;
        }
        Ok(())
    }
}

/// Owns the connection for the duration of a seed run.
pub struct Seeder {
    db: DatabaseConnection,
}

impl Seeder {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Seeds the development sample.
    pub async fn run(&self) -> Result<SeedSummary, SeedError> {
        self.run_plan(&SeedPlan::sample()).await
    }

    /// Writes `plan` in one transaction. Nothing is kept if any step fails.
    pub async fn run_plan(&self, plan: &SeedPlan) -> Result<SeedSummary, SeedError> {
        let txn = self.db.begin().await?;

        match apply(&txn, plan).await {
            Ok(summary) => {
                txn.commit().await?;
                info!(
                    inserted = summary.inserted(),
                    existing = summary.existing(),
                    "seed committed"
                );
                Ok(summary)
            }
            Err(error) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!(%rollback, "rollback after failed seed also failed");
                }
                Err(error)
            }
        }
    }

    /// Releases the connection pool.
    pub async fn close(self) -> Result<(), DbErr> {
        self.db.close().await
    }
}

async fn apply(txn: &DatabaseTransaction, plan: &SeedPlan) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    // Users don't depend on each other
    let users = try_join_all(plan.users.iter().map(|seed| upsert::user(txn, seed))).await?;
    for row in &users {
        summary.users.record(row);
    }
    let user_ids: HashMap<&str, &UserId> = users
        .iter()
        .map(|row| (row.model.email.as_str(), &row.model.id))
        .collect();
    let resolve = |email: &str| {
        user_ids
            .get(email)
            .copied()
            .ok_or_else(|| SeedError::UnknownUser(email.to_string()))
    };
    info!(count = users.len(), "users seeded");

    let page = upsert::page(txn, &plan.page).await?;
    summary.pages.record(&page);
    let page_id = &page.model.id;
    info!(slug = %page.model.slug, "page seeded");

    let member_writes = plan
        .members
        .iter()
        .map(|seed| -> Result<_, SeedError> {
            let user_id = resolve(seed.user.as_str())?;
            Ok(upsert::page_member(txn, page_id, user_id, seed.role))
        })
        .collect::<Result<Vec<_>, _>>()?;
    for row in try_join_all(member_writes).await? {
        summary.page_members.record(&row);
    }
    info!(count = plan.members.len(), "page members seeded");

    // Serial: a reply needs its parent row first
    let mut comments: Vec<CommentId> = Vec::with_capacity(plan.comments.len());
    for seed in &plan.comments {
        if let Some(parent) = &seed.parent {
            upsert::require_comment(&comments, parent)?;
        }
        let author = resolve(seed.author.as_str())?;
        let row = upsert::comment(txn, seed, page_id, author).await?;
        summary.comments.record(&row);
        comments.push(row.model.id);
    }
    info!(count = comments.len(), "comments seeded");

    for seed in &plan.reactions {
        upsert::require_comment(&comments, &seed.comment)?;
        let row = upsert::reaction(txn, seed, resolve(seed.user.as_str())?).await?;
        summary.reactions.record(&row);
    }

    for seed in &plan.reports {
        upsert::require_comment(&comments, &seed.comment)?;
        let reporter = resolve(seed.reported_by.as_str())?;
        let row = upsert::report(txn, seed, page_id, reporter).await?;
        summary.reports.record(&row);
    }
    info!(
        reactions = plan.reactions.len(),
        reports = plan.reports.len(),
        "reactions and reports seeded"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prelude::*;
    use crate::test_utils::{setup_test_db, table_counts, TableCounts};

    const SAMPLE_COUNTS: TableCounts = TableCounts {
        users: 3,
        pages: 1,
        page_members: 2,
        comments: 3,
        reactions: 1,
        reports: 1,
    };

    async fn snapshot(
        db: &DatabaseConnection,
    ) -> (
        Vec<UserModel>,
        Vec<PageModel>,
        Vec<PageMemberModel>,
        Vec<CommentModel>,
        Vec<ReactionModel>,
        Vec<ReportModel>,
    ) {
        (
            User::find()
                .order_by_asc(UserColumn::Email)
                .all(db)
                .await
                .unwrap(),
            Page::find().all(db).await.unwrap(),
            PageMember::find()
                .order_by_asc(PageMemberColumn::UserId)
                .all(db)
                .await
                .unwrap(),
            Comment::find()
                .order_by_asc(CommentColumn::Id)
                .all(db)
                .await
                .unwrap(),
            Reaction::find().all(db).await.unwrap(),
            Report::find().all(db).await.unwrap(),
        )
    }

    #[tokio::test]
    async fn test_first_run_inserts_everything() {
        let seeder = Seeder::new(setup_test_db().await);

        let summary = seeder.run().await.expect("seed should succeed");

        assert_eq!(summary.inserted(), 11);
        assert_eq!(summary.existing(), 0);
        assert_eq!(table_counts(seeder.connection()).await, SAMPLE_COUNTS);
    }

    #[tokio::test]
    async fn test_second_run_changes_nothing() {
        let seeder = Seeder::new(setup_test_db().await);

        seeder.run().await.unwrap();
        let before = snapshot(seeder.connection()).await;

        let summary = seeder.run().await.unwrap();
        let after = snapshot(seeder.connection()).await;

        assert_eq!(summary.inserted(), 0);
        assert_eq!(summary.existing(), 11);
        assert_eq!(summary.users.total(), 3);
        assert_eq!(table_counts(seeder.connection()).await, SAMPLE_COUNTS);
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_sample_scenario() {
        let seeder = Seeder::new(setup_test_db().await);
        seeder.run().await.unwrap();
        let db = seeder.connection();

        let amit = User::find()
            .filter(UserColumn::Email.eq("amit@example.com"))
            .one(db)
            .await
            .unwrap()
            .expect("amit should exist");
        assert_eq!(amit.role, UserRole::Admin);

        let pages = Page::find()
            .filter(PageColumn::Slug.eq("rahul-feedback"))
            .all(db)
            .await
            .unwrap();
        assert_eq!(pages.len(), 1);

        let reply = Comment::find_by_id(CommentId::fixed("reply-comment"))
            .one(db)
            .await
            .unwrap()
            .expect("reply should exist");
        assert_eq!(reply.parent_id, Some(CommentId::fixed("top-comment1")));

        let report = Report::find_by_id(crate::ids::ReportId::fixed("report-reply"))
            .one(db)
            .await
            .unwrap()
            .expect("report should exist");
        assert_eq!(report.reason, ReportReason::Spam);
        assert_eq!(report.comment_id, "reply-comment");
    }

    #[tokio::test]
    async fn test_every_reference_resolves() {
        let seeder = Seeder::new(setup_test_db().await);
        seeder.run().await.unwrap();
        let db = seeder.connection();

        for member in PageMember::find().all(db).await.unwrap() {
            assert!(member.find_related(Page).one(db).await.unwrap().is_some());
            assert!(member.find_related(User).one(db).await.unwrap().is_some());
        }

        for comment in Comment::find().all(db).await.unwrap() {
            assert!(comment.find_related(Page).one(db).await.unwrap().is_some());
            assert!(comment.find_related(User).one(db).await.unwrap().is_some());
            if let Some(parent) = &comment.parent_id {
                let parent = Comment::find_by_id(parent.clone()).one(db).await.unwrap();
                assert!(parent.is_some(), "parent of {} missing", comment.id);
            }
        }

        for reaction in Reaction::find().all(db).await.unwrap() {
            assert!(reaction.find_related(Comment).one(db).await.unwrap().is_some());
            assert!(reaction.find_related(User).one(db).await.unwrap().is_some());
        }

        for report in Report::find().all(db).await.unwrap() {
            assert!(report.find_related(Comment).one(db).await.unwrap().is_some());
            assert!(report.find_related(Page).one(db).await.unwrap().is_some());
            let reporter = report.find_related(User).one(db).await.unwrap().unwrap();
            assert_eq!(reporter.email, "rahul@example.com");
        }
    }

    #[tokio::test]
    async fn test_memberships_and_reaction_point_at_the_right_users() {
        let seeder = Seeder::new(setup_test_db().await);
        seeder.run().await.unwrap();
        let db = seeder.connection();

        let page = Page::find().one(db).await.unwrap().unwrap();
        let owners = page
            .find_related(PageMember)
            .filter(PageMemberColumn::Role.eq(PageRole::Owner))
            .all(db)
            .await
            .unwrap();
        assert_eq!(owners.len(), 1);
        let owner = owners[0].find_related(User).one(db).await.unwrap().unwrap();
        assert_eq!(owner.email, "rahul@example.com");

        let reaction = Reaction::find().one(db).await.unwrap().unwrap();
        assert_eq!(reaction.comment_id, "top-comment1");
        let reactor = reaction.find_related(User).one(db).await.unwrap().unwrap();
        assert_eq!(reactor.email, "amit@example.com");
    }

    #[tokio::test]
    async fn test_failed_report_rolls_back_everything() {
        let seeder = Seeder::new(setup_test_db().await);
        let db = seeder.connection();

        // Make the report write, the last step, fail inside the database.
        db.execute_unprepared("DROP TABLE report").await.unwrap();

        let result = seeder.run().await;
        assert!(matches!(result, Err(SeedError::Database(_))));

        assert_eq!(User::find().count(db).await.unwrap(), 0);
        assert_eq!(Page::find().count(db).await.unwrap(), 0);
        assert_eq!(PageMember::find().count(db).await.unwrap(), 0);
        assert_eq!(Comment::find().count(db).await.unwrap(), 0);
        assert_eq!(Reaction::find().count(db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unresolved_report_target_rolls_back_everything() {
        let seeder = Seeder::new(setup_test_db().await);
        let mut plan = SeedPlan::sample();
        plan.reports[0].comment = CommentId::fixed("never-written");

        let result = seeder.run_plan(&plan).await;
        assert!(matches!(result, Err(SeedError::UnknownComment(id)) if id == "never-written"));

        let counts = table_counts(seeder.connection()).await;
        assert_eq!(
            counts,
            TableCounts {
                users: 0,
                pages: 0,
                page_members: 0,
                comments: 0,
                reactions: 0,
                reports: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_member_email_fails() {
        let seeder = Seeder::new(setup_test_db().await);
        let mut plan = SeedPlan::sample();
        plan.members.push(MemberSeed {
            user: "ghost@example.com".to_string(),
            role: PageRole::Member,
        });

        let result = seeder.run_plan(&plan).await;
        assert!(matches!(
            result,
            Err(SeedError::UnknownUser(email)) if email == "ghost@example.com"
        ));
        assert_eq!(User::find().count(seeder.connection()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reply_before_parent_fails() {
        let seeder = Seeder::new(setup_test_db().await);
        let mut plan = SeedPlan::sample();
        plan.comments.reverse();

        let result = seeder.run_plan(&plan).await;
        assert!(matches!(result, Err(SeedError::UnknownComment(id)) if id == "top-comment1"));
        assert_eq!(Comment::find().count(seeder.connection()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_existing_rows_are_left_unchanged() {
        let seeder = Seeder::new(setup_test_db().await);
        let db = seeder.connection();

        let existing = UserActiveModel {
            id: Set(UserId::fixed("rahul-preexisting")),
            email: Set("rahul@example.com".to_string()),
            name: Set("Rahul Sharma".to_string()),
            password: Set("rotated".to_string()),
            role: Set(UserRole::Admin),
            created_at: Set(chrono::Utc::now()),
        };
        User::insert(existing).exec(db).await.unwrap();

        let summary = seeder.run().await.unwrap();
        assert_eq!(summary.users.inserted, 2);
        assert_eq!(summary.users.existing, 1);

        let rahul = User::find_by_id(UserId::fixed("rahul-preexisting"))
            .one(db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rahul.name, "Rahul Sharma");
        assert_eq!(rahul.password, "rotated");
        assert_eq!(rahul.role, UserRole::Admin);

        // Seeded rows hang off the pre-existing user id
        let top = Comment::find_by_id(CommentId::fixed("top-comment1"))
            .one(db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(top.user_id, rahul.id);
    }

    #[test]
    fn test_summary_display() {
        let mut summary = SeedSummary::default();
        summary.users.inserted = 3;
        summary.reports.existing = 1;

        let text = summary.to_string();
        assert!(text.starts_with("users: 3 new/0 kept"));
        assert!(text.ends_with("reports: 0 new/1 kept"));
    }

    #[tokio::test]
    async fn test_close_releases_connection() {
        let seeder = Seeder::new(setup_test_db().await);
        seeder.run().await.unwrap();
        seeder.close().await.expect("close should succeed");
    }
}
