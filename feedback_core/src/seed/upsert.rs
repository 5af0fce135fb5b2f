//! Insert-if-absent writes. Each function inserts with `ON CONFLICT (<key>) DO
//! NOTHING` and then reads the row back by the same key, so an existing row is
//! returned exactly as stored.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use tracing::debug;

use crate::entity::prelude::*;
use crate::error::SeedError;
use crate::ids::{CommentId, PageId, UserId};

use super::plan::{CommentSeed, PageSeed, ReactionSeed, ReportSeed, UserSeed};

/// A row after an upsert, and whether this call created it.
#[derive(Debug, Clone)]
pub struct Upserted<M> {
    pub model: M,
    pub inserted: bool,
}

async fn insert_if_absent<A, C>(db: &C, model: A, on_conflict: OnConflict) -> Result<bool, DbErr>
where
    A: ActiveModelTrait,
    C: ConnectionTrait,
{
    let result = <A::Entity as EntityTrait>::insert(model)
        .on_conflict(on_conflict)
        .do_nothing()
        .exec(db)
        .await?;

    Ok(matches!(result, TryInsertResult::Inserted(_)))
}

fn missing(entity: &'static str, key: impl ToString) -> SeedError {
    SeedError::MissingRow {
        entity,
        key: key.to_string(),
    }
}

/// Keyed by `email`.
pub async fn user<C: ConnectionTrait>(
    db: &C,
    seed: &UserSeed,
) -> Result<Upserted<UserModel>, SeedError> {
    let row = UserActiveModel {
        id: Set(UserId::new()),
        email: Set(seed.email.clone()),
        name: Set(seed.name.clone()),
        password: Set(seed.password.clone()),
        role: Set(seed.role),
        created_at: Set(Utc::now()),
    };
    let inserted = insert_if_absent(
        db,
        row,
        OnConflict::column(UserColumn::Email).do_nothing().to_owned(),
    )
    .await?;

    let model = User::find()
        .filter(UserColumn::Email.eq(seed.email.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| missing("user", &seed.email))?;

    debug!(email = %model.email, inserted, "upserted user");
    Ok(Upserted { model, inserted })
}

/// Keyed by `slug`.
pub async fn page<C: ConnectionTrait>(
    db: &C,
    seed: &PageSeed,
) -> Result<Upserted<PageModel>, SeedError> {
    let row = PageActiveModel {
        id: Set(PageId::new()),
        slug: Set(seed.slug.clone()),
        title: Set(seed.title.clone()),
        description: Set(seed.description.clone()),
        created_at: Set(Utc::now()),
    };
    let inserted = insert_if_absent(
        db,
        row,
        OnConflict::column(PageColumn::Slug).do_nothing().to_owned(),
    )
    .await?;

    let model = Page::find()
        .filter(PageColumn::Slug.eq(seed.slug.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| missing("page", &seed.slug))?;

    debug!(slug = %model.slug, inserted, "upserted page");
    Ok(Upserted { model, inserted })
}

/// Keyed by `(page_id, user_id)`.
pub async fn page_member<C: ConnectionTrait>(
    db: &C,
    page_id: &PageId,
    user_id: &UserId,
    role: PageRole,
) -> Result<Upserted<PageMemberModel>, SeedError> {
    let row = PageMemberActiveModel {
        page_id: Set(page_id.clone()),
        user_id: Set(user_id.clone()),
        role: Set(role),
        created_at: Set(Utc::now()),
    };
    let inserted = insert_if_absent(
        db,
        row,
        OnConflict::columns([PageMemberColumn::PageId, PageMemberColumn::UserId])
            .do_nothing()
            .to_owned(),
    )
    .await?;

    let model = PageMember::find_by_id((page_id.clone(), user_id.clone()))
        .one(db)
        .await?
        .ok_or_else(|| missing("page member", format!("{page_id}/{user_id}")))?;

    debug!(%page_id, %user_id, inserted, "upserted page member");
    Ok(Upserted { model, inserted })
}

/// Keyed by the fixed comment id.
pub async fn comment<C: ConnectionTrait>(
    db: &C,
    seed: &CommentSeed,
    page_id: &PageId,
    author_id: &UserId,
) -> Result<Upserted<CommentModel>, SeedError> {
    let row = CommentActiveModel {
        id: Set(seed.id.clone()),
        page_id: Set(page_id.clone()),
        user_id: Set(author_id.clone()),
        parent_id: Set(seed.parent.clone()),
        message: Set(seed.message.clone()),
        is_anonymous: Set(seed.is_anonymous),
        created_at: Set(Utc::now()),
    };
    let inserted = insert_if_absent(
        db,
        row,
        OnConflict::column(CommentColumn::Id).do_nothing().to_owned(),
    )
    .await?;

    let model = Comment::find_by_id(seed.id.clone())
        .one(db)
        .await?
        .ok_or_else(|| missing("comment", &seed.id))?;

    debug!(id = %model.id, reply = model.parent_id.is_some(), inserted, "upserted comment");
    Ok(Upserted { model, inserted })
}

/// Keyed by the fixed reaction id.
pub async fn reaction<C: ConnectionTrait>(
    db: &C,
    seed: &ReactionSeed,
    user_id: &UserId,
) -> Result<Upserted<ReactionModel>, SeedError> {
    let row = ReactionActiveModel {
        id: Set(seed.id.clone()),
        comment_id: Set(seed.comment.clone()),
        user_id: Set(user_id.clone()),
        emoji: Set(seed.emoji.clone()),
        created_at: Set(Utc::now()),
    };
    let inserted = insert_if_absent(
        db,
        row,
        OnConflict::column(ReactionColumn::Id).do_nothing().to_owned(),
    )
    .await?;

    let model = Reaction::find_by_id(seed.id.clone())
        .one(db)
        .await?
        .ok_or_else(|| missing("reaction", &seed.id))?;

    debug!(id = %model.id, inserted, "upserted reaction");
    Ok(Upserted { model, inserted })
}

/// Keyed by the fixed report id.
pub async fn report<C: ConnectionTrait>(
    db: &C,
    seed: &ReportSeed,
    page_id: &PageId,
    reported_by: &UserId,
) -> Result<Upserted<ReportModel>, SeedError> {
    let row = ReportActiveModel {
        id: Set(seed.id.clone()),
        comment_id: Set(seed.comment.clone()),
        page_id: Set(page_id.clone()),
        reported_by_id: Set(reported_by.clone()),
        reason: Set(seed.reason),
        created_at: Set(Utc::now()),
    };
    let inserted = insert_if_absent(
        db,
        row,
        OnConflict::column(ReportColumn::Id).do_nothing().to_owned(),
    )
    .await?;

    let model = Report::find_by_id(seed.id.clone())
        .one(db)
        .await?
        .ok_or_else(|| missing("report", &seed.id))?;

    debug!(id = %model.id, inserted, "upserted report");
    Ok(Upserted { model, inserted })
}

/// Checks that `comment` was written earlier in the run.
pub(super) fn require_comment<'a>(
    created: &'a [CommentId],
    comment: &CommentId,
) -> Result<&'a CommentId, SeedError> {
    created
        .iter()
        .find(|id| *id == comment)
        .ok_or_else(|| SeedError::UnknownComment(comment.clone()))
}
