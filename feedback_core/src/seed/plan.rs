//! The rows a seed run writes.
//!
//! Users are referenced by email and comments by their fixed id, so a plan can be
//! written down before any database ids exist. The seeder resolves references in
//! order and refuses any that point at something not created earlier in the run.

use crate::entity::prelude::{PageRole, ReportReason, UserRole};
use crate::ids::{CommentId, ReactionId, ReportId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSeed {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSeed {
    pub slug: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSeed {
    /// Email of a user from the same plan.
    pub user: String,
    pub role: PageRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSeed {
    pub id: CommentId,
    /// Email of the author.
    pub author: String,
    /// Must name a comment that appears earlier in the plan.
    pub parent: Option<CommentId>,
    pub message: String,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSeed {
    pub id: ReactionId,
    pub comment: CommentId,
    pub user: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSeed {
    pub id: ReportId,
    pub comment: CommentId,
    pub reported_by: String,
    pub reason: ReportReason,
}

/// Everything written by one seed run, for a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub users: Vec<UserSeed>,
    pub page: PageSeed,
    pub members: Vec<MemberSeed>,
    /// Written in order; replies must follow their parent.
    pub comments: Vec<CommentSeed>,
    pub reactions: Vec<ReactionSeed>,
    pub reports: Vec<ReportSeed>,
}

impl SeedPlan {
    /// The development sample: three users, the `rahul-feedback` page, a short
    /// comment thread with one reaction and one spam report.
    pub fn sample() -> Self {
        let rahul = "rahul@example.com";
        let priya = "priya@example.com";
        let amit = "amit@example.com";

        Self {
            users: vec![
                user(rahul, "Rahul", "hashedpass1", UserRole::Member),
                user(priya, "Priya", "hashedpass2", UserRole::Member),
                user(amit, "Amit", "hashedpass3", UserRole::Admin),
            ],
            page: PageSeed {
                slug: "rahul-feedback".to_string(),
                title: "Feedback Page for Rahul".to_string(),
                description: "Drop your thoughts here".to_string(),
            },
            members: vec![
                MemberSeed {
                    user: rahul.to_string(),
                    role: PageRole::Owner,
                },
                MemberSeed {
                    user: priya.to_string(),
                    role: PageRole::Moderator,
                },
            ],
            comments: vec![
                CommentSeed {
                    id: CommentId::fixed("top-comment1"),
                    author: rahul.to_string(),
                    parent: None,
                    message: "This is a top-level comment".to_string(),
                    is_anonymous: false,
                },
                CommentSeed {
                    id: CommentId::fixed("top-comment2"),
                    author: rahul.to_string(),
                    parent: None,
                    message: "This is a top-level 2nd level comment".to_string(),
                    is_anonymous: true,
                },
                CommentSeed {
                    id: CommentId::fixed("reply-comment"),
                    author: priya.to_string(),
                    parent: Some(CommentId::fixed("top-comment1")),
                    message: "This is a reply".to_string(),
                    is_anonymous: false,
                },
            ],
            reactions: vec![ReactionSeed {
                id: ReactionId::fixed("reaction-top"),
                comment: CommentId::fixed("top-comment1"),
                user: amit.to_string(),
                emoji: "\u{1F44D}".to_string(),
            }],
            reports: vec![ReportSeed {
                id: ReportId::fixed("report-reply"),
                comment: CommentId::fixed("reply-comment"),
                reported_by: rahul.to_string(),
                reason: ReportReason::Spam,
            }],
        }
    }
}

fn user(email: &str, name: &str, password: &str, role: UserRole) -> UserSeed {
    UserSeed {
        email: email.to_string(),
        name: name.to_string(),
        password: password.to_string(),
        role,
    }
}
