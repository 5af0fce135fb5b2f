// SeaORM entities for the feedback schema. Tables are created by
// `models::migrator`; column names follow the field names here.

pub mod comment;
pub mod page;
pub mod page_member;
pub mod reaction;
pub mod report;
pub mod user;


pub mod prelude {
    // Re-export all entities for convenience
    pub use super::comment::{
        ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as Comment,
        Model as CommentModel,
    };
    pub use super::page::{
        ActiveModel as PageActiveModel, Column as PageColumn, Entity as Page, Model as PageModel,
    };
    pub use super::page_member::{
        ActiveModel as PageMemberActiveModel, Column as PageMemberColumn, Entity as PageMember,
        Model as PageMemberModel, PageRole,
    };
    pub use super::reaction::{
        ActiveModel as ReactionActiveModel, Column as ReactionColumn, Entity as Reaction,
        Model as ReactionModel,
    };
    pub use super::report::{
        ActiveModel as ReportActiveModel, Column as ReportColumn, Entity as Report,
        Model as ReportModel, ReportReason,
    };
    pub use super::user::{
        ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
        UserRole,
    };

    // Re-export commonly used SeaORM types and traits
    pub use sea_orm::{
        ActiveModelTrait,
        ActiveValue,

        ColumnTrait,
        ConnectionTrait,

        // Database and connection types
        Database,
        DatabaseConnection,
        DatabaseTransaction,
        DbConn,
        // Common result types
        DbErr,

        // Core traits
        EntityTrait,
        ModelTrait,
        NotSet,
        PaginatorTrait,
        QueryFilter,
        QueryOrder,
        Related,
        // Active model helpers
        Set,
        TransactionTrait,
        TryInsertResult,
    };
}
