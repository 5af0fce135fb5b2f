use sea_orm::{
    sea_query::{ArrayType, Nullable, StringLen, ValueType, ValueTypeErr},
    DbErr, QueryResult, TryFromU64, TryGetError, TryGetable, Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// Identifiers are stored as text. Generated ids are UUIDv7 strings, fixed ids
// are whatever the caller supplies (e.g. "top-comment1").
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh, time ordered identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wraps a caller supplied identifier as is.
            pub fn fixed(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        // SeaORM trait implementations
        impl From<$name> for Value {
            fn from(id: $name) -> Self {
                Value::String(Some(Box::new(id.0)))
            }
        }

        impl TryGetable for $name {
            fn try_get_by<I: sea_orm::ColIdx>(
                res: &QueryResult,
                idx: I,
            ) -> Result<Self, TryGetError> {
                // Keeps TryGetError::Null intact so Option<$name> decodes NULL as None
                let s = <String as TryGetable>::try_get_by(res, idx)?;
                Ok(Self(s))
            }
        }

        impl ValueType for $name {
            fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
                match v {
                    Value::String(Some(s)) => Ok(Self(*s)),
                    _ => Err(ValueTypeErr),
                }
            }

            fn type_name() -> String {
                stringify!($name).to_owned()
            }

            fn array_type() -> ArrayType {
                ArrayType::String
            }

            fn column_type() -> sea_orm::ColumnType {
                sea_orm::ColumnType::String(StringLen::None)
            }
        }

        impl Nullable for $name {
            fn null() -> Value {
                Value::String(None)
            }
        }

        impl TryFromU64 for $name {
            fn try_from_u64(_: u64) -> Result<Self, DbErr> {
                Err(DbErr::ConvertFromU64(stringify!($name)))
            }
        }
    };
}

define_id!(UserId);
define_id!(PageId);
define_id!(CommentId);
define_id!(ReactionId);
define_id!(ReportId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_fixed_id_keeps_caller_value() {
        let id = CommentId::fixed("top-comment1");
        assert_eq!(id.as_str(), "top-comment1");
        assert_eq!(id, "top-comment1");
        assert_eq!(id.to_string(), "top-comment1");
    }

    #[test]
    fn test_id_value_conversion() {
        let id = ReportId::fixed("report-reply");
        let value: Value = id.clone().into();
        let back = <ReportId as ValueType>::try_from(value).unwrap();
        assert_eq!(back, id);

        let null = <ReportId as Nullable>::null();
        assert!(<ReportId as ValueType>::try_from(null).is_err());
    }

    #[tokio::test]
    async fn test_id_decodes_from_query_result() {
        use sea_orm::{ConnectionTrait, DbBackend, Statement};

        let db = crate::test_utils::setup_test_db().await;
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT 'top-comment1' AS id, NULL AS parent_id",
            ))
            .await
            .unwrap()
            .unwrap();

        let id: CommentId = row.try_get("", "id").unwrap();
        assert_eq!(id, "top-comment1");

        let parent: Option<CommentId> = row.try_get("", "parent_id").unwrap();
        assert_eq!(parent, None);

        let present: Option<CommentId> = row.try_get("", "id").unwrap();
        assert_eq!(present, Some(CommentId::fixed("top-comment1")));

        assert!(row.try_get::<CommentId>("", "parent_id").is_err());
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = PageId::fixed("page-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"page-1\"");
        let deserialized: PageId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
