#[cfg(test)]
mod tests {
    use crate::{KeyValueStore, MentionCache, SqliteStore};
    use mentionhub_core::{AnalysisResult, Post, ProjectId};
    use std::env;
    use std::sync::Arc;

    async fn setup_test_db() -> SqliteStore {
        let db_path = env::temp_dir().join(format!("test_mentionhub_{}.db", uuid::Uuid::new_v4()));
        let db_url = format!("sqlite://{}", db_path.display());

        let mut db = SqliteStore::new(&db_url).expect("Failed to parse connection string");
        db.connect()
            .await
            .expect("Failed to connect to test database");
        db.run_migrations().await.expect("Failed to run migrations");

        db
    }

    #[tokio::test]
    async fn test_basic_functionality() {
        let db = setup_test_db().await;

        db.set("test_key", "test_value")
            .await
            .expect("Failed to save value");
        let value = db.get("test_key").await.expect("Failed to get value");
        assert_eq!(value, Some("test_value".to_string()));

        db.set("test_key", "updated").await.unwrap();
        assert_eq!(db.get("test_key").await.unwrap(), Some("updated".to_string()));

        db.remove("test_key").await.unwrap();
        assert_eq!(db.get("test_key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unconnected_store_errors() {
        let db = SqliteStore::new("sqlite::memory:").unwrap();
        assert!(db.get("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_open_path_with_url_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache?mode=ro#1").join("mentions#v1?.db");

        {
            let store = SqliteStore::open(&path).await.unwrap();
            store.set("mentions-x", "[]").await.unwrap();
        }
        assert!(path.exists());

        let store = SqliteStore::open(&path).await.unwrap();
        assert_eq!(store.get("mentions-x").await.unwrap(), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_mention_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mentions.db");
        let id = ProjectId::new();
        let result = AnalysisResult {
            matching_posts: vec![Post {
                post_id: "t3_xyz".to_string(),
                title: "Widget recommendations".to_string(),
                content: Some("Need a reliable widget".to_string()),
                url: "https://reddit.com/r/diy/comments/xyz".to_string(),
                subreddit: "diy".to_string(),
                matching_keywords: vec!["widget".to_string()],
                relevance_score: 80,
                formatted_date: "2024-05-03 10:15".to_string(),
                generated_reply: None,
            }],
        };

        {
            let store = SqliteStore::open(&path).await.unwrap();
            let cache = MentionCache::new(Arc::new(store));
            cache.store(&id, &result).await.unwrap();
        }

        let store = SqliteStore::open(&path).await.unwrap();
        let cache = MentionCache::new(Arc::new(store));
        assert_eq!(cache.load(&id).await.unwrap(), Some(result));
    }
}
