use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Client-generated project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Everything the creation form collects before a project gets an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub subreddits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub subreddits: Vec<String>,
}

impl Project {
    pub fn new(draft: ProjectDraft) -> Self {
        Self {
            id: ProjectId::new(),
            name: draft.name,
            description: draft.description,
            keywords: draft.keywords,
            subreddits: draft.subreddits,
        }
    }

    /// The first `limit` keywords plus how many were left out.
    pub fn keyword_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.keywords.len().min(limit);
        (&self.keywords[..shown], self.keywords.len() - shown)
    }

    pub fn match_request(&self, post_limit: u32) -> MatchRequest {
        MatchRequest {
            keywords: self.keywords.clone(),
            subreddits: self.subreddits.clone(),
            post_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitialAnalysisRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub keywords: Vec<String>,
    pub subreddits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub keywords: Vec<String>,
    pub subreddits: Vec<String>,
    pub post_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub matching_posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
    pub subreddit: String,
    pub matching_keywords: Vec<String>,
    #[serde(deserialize_with = "relevance_score")]
    pub relevance_score: i64,
    pub formatted_date: String,
    #[serde(default)]
    pub generated_reply: Option<String>,
}

/// Scores arrive as integers, but some services emit them as floats like `87.0`.
fn relevance_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Score {
        Int(i64),
        Float(f64),
    }

    match Score::deserialize(deserializer)? {
        Score::Int(score) => Ok(score),
        Score::Float(score) if score.is_finite() => Ok(score.round() as i64),
        Score::Float(score) => Err(de::Error::custom(format!(
            "relevance score must be finite, got {}",
            score
        ))),
    }
}

impl Post {
    pub fn reply(&self) -> Option<&str> {
        self.generated_reply.as_deref().filter(|r| !r.is_empty())
    }

    pub fn has_reply(&self) -> bool {
        self.reply().is_some()
    }

    pub fn snippet(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            post_id: "abc123".to_string(),
            title: "Looking for a widget maker".to_string(),
            content: Some("Any recommendations?".to_string()),
            url: "https://reddit.com/r/diy/comments/abc123".to_string(),
            subreddit: "diy".to_string(),
            matching_keywords: vec!["widget".to_string()],
            relevance_score: 87,
            formatted_date: "2024-03-01 12:00".to_string(),
            generated_reply: None,
        }
    }

    #[test]
    fn test_project_ids_are_unique() {
        let draft = ProjectDraft {
            name: "Acme".to_string(),
            description: "widget maker".to_string(),
            ..Default::default()
        };
        let a = Project::new(draft.clone());
        let b = Project::new(draft);
        assert_ne!(a.id, b.id);
        assert_eq!(ProjectId::parse(&a.id.to_string()), Some(a.id));
    }

    #[test]
    fn test_keyword_preview() {
        let project = Project::new(ProjectDraft {
            name: "Acme".to_string(),
            description: "widget maker".to_string(),
            keywords: vec!["a", "b", "c", "d", "e"]
                .into_iter()
                .map(String::from)
                .collect(),
            subreddits: vec![],
        });
        let (shown, hidden) = project.keyword_preview(3);
        assert_eq!(shown, &["a", "b", "c"]);
        assert_eq!(hidden, 2);

        let (shown, hidden) = project.keyword_preview(10);
        assert_eq!(shown.len(), 5);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_post_optional_fields_default_to_none() {
        let json = r#"{
            "post_id": "p1",
            "title": "t",
            "url": "https://example.com",
            "subreddit": "rust",
            "matching_keywords": ["k"],
            "relevance_score": 42,
            "formatted_date": "today"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.content, None);
        assert!(!post.has_reply());
    }

    #[test]
    fn test_reply_presence() {
        let mut post = sample_post();
        assert_eq!(post.reply(), None);

        post.generated_reply = Some(String::new());
        assert!(!post.has_reply());

        post.generated_reply = Some("Check out Acme widgets!".to_string());
        assert_eq!(post.reply(), Some("Check out Acme widgets!"));
    }

    #[test]
    fn test_analysis_result_requires_matching_posts() {
        assert!(serde_json::from_str::<AnalysisResult>("{}").is_err());

        let result = AnalysisResult {
            matching_posts: vec![sample_post()],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_float_relevance_scores_are_rounded() {
        let with_score = |score: &str| {
            format!(
                r#"{{"post_id":"abc","title":"t","url":"https://reddit.com/r/diy/abc",
                   "subreddit":"diy","matching_keywords":["widget"],
                   "relevance_score":{},"formatted_date":"2024-03-01"}}"#,
                score
            )
        };

        let post: Post = serde_json::from_str(&with_score("87.0")).unwrap();
        assert_eq!(post.relevance_score, 87);

        let post: Post = serde_json::from_str(&with_score("79.6")).unwrap();
        assert_eq!(post.relevance_score, 80);

        let post: Post = serde_json::from_str(&with_score("42")).unwrap();
        assert_eq!(post.relevance_score, 42);

        assert!(serde_json::from_str::<Post>(&with_score(r#""high""#)).is_err());
    }
}
