use analysis_client::AnalysisService;
use async_trait::async_trait;
use mentionhub_core::{
    AnalysisApiError, AnalysisOperation, AnalysisResult, CoreError, KeywordAnalysis,
    MatchRequest, Post, Project, ProjectDraft,
};
use std::sync::Mutex;

/// Canned analysis service that records match requests.
pub struct StubService {
    initial: Result<KeywordAnalysis, AnalysisApiError>,
    matching: Result<AnalysisResult, AnalysisApiError>,
    match_requests: Mutex<Vec<MatchRequest>>,
}

impl StubService {
    pub fn matching(matching: Result<AnalysisResult, AnalysisApiError>) -> Self {
        Self {
            initial: Err(AnalysisApiError::RequestFailed {
                operation: AnalysisOperation::InitialAnalysis,
                status_code: 500,
            }),
            matching,
            match_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn match_requests(&self) -> Vec<MatchRequest> {
        self.match_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisService for StubService {
    async fn analyze_initial(
        &self,
        _name: &str,
        _description: &str,
    ) -> Result<KeywordAnalysis, CoreError> {
        self.initial.clone().map_err(CoreError::from)
    }

    async fn match_posts(&self, request: &MatchRequest) -> Result<AnalysisResult, CoreError> {
        self.match_requests.lock().unwrap().push(request.clone());
        self.matching.clone().map_err(CoreError::from)
    }
}

pub fn acme_project() -> Project {
    Project::new(ProjectDraft {
        name: "Acme".to_string(),
        description: "widget maker".to_string(),
        keywords: vec!["widget".to_string(), "gadget".to_string()],
        subreddits: vec!["diy".to_string(), "gadgets".to_string()],
    })
}

pub fn sample_post(post_id: &str, score: i64, reply: Option<&str>) -> Post {
    Post {
        post_id: post_id.to_string(),
        title: format!("Anyone tried Acme widgets? ({})", post_id),
        content: Some("Thinking about buying one".to_string()),
        url: format!("https://www.reddit.com/r/diy/comments/{}", post_id),
        subreddit: "diy".to_string(),
        matching_keywords: vec!["widget".to_string()],
        relevance_score: score,
        formatted_date: "2024-05-01 09:30".to_string(),
        generated_reply: reply.map(String::from),
    }
}

pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        matching_posts: vec![
            sample_post("t3_one", 91, Some("Acme widgets handle exactly this.")),
            sample_post("t3_two", 55, None),
        ],
    }
}
