use crate::types::{Project, ProjectId};
use tracing::debug;

/// Session-scoped list of projects, kept in creation order.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, project: Project) -> ProjectId {
        let id = project.id;
        debug!("Adding project '{}' ({})", project.name, id);
        self.projects.push(project);
        id
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn remove(&mut self, id: &ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|p| &p.id == id)?;
        debug!("Removing project {}", id);
        Some(self.projects.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectDraft;

    fn project(name: &str) -> Project {
        Project::new(ProjectDraft {
            name: name.to_string(),
            description: format!("{} description", name),
            keywords: vec!["k".to_string()],
            subreddits: vec!["r".to_string()],
        })
    }

    #[test]
    fn test_add_preserves_order() {
        let mut store = ProjectStore::new();
        assert!(store.is_empty());

        store.add(project("first"));
        store.add(project("second"));

        let names: Vec<_> = store.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_and_remove() {
        let mut store = ProjectStore::new();
        let id = store.add(project("acme"));
        let other = store.add(project("globex"));

        assert_eq!(store.get(&id).map(|p| p.name.as_str()), Some("acme"));

        let removed = store.remove(&id).expect("project should exist");
        assert_eq!(removed.name, "acme");
        assert!(store.get(&id).is_none());
        assert!(store.remove(&id).is_none());
        assert!(store.get(&other).is_some());
    }
}
