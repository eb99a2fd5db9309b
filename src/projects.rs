//! Project cards controller.
//!
//! Fetches the `Projects` sheet once and renders every valid row as a card,
//! in sheet order. There is no filtering; the page-level error handling is the
//! same as the blog listing's.

use crate::api::{ContentApi, Sheet, fetch_records};
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::records::{ProjectRecord, RecordKind};
use crate::render::{self, CardContext, RenderReport};

const NO_PROJECTS: &str = "No projects to display currently. Please add some to the sheet!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsState {
    Loading,
    Loaded,
    Error(String),
}

pub struct ProjectsController<'c> {
    config: &'c SiteConfig,
    state: ProjectsState,
    report: RenderReport,
}

impl<'c> ProjectsController<'c> {
    pub fn new(config: &'c SiteConfig) -> Self {
        Self {
            config,
            state: ProjectsState::Loading,
            report: RenderReport::default(),
        }
    }

    pub fn state(&self) -> &ProjectsState {
        &self.state
    }

    pub fn report(&self) -> &RenderReport {
        &self.report
    }

    pub fn load(&mut self, doc: &mut Document, api: Option<&dyn ContentApi>) -> &ProjectsState {
        let config = self.config;
        let ids = &config.elements;
        self.state = ProjectsState::Loading;

        let result = fetch_records::<ProjectRecord>(api, Sheet::Projects, RecordKind::Project);
        doc.remove(&ids.projects_loading);

        let Some(container) = doc.get_mut(&ids.projects_container) else {
            tracing::debug!("page has no #{} element", ids.projects_container);
            self.state = match result {
                Ok(_) => ProjectsState::Loaded,
                Err(e) => ProjectsState::Error(e.page_message("projects")),
            };
            return &self.state;
        };

        match result {
            Err(e) => {
                let message = e.page_message("projects");
                tracing::error!("{message}");
                container.replace_content(render::error_message(&message));
                self.state = ProjectsState::Error(message);
            }
            Ok(projects) if projects.is_empty() => {
                container.replace_content(render::notice(NO_PROJECTS));
                self.state = ProjectsState::Loaded;
            }
            Ok(projects) => {
                let batch = render::render_project_cards(&projects, &CardContext::from_config(config));
                container.replace_content(batch.markup);
                self.report = batch.report;
                self.state = ProjectsState::Loaded;
            }
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{StubApi, projects_doc};
    use serde_json::json;

    fn container(doc: &Document) -> &str {
        doc.get("projects-container").unwrap().content()
    }

    #[test]
    fn renders_valid_projects_in_sheet_order() {
        let config = SiteConfig::default();
        let mut doc = projects_doc(&config);
        let api = StubApi::ok(json!([
            {"id": 2, "title": "Second", "tags": "Rust"},
            {"title": "No id"},
            {"id": "1", "title": "First", "repoUrl": "https://git.example/first"}
        ]));
        let mut projects = ProjectsController::new(&config);
        assert_eq!(projects.load(&mut doc, Some(&api)), &ProjectsState::Loaded);

        let html = container(&doc);
        assert_eq!(html.matches(r#"class="project-card""#).count(), 2);
        assert!(html.find("Second").unwrap() < html.find("First").unwrap());
        assert!(html.contains("View Code"));
        assert_eq!(projects.report().skipped.len(), 1);
        assert!(doc.get("projects-loading").is_none());
        assert_eq!(api.requests(), vec![Sheet::Projects]);
    }

    #[test]
    fn empty_sheet_notice() {
        let config = SiteConfig::default();
        let mut doc = projects_doc(&config);
        let api = StubApi::ok(json!([]));
        let mut projects = ProjectsController::new(&config);
        projects.load(&mut doc, Some(&api));
        assert!(container(&doc).contains("No projects to display currently"));
    }

    #[test]
    fn reported_error() {
        let config = SiteConfig::default();
        let mut doc = projects_doc(&config);
        let api = StubApi::ok(json!({"error": true, "message": "sheet missing"}));
        let mut projects = ProjectsController::new(&config);
        projects.load(&mut doc, Some(&api));
        assert!(matches!(projects.state(), ProjectsState::Error(m) if m == "Error loading projects: sheet missing"));
        assert!(container(&doc).contains(r#"class="error-message""#));
    }

    #[test]
    fn configuration_error_without_fetch() {
        let config = SiteConfig::default();
        let mut doc = projects_doc(&config);
        let mut projects = ProjectsController::new(&config);
        projects.load(&mut doc, None);
        assert!(container(&doc).contains("API URL configuration error. Cannot load projects."));
        assert!(doc.get("projects-loading").is_none());
    }

    #[test]
    fn missing_container_still_settles_state() {
        let config = SiteConfig::default();
        let mut doc = Document::new("Home");
        let api = StubApi::status(404, "");
        let mut projects = ProjectsController::new(&config);
        assert!(matches!(projects.load(&mut doc, Some(&api)), ProjectsState::Error(_)));
    }
}
