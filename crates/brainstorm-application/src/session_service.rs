//! Session service implementation.
//!
//! `SessionService` is the single entry point for every session and idea use
//! case. It validates input, drives the repository and the idea generator, and
//! maps entities to views. It never touches storage directly.

use std::sync::Arc;

use brainstorm_core::error::{BrainstormError, Result};
use brainstorm_core::generator::{AI_ASSISTANT, IdeaGenerator};
use brainstorm_core::idea::{IdeaId, IdeaPatch, NewIdea, VoteType};
use brainstorm_core::repository::BrainstormRepository;
use brainstorm_core::session::{NewSession, SessionId, SessionPatch};

use crate::validation;
use crate::view::{IdeaView, SessionView};

/// Use cases for sessions, ideas and voting.
///
/// # Responsibilities
///
/// - Validating topics, idea text and creator names
/// - Seeding new sessions with a generated idea batch
/// - Applying votes as isolated deltas
/// - Translating "absent" repository results into `NotFound` errors
#[derive(Clone)]
pub struct SessionService {
    repository: Arc<dyn BrainstormRepository>,
    generator: IdeaGenerator,
}

impl SessionService {
    /// Creates a new `SessionService`.
    ///
    /// # Arguments
    ///
    /// * `repository` - Owner of all session and idea state
    /// * `generator` - Source of templated idea batches
    pub fn new(repository: Arc<dyn BrainstormRepository>, generator: IdeaGenerator) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Creates a session and seeds it with a generated batch.
    ///
    /// The session is persisted before generation starts. If generation fails
    /// the error is returned and the (possibly partially seeded) session stays.
    pub async fn create_session(
        &self,
        topic: String,
        created_by: Option<String>,
    ) -> Result<SessionView> {
        validation::topic(&topic)?;
        let created_by = validation::creator(created_by)?;
        tracing::info!("[SessionService] Creating session: {}", topic);

        let session = self
            .repository
            .create_session(NewSession { topic, created_by })
            .await?;

        self.generate_ideas_for_session(session.id).await?;
        self.get_session(session.id).await
    }

    pub async fn get_session(&self, id: SessionId) -> Result<SessionView> {
        tracing::info!("[SessionService] Getting session {}", id);
        match self.repository.get_session(id).await? {
            Some(session) => Ok(session.into()),
            None => Err(self.missing("Session", id)),
        }
    }

    /// All sessions, newest first, each with its ideas in listing order.
    pub async fn list_sessions(&self) -> Result<Vec<SessionView>> {
        tracing::info!("[SessionService] Listing sessions");
        let sessions = self.repository.list_sessions().await?;
        Ok(sessions.into_iter().map(SessionView::from).collect())
    }

    pub async fn rename_session(&self, id: SessionId, topic: String) -> Result<SessionView> {
        validation::topic(&topic)?;
        tracing::info!("[SessionService] Renaming session {}: {}", id, topic);

        match self
            .repository
            .update_session(id, SessionPatch { topic })
            .await?
        {
            Some(session) => Ok(session.into()),
            None => Err(self.missing("Session", id)),
        }
    }

    /// Deletes a session together with all of its ideas.
    pub async fn delete_session(&self, id: SessionId) -> Result<()> {
        tracing::info!("[SessionService] Deleting session {}", id);
        if self.repository.delete_session(id).await? {
            Ok(())
        } else {
            Err(self.missing("Session", id))
        }
    }

    /// Adds a participant idea with zero votes.
    pub async fn add_idea(
        &self,
        session_id: SessionId,
        content: String,
        category: String,
        created_by: Option<String>,
    ) -> Result<IdeaView> {
        validation::content(&content)?;
        validation::category(&category)?;
        let created_by = validation::creator(created_by)?;
        tracing::info!("[SessionService] Adding idea to session {}", session_id);

        let idea = self
            .repository
            .create_idea(NewIdea {
                session_id,
                content,
                category,
                created_by,
            })
            .await
            .inspect_err(|e| {
                if e.is_not_found() {
                    tracing::warn!("[SessionService] Session {} not found", session_id);
                }
            })?;

        Ok(idea.into())
    }

    pub async fn get_idea(&self, id: IdeaId) -> Result<IdeaView> {
        tracing::info!("[SessionService] Getting idea {}", id);
        match self.repository.get_idea(id).await? {
            Some(idea) => Ok(idea.into()),
            None => Err(self.missing("Idea", id)),
        }
    }

    /// The ideas of one session in listing order.
    pub async fn list_ideas(&self, session_id: SessionId) -> Result<Vec<IdeaView>> {
        tracing::info!("[SessionService] Listing ideas of session {}", session_id);
        if !self.repository.session_exists(session_id).await? {
            return Err(self.missing("Session", session_id));
        }

        let ideas = self.repository.list_ideas_for_session(session_id).await?;
        Ok(ideas.into_iter().map(IdeaView::from).collect())
    }

    /// Replaces the text fields that are given. Votes are left untouched.
    pub async fn edit_idea(
        &self,
        id: IdeaId,
        content: Option<String>,
        category: Option<String>,
    ) -> Result<IdeaView> {
        let patch = IdeaPatch {
            content,
            category,
            votes: None,
        };
        if patch.is_empty() {
            return Err(BrainstormError::validation(
                "At least one of content or category is required",
            ));
        }
        if let Some(content) = &patch.content {
            validation::content(content)?;
        }
        if let Some(category) = &patch.category {
            validation::category(category)?;
        }
        tracing::info!("[SessionService] Editing idea {}", id);

        match self.repository.update_idea(id, patch).await? {
            Some(idea) => Ok(idea.into()),
            None => Err(self.missing("Idea", id)),
        }
    }

    /// Applies +1 (`Up`) or -1 (`Down`). Counts may go negative.
    pub async fn vote_on_idea(&self, id: IdeaId, vote: VoteType) -> Result<IdeaView> {
        tracing::info!("[SessionService] Voting {} on idea {}", vote, id);
        match self.repository.apply_vote(id, vote.delta()).await? {
            Some(idea) => Ok(idea.into()),
            None => Err(self.missing("Idea", id)),
        }
    }

    pub async fn delete_idea(&self, id: IdeaId) -> Result<()> {
        tracing::info!("[SessionService] Deleting idea {}", id);
        if self.repository.delete_idea(id).await? {
            Ok(())
        } else {
            Err(self.missing("Idea", id))
        }
    }

    /// Generates one batch from the session topic and persists it.
    ///
    /// Returns the new ideas in generation order.
    pub async fn generate_ideas_for_session(&self, session_id: SessionId) -> Result<Vec<IdeaView>> {
        tracing::info!("[SessionService] Generating ideas for session {}", session_id);
        let Some(session) = self.repository.get_session(session_id).await? else {
            return Err(self.missing("Session", session_id));
        };

        let mut created = Vec::new();
        for generated in self.generator.generate(&session.topic) {
            let idea = self
                .repository
                .create_idea(NewIdea {
                    session_id,
                    content: generated.content,
                    category: generated.category,
                    created_by: AI_ASSISTANT.to_string(),
                })
                .await?;
            created.push(IdeaView::from(idea));
        }

        tracing::debug!(
            "[SessionService] Generated {} ideas for session {}",
            created.len(),
            session_id
        );
        Ok(created)
    }

    fn missing(&self, entity_type: &'static str, id: u64) -> BrainstormError {
        tracing::warn!("[SessionService] {} {} not found", entity_type, id);
        BrainstormError::not_found(entity_type, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainstorm_core::generator::{
        GENERATION_BATCH_SIZE, IdeaTemplate, TemplateShuffler, template_categories,
    };
    use brainstorm_infrastructure::JsonFileBrainstormRepository;
    use std::collections::HashSet;
    use tempfile::TempDir;

    /// Keeps declaration order so batches are predictable.
    struct Identity;

    impl TemplateShuffler for Identity {
        fn shuffle(&self, _templates: &mut [IdeaTemplate]) {}
    }

    async fn create_test_service() -> (SessionService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonFileBrainstormRepository::open(temp_dir.path())
            .await
            .unwrap();
        let service = SessionService::new(
            Arc::new(repository),
            IdeaGenerator::new(Arc::new(Identity)),
        );
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_create_session_seeds_generated_ideas() {
        let (service, _temp_dir) = create_test_service().await;

        let session = service
            .create_session("remote work".to_string(), None)
            .await
            .unwrap();

        assert_eq!(session.topic, "remote work");
        assert_eq!(session.created_by, "Anonymous");
        assert_eq!(session.ideas.len(), GENERATION_BATCH_SIZE);
        for idea in &session.ideas {
            assert!(idea.content.contains("remote work"));
            assert_eq!(idea.votes, 0);
            assert_eq!(idea.created_by, "AI Assistant");
            assert_eq!(idea.session_id, session.id);
        }
    }

    #[tokio::test]
    async fn test_generated_batch_uses_known_categories_and_distinct_content() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service
            .create_session("coffee".to_string(), Some("Ann".to_string()))
            .await
            .unwrap();

        let ideas = service.generate_ideas_for_session(session.id).await.unwrap();

        let known: HashSet<_> = template_categories().collect();
        assert!(ideas.iter().all(|i| known.contains(i.category.as_str())));
        let contents: HashSet<_> = ideas.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents.len(), GENERATION_BATCH_SIZE);

        let ids: Vec<_> = ideas.iter().map(|i| i.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ideas[0].category, "Technology");

        let session = service.get_session(session.id).await.unwrap();
        assert_eq!(session.ideas.len(), 2 * GENERATION_BATCH_SIZE);
    }

    #[tokio::test]
    async fn test_create_session_rejects_invalid_topic() {
        let (service, _temp_dir) = create_test_service().await;

        let too_long = "x".repeat(201);
        for topic in ["", "   ", too_long.as_str()] {
            let err = service
                .create_session(topic.to_string(), None)
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(service.list_sessions().await.unwrap().is_empty());

        assert!(
            service
                .create_session("x".repeat(200), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_created_at_format() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();

        let parsed =
            chrono::NaiveDateTime::parse_from_str(&session.created_at, "%Y-%m-%d %H:%M:%S");
        assert!(parsed.is_ok());
        assert_eq!(session.created_at.len(), 19);
    }

    #[tokio::test]
    async fn test_votes_move_by_one_and_can_go_negative() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();
        let idea_id = session.ideas[0].id;

        service.vote_on_idea(idea_id, VoteType::Up).await.unwrap();
        service.vote_on_idea(idea_id, VoteType::Up).await.unwrap();
        let idea = service.vote_on_idea(idea_id, VoteType::Down).await.unwrap();
        assert_eq!(idea.votes, 1);

        let other = session.ideas[1].id;
        let idea = service.vote_on_idea(other, VoteType::Down).await.unwrap();
        assert_eq!(idea.votes, -1);
    }

    #[tokio::test]
    async fn test_session_ideas_listed_by_votes() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();
        let last = session.ideas.last().unwrap().id;
        let first = session.ideas[0].id;

        service.vote_on_idea(last, VoteType::Up).await.unwrap();
        service.vote_on_idea(first, VoteType::Down).await.unwrap();

        let session = service.get_session(session.id).await.unwrap();
        assert_eq!(session.ideas[0].id, last);
        assert_eq!(session.ideas.last().unwrap().id, first);
        let votes: Vec<_> = session.ideas.iter().map(|i| i.votes).collect();
        assert!(votes.windows(2).all(|w| w[0] >= w[1]));

        let listed = service.list_ideas(session.id).await.unwrap();
        assert_eq!(listed, session.ideas);
    }

    #[tokio::test]
    async fn test_add_idea_validates_and_defaults_creator() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();

        let idea = service
            .add_idea(session.id, "Matcha".to_string(), "Product".to_string(), None)
            .await
            .unwrap();
        assert_eq!(idea.votes, 0);
        assert_eq!(idea.created_by, "Anonymous");
        assert_eq!(idea.session_id, session.id);

        let err = service
            .add_idea(session.id, "x".repeat(501), "Product".to_string(), None)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add_idea(session.id, "Chai".to_string(), "".to_string(), None)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (service, _temp_dir) = create_test_service().await;

        assert!(service.get_session(99).await.unwrap_err().is_not_found());
        assert!(service.delete_session(99).await.unwrap_err().is_not_found());
        assert!(service.list_ideas(99).await.unwrap_err().is_not_found());
        assert!(
            service
                .rename_session(99, "t".to_string())
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            service
                .generate_ideas_for_session(99)
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            service
                .add_idea(99, "c".to_string(), "k".to_string(), None)
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(service.get_idea(99).await.unwrap_err().is_not_found());
        assert!(
            service
                .vote_on_idea(99, VoteType::Up)
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(service.delete_idea(99).await.unwrap_err().is_not_found());
        assert!(
            service
                .edit_idea(99, Some("c".to_string()), None)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_delete_session_removes_its_ideas() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();
        let survivor = service.create_session("coffee".to_string(), None).await.unwrap();

        service.delete_session(session.id).await.unwrap();

        assert!(service.get_session(session.id).await.unwrap_err().is_not_found());
        for idea in &session.ideas {
            assert!(service.get_idea(idea.id).await.unwrap_err().is_not_found());
        }
        let survivor = service.get_session(survivor.id).await.unwrap();
        assert_eq!(survivor.ideas.len(), GENERATION_BATCH_SIZE);
    }

    #[tokio::test]
    async fn test_edit_idea_keeps_votes() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();
        let idea = &session.ideas[0];
        service.vote_on_idea(idea.id, VoteType::Up).await.unwrap();

        let edited = service
            .edit_idea(idea.id, Some("Iced tea bar".to_string()), None)
            .await
            .unwrap();

        assert_eq!(edited.content, "Iced tea bar");
        assert_eq!(edited.category, idea.category);
        assert_eq!(edited.votes, 1);

        let err = service.edit_idea(idea.id, None, None).await.unwrap_err();
        assert!(err.is_validation());
        let err = service
            .edit_idea(idea.id, None, Some(" ".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_edits_keep_each_field() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();
        let idea_id = session.ideas[0].id;

        let content_service = service.clone();
        let content_edit = tokio::spawn(async move {
            content_service
                .edit_idea(idea_id, Some("Tea tasting flights".to_string()), None)
                .await
                .unwrap();
        });
        let category_service = service.clone();
        let category_edit = tokio::spawn(async move {
            category_service
                .edit_idea(idea_id, None, Some("Events".to_string()))
                .await
                .unwrap();
        });
        content_edit.await.unwrap();
        category_edit.await.unwrap();

        let idea = service.get_idea(idea_id).await.unwrap();
        assert_eq!(idea.content, "Tea tasting flights");
        assert_eq!(idea.category, "Events");
    }

    #[tokio::test]
    async fn test_rename_session() {
        let (service, _temp_dir) = create_test_service().await;
        let session = service.create_session("tea".to_string(), None).await.unwrap();

        let renamed = service
            .rename_session(session.id, "green tea".to_string())
            .await
            .unwrap();
        assert_eq!(renamed.topic, "green tea");
        assert_eq!(renamed.ideas.len(), GENERATION_BATCH_SIZE);

        assert!(
            service
                .rename_session(session.id, "".to_string())
                .await
                .unwrap_err()
                .is_validation()
        );
    }

    #[tokio::test]
    async fn test_list_sessions_newest_first() {
        let (service, _temp_dir) = create_test_service().await;
        let first = service.create_session("a".to_string(), None).await.unwrap();
        let second = service.create_session("b".to_string(), None).await.unwrap();

        let sessions = service.list_sessions().await.unwrap();
        let ids: Vec<_> = sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
