use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::domain::{
    Questionnaire, QuestionnaireId, QuestionnaireResponse, RespondentId, ResponseId,
};

/// Source of fully hydrated questionnaires: questions, answer scores, age groups and
/// evaluation criteria all loaded.
pub trait QuestionnaireRepository: Send + Sync {
    fn fetch(&self, id: &QuestionnaireId) -> Result<Option<Questionnaire>, RepositoryError>;
    fn list(&self) -> Result<Vec<Questionnaire>, RepositoryError>;
}

/// Storage for submitted responses. Responses are written once and never updated.
pub trait ResponseRepository: Send + Sync {
    fn insert(
        &self,
        response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError>;
    fn fetch(&self, id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError>;
    /// Responses for one respondent, oldest first.
    fn for_respondent(
        &self,
        respondent: &RespondentId,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError>;
    /// Historical responses recorded against one questionnaire revision, oldest first.
    fn for_questionnaire(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryQuestionnaires {
    records: Arc<RwLock<HashMap<QuestionnaireId, Questionnaire>>>,
}

impl InMemoryQuestionnaires {
    pub fn with(questionnaires: impl IntoIterator<Item = Questionnaire>) -> Self {
        let records = questionnaires
            .into_iter()
            .map(|questionnaire| (questionnaire.id, questionnaire))
            .collect();
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub fn upsert(&self, questionnaire: Questionnaire) -> Result<(), RepositoryError> {
        let mut guard = self.records.write().map_err(poisoned)?;
        guard.insert(questionnaire.id, questionnaire);
        Ok(())
    }
}

impl QuestionnaireRepository for InMemoryQuestionnaires {
    fn fetch(&self, id: &QuestionnaireId) -> Result<Option<Questionnaire>, RepositoryError> {
        let guard = self.records.read().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Questionnaire>, RepositoryError> {
        let guard = self.records.read().map_err(poisoned)?;
        let mut questionnaires: Vec<Questionnaire> = guard.values().cloned().collect();
        questionnaires.sort_by(|a, b| a.name.cmp(&b.name).then(a.version.cmp(&b.version)));
        Ok(questionnaires)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryResponses {
    records: Arc<RwLock<HashMap<ResponseId, QuestionnaireResponse>>>,
}

impl InMemoryResponses {
    fn matching(
        &self,
        predicate: impl Fn(&QuestionnaireResponse) -> bool,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        let guard = self.records.read().map_err(poisoned)?;
        let mut responses: Vec<QuestionnaireResponse> = guard
            .values()
            .filter(|response| predicate(response))
            .cloned()
            .collect();
        responses.sort_by_key(|response| response.created_at);
        Ok(responses)
    }
}

impl ResponseRepository for InMemoryResponses {
    fn insert(
        &self,
        response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        let mut guard = self.records.write().map_err(poisoned)?;
        if guard.contains_key(&response.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(response.id, response.clone());
        Ok(response)
    }

    fn fetch(&self, id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError> {
        let guard = self.records.read().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn for_respondent(
        &self,
        respondent: &RespondentId,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        self.matching(|response| &response.respondent == respondent)
    }

    fn for_questionnaire(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        self.matching(|response| &response.questionnaire_id == questionnaire_id)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}
