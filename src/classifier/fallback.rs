//! Fallback classifier: asks the model for a category when no keyword rule
//! matched, and never fails.
//!
//! Every failure path (transport error, timeout, empty or unparseable
//! response, a label outside the catalog) degrades to the catalog's fallback
//! category, so a model outage can only ever cost answer quality, never the
//! reply itself.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{Catalog, Category};
use crate::classifier::model::{CompletionModel, CompletionRequest, ModelError};
use crate::classifier::prompt::classification_prompt;

/// Classification always runs at the lowest sampling temperature.
const CLASSIFY_TEMPERATURE: f32 = 0.0;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// How the classifier arrived at its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model answered with a known label.
    Recognised,
    /// The model answered, but not with a known label.
    Unrecognised(String),
    /// The model call failed or timed out.
    Failed(String),
}

/// Result of [`FallbackClassifier::classify_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// FallbackClassifier
// ---------------------------------------------------------------------------

/// Model-backed categorical classifier with a soft-fail contract.
#[derive(Clone)]
pub struct FallbackClassifier {
    model: Arc<dyn CompletionModel>,
    catalog: Arc<Catalog>,
    max_tokens: u32,
    timeout: Duration,
}

impl FallbackClassifier {
    /// * `max_tokens`: output cap for the answer (a label is one word).
    /// * `timeout`: upper bound on the whole model call, independent of any
    ///   timeout the model client applies itself.
    pub fn new(
        model: Arc<dyn CompletionModel>,
        catalog: Arc<Catalog>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            model,
            catalog,
            max_tokens,
            timeout,
        }
    }

    /// Classify `text` into one of the catalog's categories.  Never fails.
    pub async fn classify(&self, text: &str) -> Category {
        self.classify_detailed(text).await.category
    }

    /// Like [`classify`](Self::classify), also reporting why the category
    /// was chosen.
    pub async fn classify_detailed(&self, text: &str) -> Classification {
        let request = CompletionRequest {
            prompt: classification_prompt(
                text,
                &self.catalog.offered_categories(),
                self.catalog.catch_all(),
            ),
            max_tokens: self.max_tokens,
            temperature: CLASSIFY_TEMPERATURE,
        };

        let fallback = self.catalog.fallback();

        let answer = match tokio::time::timeout(self.timeout, self.model.complete(&request)).await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(err)) => {
                log::warn!("classifier call failed, using {fallback}: {err}");
                return Classification {
                    category: fallback,
                    outcome: Outcome::Failed(err.to_string()),
                };
            }
            Err(_elapsed) => {
                log::warn!(
                    "classifier call exceeded {:?}, using {fallback}",
                    self.timeout
                );
                return Classification {
                    category: fallback,
                    outcome: Outcome::Failed(ModelError::Timeout.to_string()),
                };
            }
        };

        match Category::from_label(&answer) {
            Some(category) => {
                log::debug!("classifier answered {category}");
                Classification {
                    category,
                    outcome: Outcome::Recognised,
                }
            }
            None => {
                log::warn!(
                    "classifier answered an unknown label (len={}), using {fallback}",
                    answer.len()
                );
                Classification {
                    category: fallback,
                    outcome: Outcome::Unrecognised(answer),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always answers with a fixed string and records the last request.
    struct Answers {
        answer: String,
        last: Mutex<Option<CompletionRequest>>,
    }

    impl Answers {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.into(),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for Answers {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
            *self.last.lock().unwrap() = Some(request.clone());
            Ok(self.answer.clone())
        }
    }

    /// Always fails with the given error kind.
    struct AlwaysFails(ErrorKind);

    enum ErrorKind {
        Request,
        Status,
        Parse,
        Empty,
    }

    #[async_trait]
    impl CompletionModel for AlwaysFails {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ModelError> {
            Err(match self.0 {
                ErrorKind::Request => ModelError::Request("connection refused".into()),
                ErrorKind::Status => ModelError::Status(500),
                ErrorKind::Parse => ModelError::Parse("bad json".into()),
                ErrorKind::Empty => ModelError::EmptyResponse,
            })
        }
    }

    /// Never answers.
    struct Hangs;

    #[async_trait]
    impl CompletionModel for Hangs {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ModelError> {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    fn classifier(model: Arc<dyn CompletionModel>) -> FallbackClassifier {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        FallbackClassifier::new(model, catalog, 15, Duration::from_secs(5))
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn recognised_label_is_returned() {
        let c = classifier(Arc::new(Answers::new("Payment")));
        let result = c.classify_detailed("asdkfjasldkf random text").await;
        assert_eq!(result.category, Category::Payment);
        assert_eq!(result.outcome, Outcome::Recognised);
    }

    #[tokio::test]
    async fn catch_all_label_is_accepted() {
        let c = classifier(Arc::new(Answers::new("Unrelated")));
        assert_eq!(c.classify("what's the weather").await, Category::Unrelated);
    }

    #[tokio::test]
    async fn decorated_label_is_accepted() {
        let c = classifier(Arc::new(Answers::new("\"Car_Repair\".")));
        assert_eq!(c.classify("my car").await, Category::CarRepair);
    }

    #[tokio::test]
    async fn unknown_label_falls_back_to_general_help() {
        let c = classifier(Arc::new(Answers::new("Weather")));
        let result = c.classify_detailed("is it raining").await;
        assert_eq!(result.category, Category::GeneralHelp);
        assert_eq!(result.outcome, Outcome::Unrecognised("Weather".into()));
    }

    #[tokio::test]
    async fn transport_errors_fall_back_to_general_help() {
        for kind in [ErrorKind::Request, ErrorKind::Status, ErrorKind::Parse, ErrorKind::Empty] {
            let c = classifier(Arc::new(AlwaysFails(kind)));
            let result = c.classify_detailed("anything").await;
            assert_eq!(result.category, Category::GeneralHelp);
            assert!(matches!(result.outcome, Outcome::Failed(_)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_model_times_out_to_general_help() {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let c = FallbackClassifier::new(Arc::new(Hangs), catalog, 15, Duration::from_secs(3));
        let result = c.classify_detailed("anything").await;
        assert_eq!(result.category, Category::GeneralHelp);
        assert_eq!(result.outcome, Outcome::Failed("model request timed out".into()));
    }

    #[tokio::test]
    async fn request_is_deterministic_and_capped() {
        let model = Arc::new(Answers::new("Price"));
        let c = classifier(model.clone());
        c.classify("ทำประตูเหล็กได้ไหม").await;

        let request = model.last.lock().unwrap().clone().expect("request recorded");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, 15);
        assert!(request.prompt.contains("ทำประตูเหล็กได้ไหม"));
        assert!(request.prompt.contains("General_Help"));
        assert!(!request.prompt.contains("[Owner, Car_Repair, Location, Ordering, General_Help, Payment, Price, Unrelated]"));
    }
}
