use std::time::Instant;

use log::{ error, info };

use crate::cancellation::CancellationToken;
use crate::errors::{ QaError, QaResult };
use crate::implementations::classifier::Classifier;
use crate::implementations::drafter::Drafter;
use crate::implementations::retriever::Retriever;
use crate::models::artifact::PipelineResult;
use crate::models::trace::{ TraceEvent, TraceRecord };

/// Single-pass route -> retrieve -> draft path
#[derive(Clone)]
pub struct PipelineCoordinator {
    classifier: Classifier,
    retriever: Retriever,
    drafter: Drafter,
    model: String,
}

impl PipelineCoordinator {
    pub fn new(classifier: Classifier, retriever: Retriever, drafter: Drafter, model: String) -> Self {
        Self { classifier, retriever, drafter, model }
    }

    /// Run the three stages in order. A missing grounding document stops the run
    /// with `NoGrounding` before any drafting happens.
    pub async fn run(&self, query: &str, cancel: &CancellationToken) -> QaResult<PipelineResult> {
        let started = Instant::now();
        let mut trace = TraceRecord::start(self.model.clone());
        info!("Pipeline {} starting", trace.run_id);

        cancel.check("classification")?;
        let category = self.classifier.classify(query).await?;
        trace.record(TraceEvent::Routed { category: category.to_string() });

        cancel.check("retrieval")?;
        let document = match self.retriever.retrieve(query, category).await? {
            Some(doc) => doc,
            None => {
                error!("Pipeline {} has no grounding for '{}'", trace.run_id, category);
                return Err(QaError::NoGrounding { category: category.to_string() });
            }
        };
        trace.record(TraceEvent::Retrieved {
            document: document.text.clone(),
            source: document.source().to_string(),
        });

        cancel.check("drafting")?;
        let artifact = self.drafter.draft(query, &document).await?;
        trace.record(TraceEvent::Drafted { characters: artifact.as_str().len() });

        trace.finish(started.elapsed());
        info!(
            "Pipeline {} finished in {} ms",
            trace.run_id,
            trace.elapsed_ms().unwrap_or_default()
        );

        Ok(PipelineResult {
            category,
            document,
            artifact,
            trace,
        })
    }
}
