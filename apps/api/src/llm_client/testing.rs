//! Scripted provider for workflow tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{AiProvider, CompletionRequest};
use crate::resilience::CallError;

/// Replays queued results in order; once the script runs out, repeats the last one.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, CallError>>>,
    last: Mutex<Option<Result<String, CallError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<String, CallError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(result: Result<String, CallError>) -> Self {
        Self::new(vec![result])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AiProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: &CompletionRequest<'_>) -> Result<String, CallError> {
        self.prompts.lock().unwrap().push(request.prompt.to_string());

        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(CallError::Transport("empty script".to_string()))),
        }
    }
}
