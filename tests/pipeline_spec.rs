//! Specs for the stage machine itself, exercised at the `stages::run` seam
//! with stub collaborators.

use std::sync::Mutex;

use async_trait::async_trait;

use weld::agent::{AgentError, AgentInvoker, AgentReply, InvokeContext, Prompt};
use weld::models::{CapabilityFields, InvokeRequest, Phase, ProjectFile, StageOutput};
use weld::stages::{self, ArtifactWrite, StageError, StageInput};
use weld::store::{ArtifactStore, MemoryArtifactStore};

struct StubAgent {
    reply: Option<String>,
    prompts: Mutex<Vec<Prompt>>,
}

impl StubAgent {
    fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn silent() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn last_prompt(&self) -> Prompt {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("agent was never invoked")
    }
}

#[async_trait]
impl AgentInvoker for StubAgent {
    async fn invoke(&self, prompt: &Prompt, _ctx: &InvokeContext) -> Result<AgentReply, AgentError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(AgentReply {
            output: self.reply.clone(),
        })
    }
}

fn request(session_id: &str) -> InvokeRequest {
    serde_json::from_value(serde_json::json!({
        "session_id": session_id,
        "docslink": "https://docs.provider.example/api",
        "project": "proj-1",
    }))
    .unwrap()
}

fn input<'a>(
    req: &'a InvokeRequest,
    caps: &'a CapabilityFields,
    file_contents: &'a str,
) -> StageInput<'a> {
    StageInput {
        request: req,
        capabilities: caps,
        file_contents,
    }
}

fn artifact_names(writes: &[ArtifactWrite]) -> Vec<String> {
    writes
        .iter()
        .map(|w| match w {
            ArtifactWrite::Put(file) => file.name.clone(),
            ArtifactWrite::UpdateCode { name, .. } => name.clone(),
        })
        .collect()
}

mod doc_review {
    use super::*;

    #[tokio::test]
    async fn persists_the_raw_review_and_carries_it_forward() {
        let agent = StubAgent::replying("```python\nschema\n```");
        let artifacts = MemoryArtifactStore::new();
        let req = request("s");
        let caps = CapabilityFields::default();

        let outcome = stages::run(Phase::DocReview, input(&req, &caps, ""), &agent, &artifacts)
            .await
            .unwrap();

        assert_eq!(outcome.stage, 1);
        // Persisted raw, returned formatted.
        match &outcome.writes[..] {
            [ArtifactWrite::Put(file)] => {
                assert_eq!(file.name, "integrationStrategy.txt");
                assert_eq!(file.code, "```python\nschema\n```");
            }
            other => panic!("unexpected writes: {other:?}"),
        }
        assert_eq!(outcome.output, StageOutput::Text("schema\n".to_string()));
        assert_eq!(
            outcome.next,
            Phase::Backend {
                doc_review: Some("```python\nschema\n```".to_string())
            }
        );
    }
}

mod ui_stage {
    use super::*;

    #[tokio::test]
    async fn writes_every_suggested_file_with_aligned_paths() {
        let agent = StubAgent::replying("// component");
        let artifacts = MemoryArtifactStore::new();
        let mut req = request("s");
        req.suggested_files = vec!["Widget.js".to_string(), "Panel.js".to_string()];
        // Path list shorter than the file list: second file has no path.
        req.suggested_file_paths = vec!["src/Widget.js".to_string()];
        let caps = CapabilityFields::default();

        let outcome = stages::run(
            Phase::Ui {
                backend_code: "# backend".to_string(),
            },
            input(&req, &caps, ""),
            &agent,
            &artifacts,
        )
        .await
        .unwrap();

        assert_eq!(outcome.stage, 3);
        assert_eq!(artifact_names(&outcome.writes), vec!["Widget.js", "Panel.js"]);
        match &outcome.writes[..] {
            [ArtifactWrite::Put(first), ArtifactWrite::Put(second)] => {
                assert_eq!(first.repo_path.as_deref(), Some("src/Widget.js"));
                assert!(second.repo_path.is_none());
            }
            other => panic!("unexpected writes: {other:?}"),
        }
        assert_eq!(
            outcome.next,
            Phase::RequestHandler {
                backend_code: "# backend".to_string(),
                ui_code: "// component".to_string(),
            }
        );
    }
}

mod tests_stage {
    use super::*;

    #[tokio::test]
    async fn persists_raw_tests_and_jumps_to_documentation() {
        let agent = StubAgent::replying("```python\nassert True\n```");
        let artifacts = MemoryArtifactStore::new();
        let req = request("s");
        let caps = CapabilityFields::default();

        let outcome = stages::run(
            Phase::Tests {
                backend_code: "# backend".to_string(),
                handler_code: "// handler".to_string(),
            },
            input(&req, &caps, ""),
            &agent,
            &artifacts,
        )
        .await
        .unwrap();

        assert_eq!(outcome.stage, 5);
        assert_eq!(outcome.message, "Integration tests created");
        match &outcome.writes[..] {
            [ArtifactWrite::Put(file)] => {
                assert_eq!(file.name, "integration_tests.py");
                assert_eq!(file.code, "```python\nassert True\n```");
            }
            other => panic!("unexpected writes: {other:?}"),
        }
        assert_eq!(
            outcome.next,
            Phase::Docs {
                backend_code: "# backend".to_string(),
                frontend_code: String::new(),
            }
        );
    }
}

mod review_stage {
    use super::*;

    #[tokio::test]
    async fn reads_back_the_frontend_and_updates_it() {
        let agent = StubAgent::replying("// hardened");
        let artifacts = MemoryArtifactStore::new();
        artifacts
            .put(ProjectFile::new("Widget.js", "// original", "proj-1"))
            .await
            .unwrap();
        let mut req = request("s");
        req.suggested_files = vec!["readme.md".to_string(), "Widget.js".to_string()];
        let caps = CapabilityFields::default();

        let outcome = stages::run(Phase::Review, input(&req, &caps, ""), &agent, &artifacts)
            .await
            .unwrap();

        assert!(agent.last_prompt().user.contains("// original"));
        assert_eq!(artifact_names(&outcome.writes), vec!["Widget.js"]);
        assert_eq!(outcome.next, Phase::Styling);
    }

    #[tokio::test]
    async fn silent_agent_skips_the_write_back() {
        let agent = StubAgent::silent();
        let artifacts = MemoryArtifactStore::new();
        artifacts
            .put(ProjectFile::new("Widget.js", "// original", "proj-1"))
            .await
            .unwrap();
        let mut req = request("s");
        req.suggested_files = vec!["Widget.js".to_string()];
        let caps = CapabilityFields::default();

        let outcome = stages::run(Phase::Review, input(&req, &caps, ""), &agent, &artifacts)
            .await
            .unwrap();

        assert!(outcome.writes.is_empty());
        assert_eq!(
            outcome.output,
            StageOutput::Text("No impact analysis action performed.".to_string())
        );
    }

    #[tokio::test]
    async fn missing_frontend_flows_the_sentinel_into_the_prompt() {
        let agent = StubAgent::replying("// review");
        let artifacts = MemoryArtifactStore::new();
        let req = request("s"); // no suggested files at all
        let caps = CapabilityFields::default();

        let outcome = stages::run(Phase::Review, input(&req, &caps, ""), &agent, &artifacts)
            .await
            .unwrap();

        assert!(agent
            .last_prompt()
            .user
            .contains("No code found in the document for the '.js' file."));
        assert!(outcome.writes.is_empty());
    }
}

mod docs_stage {
    use super::*;

    #[tokio::test]
    async fn persists_documentation_and_advances_to_api_keys() {
        let agent = StubAgent::replying("## Quick start");
        let artifacts = MemoryArtifactStore::new();
        let req = request("s");
        let caps = CapabilityFields::default();

        let outcome = stages::run(
            Phase::Docs {
                backend_code: "# backend".to_string(),
                frontend_code: "// frontend".to_string(),
            },
            input(&req, &caps, ""),
            &agent,
            &artifacts,
        )
        .await
        .unwrap();

        assert_eq!(outcome.stage, 8);
        assert_eq!(outcome.message, "Documentation sent");
        assert_eq!(
            artifact_names(&outcome.writes),
            vec!["TechnicalDocumentation.txt"]
        );
        assert_eq!(outcome.next, Phase::ApiKeys);

        let prompt = agent.last_prompt();
        assert!(prompt.user.contains("# backend"));
        assert!(prompt.user.contains("// frontend"));
    }
}

mod api_keys_stage {
    use super::*;

    #[tokio::test]
    async fn step_list_is_raw_lines_not_fence_stripped() {
        let agent = StubAgent::replying("Step 1: sign up\n```\nStep 2: copy key");
        let artifacts = MemoryArtifactStore::new();
        let req = request("s");
        let caps = CapabilityFields::default();

        let outcome = stages::run(Phase::ApiKeys, input(&req, &caps, ""), &agent, &artifacts)
            .await
            .unwrap();

        assert_eq!(outcome.stage, 9);
        assert!(outcome.writes.is_empty());
        assert_eq!(
            outcome.output,
            StageOutput::Steps(vec![
                "Step 1: sign up".to_string(),
                "```".to_string(),
                "Step 2: copy key".to_string(),
            ])
        );
        assert_eq!(outcome.next, Phase::Done);
    }
}

mod terminal {
    use super::*;

    #[tokio::test]
    async fn done_sessions_refuse_to_run() {
        let agent = StubAgent::replying("anything");
        let artifacts = MemoryArtifactStore::new();
        let req = request("s");
        let caps = CapabilityFields::default();

        let err = stages::run(Phase::Done, input(&req, &caps, ""), &agent, &artifacts)
            .await
            .unwrap_err();

        assert!(matches!(err, StageError::SessionComplete));
    }
}
