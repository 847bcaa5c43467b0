use drillbook_lib::config::GeneratorConfig;
use drillbook_lib::problems::generator::{
    build_prompt, GenerationError, ProblemGenerator, TextBackend, MISSING_KEY_MESSAGE,
};
use std::sync::{Arc, Mutex};

struct FakeBackend {
    reply: Result<String, ()>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl TextBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(()) => Err(GenerationError::Transport {
                url: "http://localhost/responses".into(),
                message: "connection refused".into(),
            }),
        }
    }
}

#[test]
fn test_missing_credential_returns_sentinel() {
    let config = GeneratorConfig {
        api_key_env: "DRILLBOOK_TEST_UNSET_API_KEY".into(),
        ..GeneratorConfig::default()
    };
    let generator = ProblemGenerator::from_config(&config);
    assert!(!generator.is_enabled());
    assert_eq!(generator.generate(2, "scanpy", ""), MISSING_KEY_MESSAGE);
    assert_eq!(MISSING_KEY_MESSAGE, "OPENAI_API_KEY is not set.");
}

#[test]
fn test_generate_returns_backend_text() {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend { reply: Ok("문제: Leiden".into()), prompts: prompts.clone() };
    let generator = ProblemGenerator::with_backend(Box::new(backend), "Korean");

    assert_eq!(generator.generate(3, "squidpy", "Xenium LN"), "문제: Leiden");
    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Difficulty: 3"));
    assert!(prompts[0].contains("Topic: squidpy"));
    assert!(prompts[0].contains("Context: Xenium LN"));
    assert!(prompts[0].contains("Create one Korean coding problem"));
}

#[test]
fn test_transport_failure_is_downgraded_to_string() {
    let backend = FakeBackend { reply: Err(()), prompts: Arc::new(Mutex::new(Vec::new())) };
    let generator = ProblemGenerator::with_backend(Box::new(backend), "English");
    let text = generator.generate(1, "pandas", "");
    assert!(text.starts_with("Problem generation failed:"));
    assert!(text.contains("connection refused"));
}

#[test]
fn test_prompt_mentions_no_solution() {
    let prompt = build_prompt(1, "pandas", "", "English");
    assert!(prompt.contains("(no solution)"));
    assert!(prompt.contains("English"));
}
