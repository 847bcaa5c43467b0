use crate::config::AppConfig;
use crate::problems::generator::ProblemGenerator;
use crate::problems::store::ProblemStore;
use crate::progress::ProgressStore;
use crate::scaffold::Scaffolder;

/// Everything a command needs, built once from config and passed explicitly.
pub struct AppState {
    pub config: AppConfig,
    pub problems: ProblemStore,
    pub progress: ProgressStore,
    pub scaffolder: Scaffolder,
    pub generator: ProblemGenerator,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let generator = ProblemGenerator::from_config(&config.generator);
        Self::with_generator(config, generator)
    }

    /// Build with a caller-supplied generator (tests use a fake backend).
    pub fn with_generator(config: AppConfig, generator: ProblemGenerator) -> Self {
        AppState {
            problems: ProblemStore::new(config.problems_dir.clone(), config.load_policy),
            progress: ProgressStore::new(config.progress_path.clone()),
            scaffolder: Scaffolder::new(config.solutions_dir.clone()),
            generator,
            config,
        }
    }
}
