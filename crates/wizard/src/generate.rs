//! Wizard run followed by template rendering and file generation.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {
    autocode_config::AutocodeConfig,
    autocode_sequencer::{PromptSurface, Sequencer},
    tracing::{info, warn},
};

use crate::{
    Error, Result,
    error::Context,
    notify::Notifier,
    state::WizardState,
    store::FileStore,
    template::TemplateRenderer,
    validate::stays_in_workspace,
    wizard::{TOTAL_STEPS, WizardSettings},
};

pub const NO_WORKSPACE: &str = "No folder or workspace opened!";

/// Runs the wizard and writes the rendered template into the first
/// workspace root.
pub struct Generator {
    settings: Arc<WizardSettings>,
    renderer: TemplateRenderer,
    template_path: PathBuf,
    roots: Vec<PathBuf>,
    store: Arc<dyn FileStore>,
    notifier: Arc<dyn Notifier>,
    open_after_write: bool,
}

impl Generator {
    pub fn new(
        settings: WizardSettings,
        renderer: TemplateRenderer,
        template_path: PathBuf,
        roots: Vec<PathBuf>,
        store: Arc<dyn FileStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            renderer,
            template_path,
            roots,
            store,
            notifier,
            open_after_write: false,
        }
    }

    /// Build from config. Relative template and workspace paths resolve
    /// against `base`.
    pub fn from_config(
        config: &AutocodeConfig,
        base: &Path,
        store: Arc<dyn FileStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        Ok(Self::new(
            WizardSettings::from_config(config),
            TemplateRenderer::new(config.template.strict)?,
            config.template_path(base),
            config.workspace_roots(base),
            store,
            notifier,
        ))
    }

    /// Open the generated file with the system handler once written.
    #[must_use]
    pub fn open_after_write(mut self, open: bool) -> Self {
        self.open_after_write = open;
        self
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Walk the user through the wizard. Returns `None` when it was not
    /// finished.
    pub async fn collect(&self, surface: &mut dyn PromptSurface) -> Result<Option<WizardState>> {
        let mut state = WizardState::new(&self.settings.title, TOTAL_STEPS);
        Sequencer::run(surface, &mut state, self.settings.entry()).await?;
        Ok(state.is_complete().then_some(state))
    }

    /// Run the wizard and generate the file.
    ///
    /// Returns the written path, or `None` when there is no workspace or the
    /// user cancelled. Nothing is read or written after a cancel.
    pub async fn run(&self, surface: &mut dyn PromptSurface) -> Result<Option<PathBuf>> {
        let Some(root) = self.roots.first() else {
            warn!("no workspace root configured");
            self.notifier.warning(NO_WORKSPACE);
            return Ok(None);
        };

        let Some(state) = self.collect(surface).await? else {
            info!("wizard cancelled");
            return Ok(None);
        };
        let name = state.name.clone().unwrap_or_default();
        let service = state.service_name.clone().unwrap_or_default();
        let target = workspace_target(root, &name)
            .with_context(|| format!("file name '{name}' must stay inside {}", root.display()))?;

        let bytes = self.store.read(&self.template_path).await?;
        let template = String::from_utf8(bytes).map_err(|e| Error::Template {
            path: self.template_path.clone(),
            message: e.to_string(),
        })?;

        self.notifier
            .progress(&format!("Creating file '{name}' from service '{service}'"));
        let rendered = self.renderer.render(&template, &state)?;
        self.store.write(&target, rendered.as_bytes()).await?;
        self.notifier.success(&format!(
            "Create file '{name}' from service '{service}' successfully!"
        ));
        info!(path = %target.display(), service = %service, "file generated");

        if self.open_after_write
            && let Err(e) = open::that(&target)
        {
            warn!(path = %target.display(), error = %e, "failed to open generated file");
        }
        Ok(Some(target))
    }
}

/// `root` joined with `name`, or `None` when `name` would land outside it.
fn workspace_target(root: &Path, name: &str) -> Option<PathBuf> {
    stays_in_workspace(name).then(|| root.join(name))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use {
        super::*,
        crate::{
            notify::{NoticeLevel, RecordingNotifier},
            store_memory::InMemoryFileStore,
        },
        autocode_sequencer::{
            AcceptAll,
            testing::{Scripted, ScriptedSurface},
        },
        rstest::rstest,
    };

    const TEMPLATE: &str = "/app/templates/service.java";

    fn generator(
        roots: Vec<PathBuf>,
        store: Arc<InMemoryFileStore>,
        notifier: Arc<RecordingNotifier>,
        strict: bool,
    ) -> Generator {
        let config = AutocodeConfig::default();
        Generator::new(
            WizardSettings::from_config(&config).with_validator(Arc::new(AcceptAll)),
            TemplateRenderer::new(strict).unwrap(),
            PathBuf::from(TEMPLATE),
            roots,
            store,
            notifier,
        )
    }

    fn walk() -> ScriptedSurface {
        ScriptedSurface::new()
            .script([Scripted::select(0)])
            .script([Scripted::accept("Out.java")])
    }

    #[tokio::test]
    async fn writes_rendered_template_and_reports_progress() {
        let store = Arc::new(
            InMemoryFileStore::new().with_file(TEMPLATE, "class {{fileName}} // {{serviceUrl}}"),
        );
        let notifier = Arc::new(RecordingNotifier::new());
        let generator = generator(
            vec![PathBuf::from("/ws")],
            Arc::clone(&store),
            Arc::clone(&notifier),
            false,
        );

        let written = generator.run(&mut walk()).await.unwrap();
        assert_eq!(written, Some(PathBuf::from("/ws/Out.java")));
        assert_eq!(
            store.get(Path::new("/ws/Out.java")).unwrap(),
            b"class Out // /service/one"
        );
        assert_eq!(notifier.notices(), vec![
            (
                NoticeLevel::Progress,
                "Creating file 'Out.java' from service 'some-service-1'".to_string()
            ),
            (
                NoticeLevel::Success,
                "Create file 'Out.java' from service 'some-service-1' successfully!".to_string()
            ),
        ]);
    }

    #[tokio::test]
    async fn no_workspace_warns_without_prompting() {
        let store = Arc::new(InMemoryFileStore::new().with_file(TEMPLATE, "x"));
        let notifier = Arc::new(RecordingNotifier::new());
        let generator = generator(Vec::new(), Arc::clone(&store), Arc::clone(&notifier), false);
        let mut surface = walk();

        assert_eq!(generator.run(&mut surface).await.unwrap(), None);
        assert!(surface.opened().is_empty());
        assert!(store.reads().is_empty());
        assert_eq!(notifier.notices(), vec![(
            NoticeLevel::Warning,
            NO_WORKSPACE.to_string()
        )]);
    }

    #[tokio::test]
    async fn cancel_touches_no_files() {
        let store = Arc::new(InMemoryFileStore::new().with_file(TEMPLATE, "x"));
        let notifier = Arc::new(RecordingNotifier::new());
        let generator = generator(
            vec![PathBuf::from("/ws")],
            Arc::clone(&store),
            Arc::clone(&notifier),
            false,
        );
        let mut surface = ScriptedSurface::new()
            .script([Scripted::select(0)])
            .script([Scripted::hide()]);

        assert_eq!(generator.run(&mut surface).await.unwrap(), None);
        assert!(store.reads().is_empty());
        assert_eq!(store.paths(), vec![PathBuf::from(TEMPLATE)]);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn missing_template_is_an_error() {
        let store = Arc::new(InMemoryFileStore::new());
        let generator = generator(
            vec![PathBuf::from("/ws")],
            Arc::clone(&store),
            Arc::new(RecordingNotifier::new()),
            false,
        );
        let err = generator.run(&mut walk()).await.unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
        assert!(store.paths().is_empty());
    }

    #[tokio::test]
    async fn strict_template_with_unknown_token_writes_nothing() {
        let store = Arc::new(InMemoryFileStore::new().with_file(TEMPLATE, "{{packageName}}"));
        let generator = generator(
            vec![PathBuf::from("/ws")],
            Arc::clone(&store),
            Arc::new(RecordingNotifier::new()),
            true,
        );
        let err = generator.run(&mut walk()).await.unwrap_err();
        assert!(matches!(err, Error::UnknownToken { .. }));
        assert_eq!(store.paths(), vec![PathBuf::from(TEMPLATE)]);
    }

    #[tokio::test]
    async fn non_utf8_template_is_rejected() {
        let store = Arc::new(InMemoryFileStore::new().with_file(TEMPLATE, vec![0xff_u8, 0xfe]));
        let generator = generator(
            vec![PathBuf::from("/ws")],
            store,
            Arc::new(RecordingNotifier::new()),
            false,
        );
        let err = generator.run(&mut walk()).await.unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }

    #[rstest]
    #[case::absolute("/abs.java")]
    #[case::parent("../up.java")]
    #[case::nested_parent("src/../../up.java")]
    #[case::current_dir("./here.java")]
    #[tokio::test]
    async fn name_leaving_the_workspace_writes_nothing(#[case] name: &str) {
        let store = Arc::new(InMemoryFileStore::new().with_file(TEMPLATE, "x"));
        let notifier = Arc::new(RecordingNotifier::new());
        let generator = generator(
            vec![PathBuf::from("/ws")],
            Arc::clone(&store),
            Arc::clone(&notifier),
            false,
        );
        let mut surface = ScriptedSurface::new()
            .script([Scripted::select(0)])
            .script([Scripted::accept(name)]);

        let err = generator.run(&mut surface).await.unwrap_err();
        assert!(matches!(err, Error::Message { .. }));
        assert!(err.to_string().contains("must stay inside /ws"));
        assert_eq!(store.paths(), vec![PathBuf::from(TEMPLATE)]);
        assert!(store.reads().is_empty());
        assert!(notifier.notices().is_empty());
    }

    #[rstest]
    #[case("Out.java", Some("/ws/Out.java"))]
    #[case("src/Out.java", Some("/ws/src/Out.java"))]
    #[case("", None)]
    #[case("/etc/evil.java", None)]
    #[case("a/../../b.java", None)]
    fn workspace_target_keeps_names_under_root(
        #[case] name: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            workspace_target(Path::new("/ws"), name),
            expected.map(PathBuf::from)
        );
    }

    #[test]
    fn from_config_resolves_paths_against_base() {
        let generator = Generator::from_config(
            &AutocodeConfig::default(),
            Path::new("/project"),
            Arc::new(InMemoryFileStore::new()),
            Arc::new(RecordingNotifier::new()),
        )
        .unwrap();
        assert_eq!(
            generator.template_path(),
            Path::new("/project/templates/service.java")
        );
        assert_eq!(generator.roots, vec![PathBuf::from("/project")]);
    }
}
