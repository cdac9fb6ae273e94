use std::sync::Arc;

use {
    anyhow::Result,
    autocode_sequencer::{AskToResume, NeverResume, ResumePolicy},
    autocode_terminal::{TerminalNotifier, TerminalSurface},
    autocode_wizard::{ActionMenu, FsFileStore, Generator, TemplateRenderer, WizardSettings},
    tracing::debug,
};

use crate::context::Loaded;

/// Wizard behavior chosen on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardOptions {
    pub open: bool,
    pub resume_on_dismiss: bool,
}

fn generator(
    loaded: &Loaded,
    options: WizardOptions,
    surface: &TerminalSurface,
) -> Result<Generator> {
    let policy: Arc<dyn ResumePolicy> = if options.resume_on_dismiss {
        Arc::new(AskToResume::default())
    } else {
        Arc::new(NeverResume)
    };
    let settings = WizardSettings::from_config(&loaded.config).with_resume_policy(policy);
    let template = loaded.template_path();
    let roots = loaded.workspace_roots();
    debug!(template = %template.display(), roots = ?roots, "generator configured");

    Ok(Generator::new(
        settings,
        TemplateRenderer::new(loaded.config.template.strict)?,
        template,
        roots,
        Arc::new(FsFileStore::new()),
        Arc::new(TerminalNotifier::new(surface.output().clone())),
    )
    .open_after_write(options.open))
}

/// Show the action menu and run the picked action.
pub async fn run_menu(loaded: &Loaded, options: WizardOptions) -> Result<()> {
    let mut surface = TerminalSurface::stdio();
    let generator = generator(loaded, options, &surface)?;
    ActionMenu::default().run(&mut surface, &generator).await?;
    Ok(())
}

/// Run the generate flow without the menu.
pub async fn run_generate(loaded: &Loaded, options: WizardOptions) -> Result<()> {
    let mut surface = TerminalSurface::stdio();
    let generator = generator(loaded, options, &surface)?;
    generator.run(&mut surface).await?;
    Ok(())
}
