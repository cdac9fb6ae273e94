#![allow(clippy::unwrap_used)]

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {
    autocode_config::AutocodeConfig,
    autocode_terminal::{LineInput, Output, TerminalSurface, Transcript},
    autocode_wizard::{
        ActionMenu, FileStore, Generator, InMemoryFileStore, RecordingNotifier, TemplateRenderer,
        WizardSettings,
    },
    tokio::sync::mpsc,
};

#[tokio::test(start_paused = true)]
async fn typed_answers_drive_menu_and_wizard() {
    let (tx, rx) = mpsc::unbounded_channel();
    let transcript = Transcript::new();
    let mut surface = TerminalSurface::new(LineInput::new(rx), Output::new(transcript.clone()));

    let store = Arc::new(
        InMemoryFileStore::new().with_file("/tpl", "{{serviceName}} {{serviceUrl}} {{fileName}}"),
    );
    let generator = Generator::new(
        WizardSettings::from_config(&AutocodeConfig::default()),
        TemplateRenderer::new(false).unwrap(),
        PathBuf::from("/tpl"),
        vec![PathBuf::from("/ws")],
        Arc::clone(&store) as Arc<dyn FileStore>,
        Arc::new(RecordingNotifier::new()),
    );

    for line in [
        "1",      // menu: generate
        "3",      // service three
        ":back",  // back to the service list
        "",       // keep the pre-selected service
        "vscode", // reserved
        "Three.java",
    ] {
        tx.send(line.to_string()).unwrap();
    }

    ActionMenu::default()
        .run(&mut surface, &generator)
        .await
        .unwrap();

    assert_eq!(
        store.get(Path::new("/ws/Three.java")).unwrap(),
        b"some-service-3 /service/three Three"
    );
    let out = transcript.contents();
    assert!(out.contains("* 3) some-service-3: /service/three"));
    assert!(out.contains("! Name not unique"));
}
