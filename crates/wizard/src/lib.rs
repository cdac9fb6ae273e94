//! Service code generation wizard.
//!
//! Flow: action menu → pick service → enter file name → render template →
//! write file.

pub mod error;
pub mod generate;
pub mod menu;
pub mod notify;
pub mod state;
pub mod store;
pub mod store_file;
pub mod store_memory;
pub mod template;
pub mod validate;
pub mod wizard;

pub use {
    error::{Error, Result},
    generate::{Generator, NO_WORKSPACE},
    menu::{Action, ActionMenu, MenuEntry},
    notify::{NoticeLevel, Notifier, RecordingNotifier},
    state::WizardState,
    store::FileStore,
    store_file::FsFileStore,
    store_memory::InMemoryFileStore,
    template::TemplateRenderer,
    validate::UniqueNameValidator,
    wizard::{EnterFileName, PickService, WizardSettings},
};
