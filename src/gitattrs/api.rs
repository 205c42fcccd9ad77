//! # API Facade
//!
//! Single entry point for every gitattrs operation. It picks the template
//! (explicit name, else the configured default), passes options down and
//! returns structured [`CmdResult`]s. It does no printing and no formatting.
//!
//! `GitattrsApi<S: AttributesStore>` is generic over where attribute files
//! live: `FileStore` in the binary, `InMemoryStore` in tests.

use crate::commands;
use crate::commands::init::InitOptions;
use crate::config::GitattrsConfig;
use crate::error::Result;
use crate::store::AttributesStore;
use std::path::Path;

pub struct GitattrsApi<S: AttributesStore> {
    store: S,
    paths: commands::GitattrsPaths,
    config: GitattrsConfig,
}

impl<S: AttributesStore> GitattrsApi<S> {
    pub fn new(store: S, paths: commands::GitattrsPaths, config: GitattrsConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    fn template_name<'a>(&'a self, template: Option<&'a str>) -> &'a str {
        template.unwrap_or(&self.config.template)
    }

    pub fn list_templates(&self) -> Result<commands::CmdResult> {
        commands::list::run()
    }

    pub fn show_template(&self, template: Option<&str>) -> Result<commands::CmdResult> {
        commands::show::run(self.template_name(template))
    }

    pub fn init(
        &mut self,
        dir: &Path,
        template: Option<&str>,
        force: bool,
    ) -> Result<commands::CmdResult> {
        let options = InitOptions {
            force,
            backup: self.config.backup,
        };
        let name = self.template_name(template).to_string();
        commands::init::run(&mut self.store, dir, &name, options)
    }

    pub fn check_dir(&self, dir: &Path) -> Result<commands::CmdResult> {
        commands::check::run(&self.store, dir)
    }

    pub fn check_content(&self, source: &str, content: &[u8]) -> Result<commands::CmdResult> {
        commands::check::run_content(source, content)
    }

    pub fn status(&self, dir: &Path, template: Option<&str>) -> Result<commands::CmdResult> {
        commands::status::run(&self.store, dir, self.template_name(template))
    }

    pub fn explain<P: AsRef<str>>(
        &self,
        dir: &Path,
        template: Option<&str>,
        paths: &[P],
    ) -> Result<commands::CmdResult> {
        commands::explain::run(&self.store, dir, self.template_name(template), paths)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::GitattrsPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{
    CmdMessage, CmdResult, Explanation, FileState, GitattrsPaths, MessageLevel, RuleChange,
    StatusReport, TemplateSummary,
};
