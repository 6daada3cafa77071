//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::node_to_json;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::tree_traits::node_label;
use crate::domain::{NodeId, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    let local_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };

    match command {
        Commands::Tree { file } => tree(&services(&local_dir)?, file),
        Commands::Node { file, path } => node(&services(&local_dir)?, file, path),
        Commands::Translate { key, lang } => {
            if key.trim().is_empty() {
                return Err(CliError::Usage(
                    "translation key must not be empty".to_string(),
                ));
            }
            translate(&services(&local_dir)?, key, lang.as_deref())
        }
        Commands::Config { command } => config(command, &local_dir),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn services(local_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(local_dir))?;
    Ok(ServiceContainer::new(settings))
}

#[instrument(skip(container))]
fn tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let doc = container.documents.load(file)?;
    output::info(&doc.tree.to_tree_string(doc.root));
    Ok(())
}

#[instrument(skip(container))]
fn node(container: &ServiceContainer, file: &Path, path: &[usize]) -> CliResult<()> {
    let doc = container.documents.load(file)?;
    let id = doc.node_at(path)?;
    let tree = &doc.tree;

    output::header(&format!("node {:?}", tree.path(id)));
    output::info(&node_to_json(tree, id, container.settings.pretty_json)?);
    output::action("depth", &tree.depth(id));
    let describe = |sibling: Option<NodeId>| {
        sibling
            .and_then(|s| tree.node(s))
            .map(node_label)
            .unwrap_or_else(|| "-".to_string())
    };
    output::action("previous", &describe(tree.previous_sibling(id)));
    output::action("next", &describe(tree.next_sibling(id)));
    Ok(())
}

#[instrument(skip(container))]
fn translate(container: &ServiceContainer, key: &str, lang: Option<&str>) -> CliResult<()> {
    let langs = container.load_translations()?;
    let lang = lang.unwrap_or(container.settings.default_language.as_str());
    if !langs.iter().any(|l| l == lang) {
        output::warning(&format!("no dictionary loaded for '{lang}'"));
    }
    debug!("translate: lang={} key={:?}", lang, key);
    output::info(&container.translations.translate(lang, key));
    Ok(())
}

fn config(command: &ConfigCommands, local_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(local_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string());
            output::action("global", &global);
            output::action("local", &local_config_path(local_dir).display());
        }
    }
    Ok(())
}
