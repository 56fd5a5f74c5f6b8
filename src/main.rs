use std::error::Error as StdError;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{ArgAction, Parser};
use tracing::info;
use zbx_items::Result;
use zbx_items::config::Config;
use zbx_items::error::Error as ItemsError;
use zbx_items::telemetry::init_tracing;
use zbx_items::types::ValueType;
use zbx_items::zbx_client::{Item, ItemGetParams, ZbxClient};

const DEFAULT_CONFIG: &str = "config.toml";
const EXIT_NOT_FOUND: u8 = 2;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(author, version, about = "Query Zabbix items through item.get", long_about = None)]
struct Cli {
    /// Chemin du fichier de configuration TOML.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Filtre par identifiant d'item (répétable).
    #[arg(long = "item-id", value_name = "ID")]
    item_ids: Vec<String>,

    /// Filtre par identifiant d'hôte (répétable).
    #[arg(long = "host-id", value_name = "ID")]
    host_ids: Vec<String>,

    /// Filtre par identifiant de groupe d'hôtes (répétable).
    #[arg(long = "group-id", value_name = "ID")]
    group_ids: Vec<String>,

    /// Filtre par identifiant de template (répétable).
    #[arg(long = "template-id", value_name = "ID")]
    template_ids: Vec<String>,

    /// Nom technique de l'hôte.
    #[arg(long, value_name = "NAME")]
    host: Option<String>,

    /// Nom du groupe d'hôtes.
    #[arg(long, value_name = "NAME")]
    group: Option<String>,

    /// Uniquement les items actifs sur des hôtes supervisés.
    #[arg(long, action = ArgAction::SetTrue)]
    monitored: bool,

    /// Uniquement les items utilisés dans des triggers.
    #[arg(long, action = ArgAction::SetTrue)]
    with_triggers: bool,

    /// Inclut les items web.
    #[arg(long, action = ArgAction::SetTrue)]
    web_items: bool,

    /// Uniquement les items hérités d'un template.
    #[arg(long, action = ArgAction::SetTrue)]
    inherited: bool,

    /// Uniquement les items appartenant à des templates.
    #[arg(long, action = ArgAction::SetTrue)]
    templated: bool,

    /// N'affiche que les items de ce type (float, character, log, unsigned, text ou code).
    #[arg(long, value_name = "TYPE", value_parser = ValueType::from_str)]
    value_type: Option<ValueType>,

    /// Autorise les URLs HTTP non chiffrées.
    #[arg(long, action = ArgAction::SetTrue)]
    insecure: bool,

    /// Écrit les items en JSON sur la sortie standard.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Utilise un layer JSON pour les logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    json_logs: bool,

    /// Filtre de logs explicite (ex. "zbx_items=debug").
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,
}

impl Cli {
    fn item_params(&self) -> ItemGetParams {
        ItemGetParams {
            item_ids: self.item_ids.clone(),
            host_ids: self.host_ids.clone(),
            group_ids: self.group_ids.clone(),
            template_ids: self.template_ids.clone(),
            host: self.host.clone(),
            group: self.group.clone(),
            monitored: self.monitored,
            with_triggers: self.with_triggers,
            web_items: self.web_items,
            inherited: self.inherited,
            templated: self.templated,
            ..ItemGetParams::default()
        }
    }

    fn keep(&self, item: &Item) -> bool {
        self.value_type.is_none_or(|wanted| item.value_type() == Some(wanted))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_error(&err, &mut std::io::stderr().lock())),
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = Config::from_env_and_file(&config_path)?;

    let client = ZbxClient::new(
        config.base_url.clone(),
        config.token.clone(),
        config.http_request_timeout,
        config.http_connect_timeout,
        config.insecure_http || cli.insecure,
    )?;

    let params = cli.item_params();
    let mut items = client.items(&params).await?;
    info!(count = items.len(), url = %config.base_url, "items fetched");
    items.retain(|item| cli.keep(item));

    if cli.json {
        print_json(&items)
    } else {
        print_table(&items);
        Ok(())
    }
}

fn print_json(items: &[Item]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, items)
        .map_err(|err| ItemsError::Output(err.to_string()))?;
    writeln!(stdout).map_err(|err| ItemsError::Output(err.to_string()))
}

fn print_table(items: &[Item]) {
    for item in items {
        let kind = item
            .value_type()
            .map_or_else(|| format!("type {}", item.last_value_type), |t| t.to_string());
        println!(
            "Item #{} | Host #{} | {} | {} = {} | At: {}",
            item.item_id,
            item.host_id,
            item.name,
            kind,
            item.last_value,
            item.last_clock_local()
        );
    }
}

/// Writes the error to `out` and returns the process exit code.
fn report_error(err: &ItemsError, out: &mut impl Write) -> u8 {
    if err.is_not_found() {
        let _ = writeln!(out, "{err}");
        return EXIT_NOT_FOUND;
    }
    let _ = writeln!(out, "Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        let _ = writeln!(out, "  caused by: {cause}");
        source = cause.source();
    }
    1
}
