use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

const DEFAULT_FILTER: &str = "info";

/// Initialise tracing avec un filtre optionnel et un mode JSON conditionnel.
///
/// Priorité du filtre : argument explicite, puis `RUST_LOG`, puis `info`.
///
/// # Errors
///
/// Retourne une erreur si aucun filtre n'est valide, si la couche JSON est
/// demandée alors que la fonctionnalité n'est pas compilée, ou si l'installation
/// du subscriber global échoue.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let env = std::env::var("RUST_LOG").ok();
    let filter = resolve_filter(explicit_filter, env.as_deref())?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json()
                .flatten_event(true),
        );
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()))?;
        return Ok(());
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        ));
    }

    // stdout carries the item listing, logs go to stderr
    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

fn resolve_filter(explicit: Option<&str>, env: Option<&str>) -> Result<EnvFilter> {
    [explicit, env, Some(DEFAULT_FILTER)]
        .into_iter()
        .flatten()
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}
