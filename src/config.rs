//! Connection settings assembled from the process environment.
//!
//! Nothing here validates the values it reads. Missing variables become empty
//! strings and the remote service is left to reject them.

use std::path::Path;

use tracing::debug;

/// Azure OpenAI resource endpoint, e.g. `https://my-resource.openai.azure.com`.
pub const ENV_OAI_ENDPOINT: &str = "AZURE_OAI_ENDPOINT";
/// Azure OpenAI API key.
pub const ENV_OAI_KEY: &str = "AZURE_OAI_KEY";
/// Name of the model deployment to call.
pub const ENV_OAI_DEPLOYMENT: &str = "AZURE_OAI_DEPLOYMENT";
/// Azure Cognitive Search endpoint.
pub const ENV_SEARCH_ENDPOINT: &str = "AZURE_SEARCH_ENDPOINT";
/// Azure Cognitive Search admin or query key.
pub const ENV_SEARCH_KEY: &str = "AZURE_SEARCH_KEY";
/// Name of the search index holding the grounding documents.
pub const ENV_SEARCH_INDEX: &str = "AZURE_SEARCH_INDEX";

/// Connection parameters for the model deployment and its retrieval index.
///
/// Built once per process and passed by reference into the requester.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub model_endpoint: String,
    pub model_credential: String,
    pub model_deployment_id: String,
    pub retrieval_endpoint: String,
    pub retrieval_credential: String,
    pub retrieval_index_id: String,
}

impl ConnectionConfig {
    /// Reads all six settings from the process environment.
    ///
    /// Never fails. Unset or non-UTF-8 variables are read as empty strings.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary name lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default();

        Self {
            model_endpoint: read(ENV_OAI_ENDPOINT),
            model_credential: read(ENV_OAI_KEY),
            model_deployment_id: read(ENV_OAI_DEPLOYMENT),
            retrieval_endpoint: read(ENV_SEARCH_ENDPOINT),
            retrieval_credential: read(ENV_SEARCH_KEY),
            retrieval_index_id: read(ENV_SEARCH_INDEX),
        }
    }

    /// Returns the environment variable names whose values are empty.
    ///
    /// Only used for a warning; the request is attempted regardless.
    pub fn missing_variables(&self) -> Vec<&'static str> {
        [
            (ENV_OAI_ENDPOINT, &self.model_endpoint),
            (ENV_OAI_KEY, &self.model_credential),
            (ENV_OAI_DEPLOYMENT, &self.model_deployment_id),
            (ENV_SEARCH_ENDPOINT, &self.retrieval_endpoint),
            (ENV_SEARCH_KEY, &self.retrieval_credential),
            (ENV_SEARCH_INDEX, &self.retrieval_index_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Controls what gets printed after a successful answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Print the title of every citation below the answer.
    pub show_citations: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_citations: true,
        }
    }
}

/// Environment file read at startup, relative to the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Loads `.env` from the current directory into the process environment.
///
/// Variables already set in the environment win. A missing file is fine.
pub fn load_dotenv() {
    if let Err(e) = load_dotenv_from(Path::new(DOTENV_FILE)) {
        debug!(error = %e, "no environment file loaded");
    }
}

/// Loads a specific environment file into the process environment.
pub(crate) fn load_dotenv_from(path: &Path) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)?;
    debug!(path = %path.display(), "loaded environment file");
    Ok(())
}
