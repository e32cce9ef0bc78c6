use std::path::PathBuf;

use server_api::ApiContext;

use crate::config::Environment;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) environment: Environment,
    pub(crate) static_dir: PathBuf,
    pub(crate) body_limit_bytes: usize,
}
