use spacesign_core::{Context, OsEnv};
use spacesign_http_send_reqwest::ReqwestHttpSend;
use spacesign_spaces::{Client, Config, ResponseError};

/// Build a [`Context`] sending with a fresh [`reqwest::Client`] and reading
/// the process environment.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::new(reqwest::Client::new()))
        .with_env(OsEnv)
}

/// Build a [`Client`] from `config`, filling unset fields from the process
/// environment.
pub fn default_client(config: Config) -> Result<Client, ResponseError> {
    let ctx = default_context();
    let config = config.from_env(&ctx);
    Client::new(ctx, &config)
}
