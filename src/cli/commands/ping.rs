use crate::api::{Gateway, HttpGateway};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

/// Handle the `ping` command: remote connectivity test, optionally adopting
/// the server-reported event code into the local config.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ping { adopt } = cmd {
        cfg.require_remote()?;

        let gateway = HttpGateway::new(&cfg.webapp_url, &cfg.api_token);
        let res = gateway.ping();

        if !res.ok {
            return Err(if res.is_network_error {
                AppError::Network(res.error_message())
            } else {
                AppError::Remote(res.error_message())
            });
        }

        success("Remote backend reachable.");

        match &res.event_code {
            Some(code) if !code.is_empty() => {
                info(format!("Server event code: {code}"));
                if *adopt {
                    // Reload from disk so a --db override never leaks in.
                    let mut updated = Config::load();
                    updated.event_code = code.clone();
                    updated.save()?;
                    success(format!("Event code '{code}' saved to config."));
                }
            }
            _ => {
                if *adopt {
                    warning("Server did not report an event code; nothing to adopt.");
                }
            }
        }
    }
    Ok(())
}
