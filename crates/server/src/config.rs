// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Configuration for the carelog API server.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "carelogd", version, about = "Personal health record API server")]
pub struct ServerConfig {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "CARELOG_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000, env = "CARELOG_PORT")]
    pub port: u16,

    /// Secret used to sign and verify tokens.
    #[arg(
        long,
        default_value = "dev-secret-key-change-in-production",
        env = "CARELOG_JWT_SECRET",
        hide_env_values = true
    )]
    pub jwt_secret: String,

    /// Access token lifetime in seconds.
    #[arg(long, default_value_t = 900, env = "CARELOG_ACCESS_TTL_SECS")]
    pub access_ttl_secs: u64,

    /// Refresh token lifetime in seconds.
    #[arg(long, default_value_t = 604_800, env = "CARELOG_REFRESH_TTL_SECS")]
    pub refresh_ttl_secs: u64,
}
