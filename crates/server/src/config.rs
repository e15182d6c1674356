// crates/server/src/config.rs
//! Runtime configuration from CLI flags, falling back to environment variables.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use bhoomi_ai_jobs::RetentionPolicy;
use chrono::TimeDelta;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "bhoomi-ai", version, about = "BhoomiSetu AI microservice")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log level for this service's crates. `RUST_LOG` takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seconds a finished job stays queryable.
    #[arg(long, env = "JOB_TTL_SECS", default_value_t = 3600)]
    pub job_ttl_secs: u64,

    /// Maximum number of job records kept in memory.
    #[arg(
        long,
        env = "JOB_MAX_RECORDS",
        default_value_t = 10_000,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub job_max_records: usize,

    /// Seconds between retention sweeps.
    #[arg(
        long,
        env = "JOB_SWEEP_INTERVAL_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub job_sweep_interval_secs: u64,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn retention(&self) -> RetentionPolicy {
        let ttl = i64::try_from(self.job_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        RetentionPolicy {
            ttl,
            max_records: self.job_max_records,
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.job_sweep_interval_secs)
    }
}
