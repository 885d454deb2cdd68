use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::config;

/// fxstream-client - стрим котировок одного инструмента в терминал.
///
/// Подключается к стрим-API вендора, печатает по строке на каждый тик:
/// время, bid, ask и спред в пипсах.
#[derive(Parser, Debug, Clone)]
#[command(name = "fxstream-client", version, about)]
pub(crate) struct Args {
    /// Personal access token. Если не задан, будет запрошен с stdin
    #[arg(long, env = "OANDA_API_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    /// Номер счёта. Если не задан, будет запрошен с stdin
    #[arg(long, env = "OANDA_ACCOUNT_ID")]
    pub(crate) account: Option<String>,

    /// Инструмент, например USD_JPY или EUR_USD
    #[arg(long, default_value = config::DEFAULT_INSTRUMENT)]
    pub(crate) instrument: String,

    /// Реальный счёт вместо демо
    #[arg(long)]
    pub(crate) live: bool,

    /// Множитель спреда (по умолчанию 100 для *_JPY, иначе 10000)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) pip_scale: Option<f64>,

    /// Печатать время в UTC, а не в локальной зоне
    #[arg(long)]
    pub(crate) utc: bool,

    /// Проиграть записанный стрим из файла вместо подключения
    #[arg(long, conflicts_with = "live")]
    pub(crate) replay: Option<PathBuf>,

    /// Размер чанка чтения в байтах
    #[arg(long, default_value_t = config::DEFAULT_CHUNK_SIZE)]
    pub(crate) chunk_size: usize,
}

impl Args {
    /// Проверки, которые clap сам не делает
    pub(crate) fn validate(&self) -> Result<()> {
        if self.instrument.trim().is_empty() {
            bail!("--instrument is empty");
        }

        if let Some(scale) = self.pip_scale {
            if !scale.is_finite() || scale <= 0.0 {
                bail!("--pip-scale must be a positive number (got: {scale})");
            }
        }

        if self.chunk_size == 0 {
            bail!("--chunk-size must be greater than zero");
        }

        if let Some(path) = &self.replay {
            let md = std::fs::metadata(path)
                .with_context(|| format!("replay file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("--replay must point to a file: {:?}", path);
            }
        }

        Ok(())
    }
}
