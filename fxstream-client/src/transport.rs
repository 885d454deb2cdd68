use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use fxstream_core::StreamRequest;
use log::debug;
use reqwest::blocking::Client;

use crate::config::CONNECT_TIMEOUT;

/// Открытое соединение: статус и тело, которое читается по мере прихода
pub(crate) struct StreamResponse {
    pub(crate) status: u16,
    pub(crate) body: Box<dyn Read + Send>,
}

/// Источник байт стрима
pub(crate) trait Transport {
    fn open(&self) -> anyhow::Result<StreamResponse>;
}

/// Долгоживущий HTTP GET к стрим-API
pub(crate) struct HttpTransport {
    client: Client,
    request: StreamRequest,
}

impl HttpTransport {
    pub(crate) fn new(request: StreamRequest) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            // стрим бесконечный, общий таймаут его бы обрывал
            .timeout(None)
            .build()
            .context("build HTTP client")?;

        Ok(Self { client, request })
    }
}

impl Transport for HttpTransport {
    fn open(&self) -> anyhow::Result<StreamResponse> {
        let req = &self.request;
        debug!("GET {} {:?}", req.url, req.query);

        let mut builder = self.client.get(&req.url).query(&req.query);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder
            .send()
            .with_context(|| format!("request error: {}", req.url))?;

        Ok(StreamResponse {
            status: resp.status().as_u16(),
            body: Box::new(resp),
        })
    }
}

/// Записанный стрим из файла. Статус всегда 200.
pub(crate) struct ReplayTransport {
    path: PathBuf,
}

impl ReplayTransport {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Transport for ReplayTransport {
    fn open(&self) -> anyhow::Result<StreamResponse> {
        let file = File::open(&self.path)
            .with_context(|| format!("open replay file {:?}", self.path))?;

        Ok(StreamResponse {
            status: 200,
            body: Box::new(file),
        })
    }
}
