use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use k8s_openapi::api::batch::v1::CronJob;
use kube::config::KubeconfigError;

use super::printer::IoStreams;
use crate::config::{ConfigError, Factory};
use crate::error::BoxError;
use crate::kubernetes_objects::CronJobClient;

pub(crate) const CREATED_UID: &str = "0b6c5e4e-3b0f-4c8e-9a57-2f1d6c1e9d42";

/// Records every submission; answers like an API server would, or fails.
#[derive(Default)]
pub(crate) struct FakeClient {
    pub(crate) calls: Mutex<Vec<(String, CronJob)>>,
    pub(crate) fail: bool,
}

impl FakeClient {
    pub(crate) fn failing() -> Self {
        FakeClient {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, CronJob)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CronJobClient for FakeClient {
    fn create<'a>(
        &'a self,
        namespace: &'a str,
        cronjob: &'a CronJob,
    ) -> BoxFuture<'a, Result<CronJob, BoxError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((namespace.to_string(), cronjob.clone()));
            if self.fail {
                return Err(BoxError::from(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }
            let mut created = cronjob.clone();
            created.metadata.namespace = Some(namespace.to_string());
            created.metadata.uid = Some(CREATED_UID.to_string());
            Ok(created)
        })
    }
}

pub(crate) struct FakeFactory {
    pub(crate) client: Arc<FakeClient>,
    pub(crate) namespace: String,
    pub(crate) unreachable: bool,
}

impl Default for FakeFactory {
    fn default() -> Self {
        FakeFactory {
            client: Arc::new(FakeClient::default()),
            namespace: "default".to_string(),
            unreachable: false,
        }
    }
}

impl Factory for FakeFactory {
    fn to_client(&self) -> BoxFuture<'_, Result<Arc<dyn CronJobClient>, ConfigError>> {
        Box::pin(async move {
            if self.unreachable {
                return Err(ConfigError::from(KubeconfigError::CurrentContextNotSet));
            }
            Ok(self.client.clone() as Arc<dyn CronJobClient>)
        })
    }

    fn namespace(&self) -> BoxFuture<'_, Result<String, ConfigError>> {
        Box::pin(async move { Ok::<_, ConfigError>(self.namespace.clone()) })
    }
}

/// Cloneable in-memory output stream.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn streams(&self) -> IoStreams {
        IoStreams {
            out: Box::new(self.clone()),
        }
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output stream whose every write fails.
pub(crate) struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
