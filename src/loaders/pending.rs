use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::debug;

use crate::error::AssetError;

/// Asset decoding on a worker thread. The frame loop polls it once per tick
/// and never blocks on it.
#[derive(Debug)]
pub struct PendingAsset<T> {
    path: PathBuf,
    receiver: Receiver<Result<T, AssetError>>,
}

impl<T: Send + 'static> PendingAsset<T> {
    pub fn spawn<F>(path: impl Into<PathBuf>, load: F) -> Self
    where
        F: FnOnce(&Path) -> Result<T, AssetError> + Send + 'static,
    {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();

        let worker_path = path.clone();
        let worker_sender = sender.clone();
        let spawned = thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                let result = load(&worker_path);
                // the receiver may have been dropped; nothing left to notify
                let _ = worker_sender.send(result);
            });

        if let Err(err) = spawned {
            let _ = sender.send(Err(AssetError::Import { path: path.clone(), message: err.to_string() }));
        }

        debug!("started loading {path:?}");
        Self { path, receiver }
    }
}

impl<T> PendingAsset<T> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` while the worker is still busy
    pub fn poll(&self) -> Option<Result<T, AssetError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AssetError::Disconnected(self.path.clone()))),
        }
    }

    /// Block until the worker finishes; for tools and tests
    pub fn wait(self) -> Result<T, AssetError> {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(AssetError::Disconnected(self.path.clone())))
    }
}
