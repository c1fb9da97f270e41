use super::DbPool;
use crate::errors::{IntoCore, StorageError};
use diesel::SqliteConnection;
use goalpost_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A job runs against the writer's connection inside one transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "database writer is no longer running".to_string(),
    ))
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction: if it returns an error,
    /// nothing it wrote is kept. Jobs are processed one at a time, so a job
    /// that reads and then writes a row never races with another writer.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone())?;

        let boxed = ret_rx.await.map_err(|_| writer_gone())??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "unexpected result type from database writer".to_string(),
            ))
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// The actor owns one pooled connection for its whole lifetime and processes
/// jobs serially. It stops once every [`WriteHandle`] has been dropped.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = pool.get().into_core()?;
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The caller may have gone away (request cancelled or timed out).
            let _ = reply_tx.send(result);
        }
        log::debug!("Database writer stopped");
    });

    Ok(WriteHandle { tx })
}
