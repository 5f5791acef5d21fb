use std::any::Any;

use budgetly_core::errors::{DatabaseError, Error, Result};
use diesel::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyBox = Box<dyn Any + Send + 'static>;
type Reply = oneshot::Sender<Result<AnyBox>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<AnyBox>, Reply)>,
}

fn actor_gone(detail: &str) -> Error {
    Error::Database(DatabaseError::Internal(format!("writer actor {}", detail)))
}

impl WriteHandle {
    /// Runs `job` on the writer's dedicated connection, inside an immediate
    /// transaction. An `Err` from the job rolls the transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| actor_gone("has stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| actor_gone("dropped the reply"))??;
        boxed
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| actor_gone("returned an unexpected type"))
    }
}

/// Spawns a background task that owns one pooled connection and applies
/// every write serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job<AnyBox>, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                // Dropping `rx` makes every exec() fail with a database error.
                error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The caller may have gone away (timeout, cancellation).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
