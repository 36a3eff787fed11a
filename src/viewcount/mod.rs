/*
 * Article views are counted without making the page
 * handler wait on the datastore: the handler drops a
 * message on a bounded queue and a dedicated thread
 * runs the increments one by one. A full queue loses
 * the view, which we accept.
 */

use crate::db::{self, Pool};
use color_eyre::Result;
use eyre::eyre;
use log::{debug, error, info};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

#[derive(Debug)]
enum ViewCountMessage {
  Close,
  Increment(i32)
}

pub struct ViewCountService {
  tx: SyncSender<ViewCountMessage>,
  thread_handle: Option<JoinHandle<()>>
}

impl ViewCountService {

  pub fn open(pool: &Pool, queue_size: usize) -> ViewCountService {
    let (tx, rx) = mpsc::sync_channel::<ViewCountMessage>(queue_size);
    let pool = pool.clone();
    info!("Starting view counter thread...");
    let thread_handle = thread::spawn(move || loop {
      match rx.recv() {
        Ok(ViewCountMessage::Close) => {
          info!("View counter thread terminating...");
          break;
        },
        Ok(ViewCountMessage::Increment(article_id)) => {
          debug!("Incrementing view count for article {}", article_id);
          if let Err(e) = db::increment_view_count(&pool, article_id) {
            error!(
              "Could not increment view count for article {} - {}",
              article_id,
              e
            );
          }
        },
        // Every sender is gone, stop the thread:
        Err(_) => break
      }
    });
    ViewCountService {
      tx,
      thread_handle: Some(thread_handle)
    }
  }

  // Fire and forget. try_send never blocks the caller:
  // a full queue drops the view with a log line, only
  // a dead thread raises an actual error.
  pub fn register_view(&self, article_id: i32) -> Result<()> {
    match self.tx.try_send(ViewCountMessage::Increment(article_id)) {
      Ok(_) => Ok(()),
      Err(TrySendError::Full(msg)) => {
        error!("View counter queue is full, dropping: {:?}", msg);
        Ok(())
      },
      Err(TrySendError::Disconnected(msg)) => {
        error!("View counter thread is dead, dropping: {:?}", msg);
        Err(eyre!("View counter thread appears to have died"))
      }
    }
  }

}

// Asking the thread to terminate on Drop means every
// queued increment still lands before shutdown.
impl Drop for ViewCountService {
  fn drop(&mut self) {
    match self.tx.send(ViewCountMessage::Close) {
      Ok(_) => info!("ViewCountService is closing..."),
      Err(e) => error!("Could not close ViewCountService - {}", e)
    }
    self.thread_handle.take().map(JoinHandle::join);
  }
}
