//! Acceptor + worker pool.
//!
//! Connections are handed off over a zero-capacity `crossbeam::channel`. A
//! `bounded(0)` send only completes once some worker's `recv` is ready to
//! take it immediately, so the acceptor blocks until a worker is idle
//! without any hand-rolled mutex/condvar bookkeeping per slot.

use crate::resources::blob::Blob;
use crate::server::connection;
use crossbeam::channel::{bounded, Receiver, Sender};
use std::net::TcpStream;
use std::sync::Arc;
use std::thread::JoinHandle;

/// A fixed-size pool of worker threads, each pulling connections off a
/// shared rendezvous channel.
pub struct Pool {
    tx: Sender<TcpStream>,
    workers: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Spawns `num_workers` threads, each looping on `serve` for every
    /// connection handed to it.
    pub fn new(num_workers: usize, blob: Arc<Blob>) -> Self {
        let (tx, rx) = bounded::<TcpStream>(0);
        let mut workers = Vec::with_capacity(num_workers);

        for id in 0..num_workers {
            let rx: Receiver<TcpStream> = rx.clone();
            let blob = Arc::clone(&blob);
            let handle = std::thread::Builder::new()
                .name(format!("cifar-worker-{id}"))
                .spawn(move || worker_loop(rx, &blob))
                .expect("failed to spawn worker thread");
            workers.push(handle);
        }

        Pool { tx, workers }
    }

    /// Hands `conn` to the pool, blocking until some worker is idle.
    pub fn dispatch(&self, conn: TcpStream) {
        // The channel has no receivers only if every worker thread has
        // panicked and exited; there is no live pool to recover into, so
        // the accepted connection is simply dropped.
        let _ = self.tx.send(conn);
    }

    #[cfg(test)]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

fn worker_loop(rx: Receiver<TcpStream>, blob: &Blob) {
    while let Ok(conn) = rx.recv() {
        // `serve` takes ownership of `conn`; on every exit path where it
        // returns `false` the socket's `Drop` closes it here.
        connection::serve(conn, blob);
    }
}
