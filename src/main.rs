//! CLI entry point and process lifecycle.
//!
//! Preload the corpus, ignore `SIGCHLD`/`SIGPIPE`, bind and listen, print a
//! ready banner, spin up the worker pool, then run the acceptor loop. Exit
//! is abrupt on any startup failure and otherwise never reached during
//! normal operation.

mod config;
mod errors;
mod http;
mod io;
mod resources;
mod server;

use resources::blob::Blob;
use server::pool::Pool;
use socket2::{Domain, Socket, Type};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

fn main() {
    let port = match parse_port(std::env::args().nth(1)) {
        Some(port) => port,
        None => {
            eprintln!("usage: cifar-server <port>");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(port) {
        eprintln!("cifar-server: {e}");
        std::process::exit(1);
    }
}

fn parse_port(arg: Option<String>) -> Option<u16> {
    arg?.parse::<u16>().ok()
}

fn run(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let blob = Arc::new(Blob::preload(Path::new(config::CORPUS_PATH), config::NUM_RECORDS)?);

    ignore_signal(libc::SIGCHLD)?;
    ignore_signal(libc::SIGPIPE)?;

    let listener = bind_listener(port)?;
    println!("server: waiting for connections on http://localhost:{port}/");

    let pool = Pool::new(config::NUM_WORKERS, blob);
    loop {
        match listener.accept() {
            Ok((conn, _addr)) => pool.dispatch(conn),
            Err(e) => eprintln!("accept error: {e}"),
        }
    }
}

/// Binds the first address family that works, preferring a dual-stack IPv6
/// socket (so IPv4 clients are also served) and falling back to plain IPv4.
fn bind_listener(port: u16) -> std::io::Result<std::net::TcpListener> {
    match bind_v6_dual_stack(port) {
        Ok(listener) => Ok(listener),
        Err(_) => bind_v4(port),
    }
}

fn bind_v6_dual_stack(port: u16) -> std::io::Result<std::net::TcpListener> {
    let socket = Socket::new(Domain::IPV6, Type::STREAM, None)?;
    socket.set_only_v6(false)?;
    socket.set_reuse_address(true)?;
    let addr: SocketAddr = ([0u16; 8], port).into();
    socket.bind(&addr.into())?;
    socket.listen(config::BACKLOG)?;
    Ok(socket.into())
}

fn bind_v4(port: u16) -> std::io::Result<std::net::TcpListener> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, None)?;
    socket.set_reuse_address(true)?;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    socket.bind(&addr.into())?;
    socket.listen(config::BACKLOG)?;
    Ok(socket.into())
}

/// Installs an ignore-handler for `sig` (`SIG_IGN` with `SA_RESTART`).
fn ignore_signal(sig: libc::c_int) -> std::io::Result<()> {
    // SAFETY: SIG_IGN is a valid disposition for any signal; no signal
    // handler function pointer of ours is installed.
    let prev = unsafe { libc::signal(sig, libc::SIG_IGN) };
    if prev == libc::SIG_ERR {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}
