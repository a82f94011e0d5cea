//! TCP listener serving one bench client at a time
//!
//! Two sockets take turns. While one carries the active session the other
//! sits in `accept`, so exactly one further client can connect and wait.
//! When the session ends the roles swap and the waiting client is served
//! next. A third client is refused while both sockets are busy.

use core::convert::Infallible;

use embassy_net::tcp::{AcceptError, Error as TcpError, TcpSocket};
use embassy_net::{IpListenEndpoint, Stack};
use embassy_time::{Delay, Duration, Timer, with_timeout};
use flowbench_core::backlog::serve_with_pending;
use flowbench_core::bridge::Bridge;
use flowbench_core::indicator::QueuedIndicator;
use flowbench_core::sensor::FixedPressure;
use flowbench_core::session::{Link, Received};
use log::{error, info, warn};
use smoltcp::socket::tcp::State;
use thiserror_no_std::Error;

/// Per-direction TCP buffer size inside the network stack
pub const SOCKET_BUFFER_SIZE: usize = 1024;

/// A peer that stops acknowledging for this long is treated as gone
const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);
const KEEP_ALIVE: Duration = Duration::from_secs(3);
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(200);
const HANDSHAKE_POLL: Duration = Duration::from_millis(10);
const CLOSE_GRACE: Duration = Duration::from_millis(500);

pub type FirmwareBridge = Bridge<FixedPressure, QueuedIndicator<'static>, Delay>;

#[derive(Error, Debug)]
pub enum ListenerError {
    #[error("Cannot listen on TCP port {0}")]
    Bind(u16),
}

/// [`Link`] over an accepted embassy-net socket
pub struct SocketLink<'s, 'b> {
    socket: &'s mut TcpSocket<'b>,
}

impl<'s, 'b> SocketLink<'s, 'b> {
    pub fn new(socket: &'s mut TcpSocket<'b>) -> Self {
        Self { socket }
    }
}

impl Link for SocketLink<'_, '_> {
    type Error = TcpError;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), TcpError> {
        let mut remaining = bytes;
        while !remaining.is_empty() {
            let written = self.socket.write(remaining).await?;
            if written == 0 {
                return Err(TcpError::ConnectionReset);
            }
            remaining = &remaining[written..];
        }
        Ok(())
    }

    async fn try_receive(&mut self, buf: &mut [u8]) -> Result<Received, TcpError> {
        // `read` only completes immediately when data is already queued.
        if self.socket.can_recv() {
            match self.socket.read(buf).await? {
                0 => Ok(Received::Closed),
                n => Ok(Received::Data(n)),
            }
        } else if !self.socket.may_recv() {
            Ok(Received::Closed)
        } else {
            Ok(Received::Nothing)
        }
    }
}

#[embassy_executor::task]
pub async fn listener_task(stack: Stack<'static>, mut bridge: FirmwareBridge) {
    match run(stack, &mut bridge).await {
        Ok(never) => match never {},
        Err(e) => error!("Listener stopped: {}", e),
    }
}

/// Accept and serve clients forever.
///
/// Only a bind failure returns; everything that happens inside a session or
/// during a single accept is logged and the loop carries on.
pub async fn run(
    stack: Stack<'_>,
    bridge: &mut FirmwareBridge,
) -> Result<Infallible, ListenerError> {
    let port = bridge.config().port;
    let endpoint = IpListenEndpoint { addr: None, port };

    let mut rx_active = [0u8; SOCKET_BUFFER_SIZE];
    let mut tx_active = [0u8; SOCKET_BUFFER_SIZE];
    let mut rx_pending = [0u8; SOCKET_BUFFER_SIZE];
    let mut tx_pending = [0u8; SOCKET_BUFFER_SIZE];
    let mut active = TcpSocket::new(stack, &mut rx_active, &mut tx_active);
    let mut pending = TcpSocket::new(stack, &mut rx_pending, &mut tx_pending);

    stack.wait_config_up().await;
    info!("Listening on TCP port {}", port);

    loop {
        match wait_for_client(&mut active, endpoint).await {
            Ok(()) => {}
            Err(AcceptError::InvalidPort) => return Err(ListenerError::Bind(port)),
            Err(e) => {
                warn!("Accept failed: {:?}", e);
                active.abort();
                Timer::after(ACCEPT_RETRY_DELAY).await;
                continue;
            }
        }

        info!("Client connected from {:?}", active.remote_endpoint());
        let mut link = SocketLink::new(&mut active);
        let (_, queued) = serve_with_pending(
            bridge.serve(&mut link),
            wait_for_client(&mut pending, endpoint),
        )
        .await;

        match queued {
            Some(Ok(())) => info!("Next client already waiting"),
            Some(Err(AcceptError::InvalidPort)) => return Err(ListenerError::Bind(port)),
            Some(Err(e)) => {
                warn!("Accept for the waiting client failed: {:?}", e);
                pending.abort();
            }
            // Still listening; picked up again once it becomes the active socket.
            None => {}
        }

        close(&mut active).await;
        core::mem::swap(&mut active, &mut pending);
    }
}

/// Wait until `socket` holds an established connection on `endpoint`.
///
/// Safe to call again on a socket whose previous wait was dropped: a socket
/// still listening resumes, one mid-handshake is polled until it settles and
/// one that already connected returns at once.
async fn wait_for_client(
    socket: &mut TcpSocket<'_>,
    endpoint: IpListenEndpoint,
) -> Result<(), AcceptError> {
    loop {
        match socket.state() {
            State::Closed => {
                socket.set_timeout(Some(SOCKET_TIMEOUT));
                socket.set_keep_alive(Some(KEEP_ALIVE));
                return socket.accept(endpoint).await;
            }
            State::Listen => return socket.accept(endpoint).await,
            State::SynReceived => Timer::after(HANDSHAKE_POLL).await,
            _ => return Ok(()),
        }
    }
}

/// Close gracefully, then reset whatever is left so the socket is reusable.
async fn close(socket: &mut TcpSocket<'_>) {
    socket.close();
    if with_timeout(CLOSE_GRACE, socket.flush()).await.is_err() {
        warn!("Peer did not acknowledge close; aborting connection");
    }
    socket.abort();
}
