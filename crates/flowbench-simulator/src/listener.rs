//! Blocking TCP listener that feeds accepted clients to a [`Bridge`], one at a time

use std::io::{self, ErrorKind};
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use embassy_futures::block_on;
use embedded_hal_async::delay::DelayNs;
use flowbench_core::bridge::Bridge;
use flowbench_core::indicator::Indicator;
use flowbench_core::sensor::PressureSource;
use log::{info, warn};

use crate::link::StdLink;

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(200);

pub struct Listener {
    socket: TcpListener,
}

impl Listener {
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let socket = TcpListener::bind(addr)?;
        info!("Listening on {}", socket.local_addr()?);
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serve clients sequentially. A second client waits in the accept queue
    /// until the current session ends.
    ///
    /// With `sessions` set, returns after that many sessions; otherwise runs
    /// until accepting fails for a reason other than a peer giving up
    /// mid-handshake.
    pub fn serve<S, I, D>(
        &self,
        bridge: &mut Bridge<S, I, D>,
        sessions: Option<usize>,
    ) -> io::Result<()>
    where
        S: PressureSource,
        I: Indicator,
        D: DelayNs,
    {
        let mut served = 0;
        while sessions.is_none_or(|limit| served < limit) {
            let (stream, peer) = match self.socket.accept() {
                Ok(accepted) => accepted,
                Err(e) if is_transient(&e) => {
                    warn!("Accept failed: {}", e);
                    thread::sleep(ACCEPT_RETRY_DELAY);
                    continue;
                }
                Err(e) => return Err(e),
            };
            info!("Client connected from {}", peer);

            let mut link = match StdLink::new(stream) {
                Ok(link) => link,
                Err(e) => {
                    warn!("Failed to configure client socket: {}", e);
                    continue;
                }
            };

            let summary = block_on(bridge.serve(&mut link));
            info!("Client {} disconnected ({:?})", peer, summary.end);
            served += 1;
        }
        Ok(())
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::ConnectionAborted | ErrorKind::ConnectionReset | ErrorKind::Interrupted
    )
}
